use crate::config::{DEFAULT_MAX_ASCENT, TreeConfig};
use crate::error::{FolderError, Result};
use crate::fs_access::{FileSystem, LocalFs};
use crate::paths::{
    LIBRARY_DIR, ends_with_library, is_hidden, is_home_file, is_library_root, join,
    level1_segment, normalize_separators, parent_folder, strip_library_suffix,
    strip_project_marker_file, with_trailing_slash,
};
use crate::types::{Entry, EntryKind, EntryRecord, ScanResult};
use std::io::ErrorKind;

/// Entries that must all sit in a project root for it to count as a wiki.
const PROJECT_MARKERS: [&str; 4] = ["library/", "amWiki/", "config.json", "index.html"];

pub struct FolderManager<F: FileSystem> {
    fs: F,
    max_ascent: usize,
}

impl FolderManager<LocalFs> {
    #[must_use]
    pub fn local(config: &TreeConfig) -> Self {
        FolderManager::new(LocalFs).with_max_ascent(config.max_ascent)
    }
}

impl<F: FileSystem> FolderManager<F> {
    pub fn new(fs: F) -> Self {
        FolderManager {
            fs,
            max_ascent: DEFAULT_MAX_ASCENT,
        }
    }

    #[must_use]
    pub fn with_max_ascent(mut self, max_ascent: usize) -> Self {
        self.max_ascent = max_ascent;
        self
    }

    #[cfg(test)]
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Walks `dir` depth-first. Files sitting directly in a depth-0 directory
    /// are left out; hidden entries are never listed or descended into.
    pub fn scan(&self, dir: &str, depth: usize) -> ScanResult {
        self.walk(dir, depth, ScanResult::default(), &mut Vec::new())
    }

    // `ancestors` holds the resolved paths of the folders above `dir`, so a
    // linked folder pointing back up the chain is listed but not entered.
    fn walk(
        &self,
        dir: &str,
        depth: usize,
        mut acc: ScanResult,
        ancestors: &mut Vec<String>,
    ) -> ScanResult {
        let items = match self.fs.read_dir(dir) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("Cannot read directory {dir}: {e}");
                return acc;
            }
        };

        let resolved = self.fs.canonical(dir);
        if let Some(resolved) = &resolved {
            ancestors.push(resolved.clone());
        }

        for item in items {
            if is_hidden(&item.name) {
                continue;
            }

            if item.is_dir {
                let child = join(dir, &item.name);
                let cycle = item.is_symlink
                    && self
                        .fs
                        .canonical(&child)
                        .is_some_and(|target| ancestors.contains(&target));
                let sub = if cycle {
                    log::warn!("Not following {child}: it links back to one of its parents");
                    ScanResult::default()
                } else {
                    self.walk(&child, depth + 1, ScanResult::default(), ancestors)
                };

                acc.tree.insert(item.name.clone(), Entry::Directory(sub.tree));
                acc.entries.push(EntryRecord {
                    depth,
                    kind: EntryKind::Folder,
                    name: item.name,
                    path: dir.to_string(),
                });
                acc.entries.extend(sub.entries);
                acc.files.extend(sub.files);
            } else if depth > 0 {
                acc.files.push(join(dir, &item.name));
                acc.tree.insert(item.name.clone(), Entry::File);
                acc.entries.push(EntryRecord {
                    depth,
                    kind: EntryKind::File,
                    name: item.name,
                    path: dir.to_string(),
                });
            }
        }

        if resolved.is_some() {
            ancestors.pop();
        }
        acc
    }

    /// Scans a `.../library/` folder, seeding the tree with its home page.
    /// Any other path yields an empty result.
    pub fn scan_library(&self, path: &str) -> ScanResult {
        if !is_library_root(path) {
            log::warn!("Not a library folder (expected a path ending in library/): {path}");
            return ScanResult::default();
        }

        let mut seed = ScanResult::default();
        match self.fs.read_dir(path) {
            Ok(items) => {
                if let Some(home) = items
                    .into_iter()
                    .find(|item| !item.is_dir && is_home_file(&item.name))
                {
                    log::debug!("Home page: {}", home.name);
                    seed.tree.insert(home.name, Entry::File);
                }
            }
            Err(e) => log::warn!("Cannot look for a home page in {path}: {e}"),
        }

        self.walk(path, 0, seed, &mut Vec::new())
    }

    /// Finds the nearest `library/` folder at or above `path`.
    pub fn library_folder(&self, path: &str) -> Option<String> {
        if path.is_empty() {
            return None;
        }

        let mut current = normalize_separators(path);
        for _ in 0..=self.max_ascent {
            if current.contains(LIBRARY_DIR) {
                if ends_with_library(&current) {
                    return Some(with_trailing_slash(&current));
                }
            } else {
                let candidate = join(&current, "library/");
                if self.fs.is_dir(&candidate) {
                    return Some(candidate);
                }
            }
            current = parent_folder(&current)?;
        }

        log::warn!(
            "No library folder within {} levels above {path}",
            self.max_ascent
        );
        None
    }

    pub fn project_folder(&self, path: &str) -> Option<String> {
        self.library_folder(path)
            .map(|library| strip_library_suffix(&library))
    }

    /// Id of the top-level library section `path` belongs to, e.g. `01` for
    /// `.../library/01-intro/setup.md`. Empty when it cannot be determined.
    pub fn level1_id(&self, path: &str, lib_path: Option<&str>) -> String {
        if !path.contains(LIBRARY_DIR) {
            return String::new();
        }

        let library = match lib_path.filter(|p| !p.is_empty()) {
            Some(lib) => with_trailing_slash(lib),
            None => match self.library_folder(path) {
                Some(lib) => lib,
                None => return String::new(),
            },
        };
        if library.chars().count() < 8 {
            return String::new();
        }

        normalize_separators(path)
            .strip_prefix(library.as_str())
            .map(level1_segment)
            .unwrap_or_default()
    }

    /// Project root of an amWiki project containing `path`, if every marker
    /// entry is present. `path` may point at the root's config.json or index.html.
    pub fn is_amwiki(&self, path: &str) -> Option<String> {
        let path = strip_project_marker_file(&normalize_separators(path));
        let project = self.project_folder(&path)?;

        PROJECT_MARKERS
            .iter()
            .all(|marker| self.fs.exists(&join(&project, marker)))
            .then_some(project)
    }

    /// Deletes everything inside `path` except hidden subfolders. Links are
    /// removed themselves; whatever they point at is left alone.
    pub fn clean_folder(&self, path: &str) -> Result<()> {
        let items = self
            .fs
            .read_dir(path)
            .map_err(|e| FolderError::io(path, e))?;

        for item in items {
            let child = join(path, &item.name);
            if item.is_dir && is_hidden(&item.name) {
                continue;
            }

            if item.is_dir && !item.is_symlink {
                self.clean_folder(&child)?;
                self.fs
                    .remove_dir(&child)
                    .map_err(|e| FolderError::io(&child, e))?;
            } else {
                self.fs
                    .remove_file(&child)
                    .map_err(|e| FolderError::io(&child, e))?;
            }
        }

        Ok(())
    }

    /// Creates `path` and any missing ancestors. Existing paths are left alone.
    pub fn create_folder(&self, path: &str) -> Result<()> {
        if self.fs.exists(path) {
            return Ok(());
        }

        let normalized = normalize_separators(path);
        let target = if normalized.len() > 1 {
            normalized.trim_end_matches('/')
        } else {
            normalized.as_str()
        };

        let parent = match target.rfind('/') {
            Some(0) => Some("/"),
            Some(idx) => Some(&target[..idx]),
            None => None,
        };
        if let Some(parent) = parent
            && !self.fs.exists(parent)
        {
            self.create_folder(parent)?;
        }

        match self.fs.create_dir(target) {
            Ok(()) => {
                log::debug!("Created {target}");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(FolderError::io(path, e)),
        }
    }
}
