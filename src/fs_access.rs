use std::fs;
use std::io;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirItem {
    pub name: String,
    /// Classified by what the entry resolves to, so a link to a folder is a folder.
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// The filesystem operations the folder manager needs. Paths are plain
/// strings because every caller works on slash-separated string paths.
pub trait FileSystem {
    /// Immediate children of `path`, in the order the platform lists them.
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirItem>>;
    fn is_dir(&self, path: &str) -> bool;
    fn exists(&self, path: &str) -> bool;
    /// Fully resolved form of `path`, used to spot directory link cycles.
    fn canonical(&self, path: &str) -> Option<String>;
    /// Creates a single directory; the parent must already exist.
    fn create_dir(&self, path: &str) -> io::Result<()>;
    /// Removes an empty directory.
    fn remove_dir(&self, path: &str) -> io::Result<()>;
    fn remove_file(&self, path: &str) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirItem>> {
        // No sort_by: entries come back in readdir order.
        let mut items = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            let is_symlink = entry.path_is_symlink();
            items.push(DirItem {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir: if is_symlink {
                    entry.path().is_dir()
                } else {
                    entry.file_type().is_dir()
                },
                is_symlink,
            });
        }
        Ok(items)
    }

    fn is_dir(&self, path: &str) -> bool {
        std::path::Path::new(path).is_dir()
    }

    fn exists(&self, path: &str) -> bool {
        std::path::Path::new(path).exists()
    }

    fn canonical(&self, path: &str) -> Option<String> {
        fs::canonicalize(path)
            .ok()
            .map(|p| p.to_string_lossy().to_string())
    }

    fn create_dir(&self, path: &str) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o777);
        }
        builder.create(path)
    }

    fn remove_dir(&self, path: &str) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_file(&self, path: &str) -> io::Result<()> {
        fs::remove_file(path)
    }
}
