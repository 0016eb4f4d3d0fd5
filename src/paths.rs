//! String-only path arithmetic. Nothing in here touches the filesystem.
//!
//! Paths are handled as strings with forward slashes; backslashes are
//! normalized on the way in so Windows-style input resolves the same way.

use crate::error::{FolderError, Result};
use regex::Regex;
use std::sync::LazyLock;

pub const LIBRARY_DIR: &str = "library";
pub const HOME_FILE_ZH: &str = "首页.md";

static DRIVE_ROOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]:/?$").expect("Invalid regex pattern"));
// `library` must be a whole segment: `mylibrary/` does not count.
static LIBRARY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[\\/])library[\\/]?$").expect("Invalid regex pattern")
});
static LIBRARY_ROOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[\\/])library[\\/]$").expect("Invalid regex pattern")
});
static HOME_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^home[-_].*\.md$").expect("Invalid regex pattern"));
static PROJECT_MARKER_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(config\.json|index\.html)$").expect("Invalid regex pattern"));

#[must_use]
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

#[must_use]
pub fn with_trailing_slash(path: &str) -> String {
    let path = normalize_separators(path);
    if path.ends_with('/') {
        path
    } else {
        format!("{path}/")
    }
}

/// Joins a directory and an entry name with exactly one `/` between them.
#[must_use]
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') || dir.ends_with('\\') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Parent directory with a trailing `/`, or `None` when the path cannot be
/// ascended any further (drive roots, single-segment paths).
#[must_use]
pub fn parent_folder(path: &str) -> Option<String> {
    let path = normalize_separators(path);
    if DRIVE_ROOT.is_match(&path) {
        return None;
    }

    let trimmed = path.strip_suffix('/').unwrap_or(&path);
    if trimmed.matches('/').count() <= 1 {
        return None;
    }

    let cut = trimmed.rfind('/')?;
    Some(trimmed[..=cut].to_string())
}

pub fn base_name(path: &str) -> Result<String> {
    let path = normalize_separators(path);
    let trimmed = path.strip_suffix('/').unwrap_or(&path);

    match trimmed.rsplit('/').next() {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(FolderError::NoBaseName {
            path: path.to_string(),
        }),
    }
}

/// True when the last segment is `library`, with or without a trailing separator.
#[must_use]
pub fn ends_with_library(path: &str) -> bool {
    LIBRARY_SUFFIX.is_match(path)
}

/// True only for `.../library/`, the form `scan_library` accepts.
#[must_use]
pub fn is_library_root(path: &str) -> bool {
    LIBRARY_ROOT.is_match(path)
}

#[must_use]
pub fn strip_library_suffix(path: &str) -> String {
    LIBRARY_SUFFIX.replace(path, "${1}").into_owned()
}

#[must_use]
pub fn strip_project_marker_file(path: &str) -> String {
    PROJECT_MARKER_FILE.replace(path, "").into_owned()
}

#[must_use]
pub fn is_home_file(name: &str) -> bool {
    name == HOME_FILE_ZH || HOME_FILE.is_match(name)
}

#[must_use]
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// First `-`/`_` delimited part of the first segment of `remainder`.
/// `01-intro/02_setup.md` gives `01`.
#[must_use]
pub fn level1_segment(remainder: &str) -> String {
    remainder
        .trim_start_matches('/')
        .split('/')
        .next()
        .and_then(|segment| segment.split(['-', '_']).next())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_folder() {
        assert_eq!(parent_folder("/a/b/c/"), Some("/a/b/".to_string()));
        assert_eq!(parent_folder("/a/b/c"), Some("/a/b/".to_string()));
        assert_eq!(parent_folder("/a/b/"), Some("/a/".to_string()));
        assert_eq!(parent_folder("/a/"), None);
        assert_eq!(parent_folder("/a"), None);
        assert_eq!(parent_folder("a/b/c"), Some("a/b/".to_string()));
    }

    #[test]
    fn test_parent_folder_windows_paths() {
        assert_eq!(parent_folder("C:"), None);
        assert_eq!(parent_folder("C:\\"), None);
        assert_eq!(
            parent_folder("C:\\wiki\\library\\"),
            Some("C:/wiki/".to_string())
        );
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("/a/b/c").unwrap(), "c");
        assert_eq!(base_name("/a/b/c/").unwrap(), "c");
        assert_eq!(base_name("a\\b\\doc.md").unwrap(), "doc.md");
        assert_eq!(base_name("single").unwrap(), "single");
    }

    #[test]
    fn test_base_name_without_segment() {
        assert!(matches!(base_name("/"), Err(FolderError::NoBaseName { .. })));
        assert!(matches!(base_name(""), Err(FolderError::NoBaseName { .. })));
        assert!(matches!(base_name("a//"), Err(FolderError::NoBaseName { .. })));
    }

    #[test]
    fn test_library_patterns() {
        assert!(ends_with_library("/w/library"));
        assert!(ends_with_library("/w/library/"));
        assert!(ends_with_library("C:\\w\\library\\"));
        assert!(!ends_with_library("/w/library/docs"));

        assert!(is_library_root("/w/library/"));
        assert!(!is_library_root("/w/library"));
        assert!(!is_library_root("/w/libraryx/"));

        assert_eq!(strip_library_suffix("/w/library/"), "/w/");
        assert_eq!(strip_library_suffix("/w/library"), "/w/");
    }

    #[test]
    fn test_library_must_be_whole_segment() {
        assert!(!ends_with_library("/w/mylibrary/"));
        assert!(!ends_with_library("/w/mylibrary"));
        assert!(!is_library_root("/w/mylibrary/"));
        assert!(!is_library_root("C:\\w\\mylibrary\\"));

        assert!(ends_with_library("library/"));
        assert!(is_library_root("library/"));
        assert!(is_library_root("C:\\w\\library\\"));

        assert_eq!(strip_library_suffix("/w/mylibrary/"), "/w/mylibrary/");
        assert_eq!(strip_library_suffix("C:\\w\\library\\"), "C:\\w\\");
        assert_eq!(strip_library_suffix("library/"), "");
    }

    #[test]
    fn test_strip_project_marker_file() {
        assert_eq!(strip_project_marker_file("/w/config.json"), "/w/");
        assert_eq!(strip_project_marker_file("/w/index.html"), "/w/");
        assert_eq!(strip_project_marker_file("/w/library/"), "/w/library/");
    }

    #[test]
    fn test_is_home_file() {
        assert!(is_home_file("home-welcome.md"));
        assert!(is_home_file("home_index.md"));
        assert!(is_home_file("首页.md"));
        assert!(!is_home_file("homepage.md"));
        assert!(!is_home_file("home-welcome.txt"));
        assert!(!is_home_file("01-home-welcome.md"));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/w/library/", "a.md"), "/w/library/a.md");
        assert_eq!(join("/w/library", "a.md"), "/w/library/a.md");
        assert_eq!(join("", "a.md"), "a.md");
    }

    #[test]
    fn test_level1_segment() {
        assert_eq!(level1_segment("01-intro/02_setup.md"), "01");
        assert_eq!(level1_segment("03_api/x.md"), "03");
        assert_eq!(level1_segment("plain/x.md"), "plain");
        assert_eq!(level1_segment(""), "");
    }
}
