use std::collections::HashMap;
use std::fs;

pub const CONFIG_FILE: &str = ".amwiki_tree";
pub const DEFAULT_MAX_ASCENT: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Upper bound on parent hops when searching for a library folder.
    pub max_ascent: usize,
    pub default_path: Option<String>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            max_ascent: DEFAULT_MAX_ASCENT,
            default_path: None,
        }
    }
}

impl TreeConfig {
    /// Reads `.amwiki_tree` from the working directory. A missing file is
    /// not an error; every key is optional.
    #[must_use]
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_FILE) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut map = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if let Some((k, v)) = line.split_once('=') {
                let key = k.trim();
                let val = v.trim().trim_matches('"');
                map.insert(key, val);
            }
        }

        let max_ascent = match map.get("MAX_ASCENT").map(|v| v.parse::<usize>()) {
            Some(Ok(n)) if n > 0 => n,
            Some(_) => {
                log::warn!("Ignoring invalid MAX_ASCENT in {CONFIG_FILE}");
                DEFAULT_MAX_ASCENT
            }
            None => DEFAULT_MAX_ASCENT,
        };

        TreeConfig {
            max_ascent,
            default_path: map
                .get("DEFAULT_PATH")
                .filter(|v| !v.is_empty())
                .map(|v| (*v).to_string()),
        }
    }
}
