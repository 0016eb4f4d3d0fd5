use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Children of a directory, keyed by entry name in listing order.
pub type Tree = IndexMap<String, Entry>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File,
    Directory(Tree),
}

impl Entry {
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File)
    }

    #[must_use]
    pub fn children(&self) -> Option<&Tree> {
        match self {
            Entry::File => None,
            Entry::Directory(children) => Some(children),
        }
    }
}

// Files go out as `false` and directories as nested objects, which is the
// shape the wiki navigation builder consumes.
impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entry::File => serializer.serialize_bool(false),
            Entry::Directory(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (name, child) in children {
                    map.serialize_entry(name, child)?;
                }
                map.end()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EntryRecord {
    pub depth: usize,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    /// Containing directory, as it was passed to the scan at that level.
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ScanResult {
    pub tree: Tree,
    pub entries: Vec<EntryRecord>,
    pub files: Vec<String>,
}

impl ScanResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty() && self.entries.is_empty() && self.files.is_empty()
    }
}
