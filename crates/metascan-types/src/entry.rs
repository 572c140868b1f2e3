use crate::EntryPath;
use serde::{Deserialize, Serialize};

/// What a classpath location turned out to be when it was opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    Archive,
}

/// A resolved classpath location. Identity is the normalized path alone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClasspathEntry {
    pub path: EntryPath,
    pub kind: EntryKind,
}

impl ClasspathEntry {
    pub fn directory(path: EntryPath) -> Self {
        Self {
            path,
            kind: EntryKind::Directory,
        }
    }

    pub fn archive(path: EntryPath) -> Self {
        Self {
            path,
            kind: EntryKind::Archive,
        }
    }

    /// Location string for a resource found inside this entry.
    ///
    /// Archives use the `<archive>!/<resource>` form; directories are plain joins.
    pub fn resource_location(&self, resource: &str) -> String {
        match self.kind {
            EntryKind::Archive => format!("{}!/{}", self.path, resource),
            EntryKind::Directory => self.path.join(resource).into_string(),
        }
    }
}
