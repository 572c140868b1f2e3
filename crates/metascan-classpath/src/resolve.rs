//! Turn the raw path lists into the initial work set.

use crate::error::ScanError;
use camino::Utf8Path;
use metascan_types::EntryPath;
use std::collections::HashSet;

/// Separator between elements of a path list on this platform.
pub const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// The two path lists handed over by the host environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClasspathInput {
    pub class_path: String,
    pub module_path: String,
}

/// Locations already opened by the scan. Only ever grows.
///
/// A location may be pushed onto the worklist several times, once per list element or
/// manifest naming it; it is opened on the first pop only.
#[derive(Clone, Debug, Default)]
pub struct VisitedSet(HashSet<EntryPath>);

impl VisitedSet {
    /// Returns `true` when `path` was not opened before.
    pub fn admit(&mut self, path: EntryPath) -> bool {
        self.0.insert(path)
    }

    pub fn contains(&self, path: &EntryPath) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Deduplicated starting entries.
#[derive(Clone, Debug, Default)]
pub struct Seeds {
    /// Class path elements first, then module path elements, duplicates dropped.
    pub entries: Vec<EntryPath>,
}

/// Split, normalize and deduplicate both path lists.
///
/// Relative elements are resolved against `cwd`. Empty elements are ignored.
pub fn resolve_seeds(input: &ClasspathInput, cwd: &Utf8Path) -> Result<Seeds, ScanError> {
    let mut seeds = Seeds::default();
    let mut seen = HashSet::new();
    for list in [&input.class_path, &input.module_path] {
        for raw in list.split(PATH_LIST_SEPARATOR).filter(|s| !s.is_empty()) {
            let path = EntryPath::normalize(raw, cwd)?;
            if seen.insert(path.clone()) {
                seeds.entries.push(path);
            }
        }
    }
    Ok(seeds)
}
