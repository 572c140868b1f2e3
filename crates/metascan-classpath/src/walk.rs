//! Resource walking for directory and archive entries.

use crate::archive::ArchiveHandle;
use crate::error::ScanError;
use camino::Utf8Path;
use globset::{Glob, GlobSet, GlobSetBuilder};
use metascan_types::EntryPath;
use std::path::Path;
use walkdir::WalkDir;

/// Decides which entry-relative file paths count as metadata resources.
#[derive(Clone, Debug)]
pub struct ResourceFilter {
    metadata_root: String,
    include: Option<GlobSet>,
}

impl ResourceFilter {
    /// `metadata_root` is entry-relative and `/`-separated, e.g. `META-INF/helidon`.
    pub fn new(metadata_root: &str, include: &[String]) -> Result<Self, globset::Error> {
        let include = if include.is_empty() {
            None
        } else {
            let mut b = GlobSetBuilder::new();
            for p in include {
                b.add(Glob::new(p)?);
            }
            Some(b.build()?)
        };
        Ok(Self {
            metadata_root: metadata_root.trim_matches('/').to_string(),
            include,
        })
    }

    pub fn metadata_root(&self) -> &str {
        &self.metadata_root
    }

    /// `relative` must be `/`-separated and relative to the entry root.
    pub fn matches(&self, relative: &str) -> bool {
        let under_root = relative
            .strip_prefix(self.metadata_root.as_str())
            .is_some_and(|rest| rest.starts_with('/'));
        under_root && self.include.as_ref().is_none_or(|set| set.is_match(relative))
    }
}

/// Collect matching files below a directory entry, as absolute on-disk paths.
pub fn walk_directory(root: &EntryPath, filter: &ResourceFilter) -> Result<Vec<String>, ScanError> {
    walk_directory_with(root, filter, |_| {})
}

/// [`walk_directory`] with a hook invoked for every directory actually entered.
///
/// Only directories on the way down to the metadata root, or inside it, are entered.
pub fn walk_directory_with(
    root: &EntryPath,
    filter: &ResourceFilter,
    mut on_dir: impl FnMut(&Path),
) -> Result<Vec<String>, ScanError> {
    let meta_dir = root.as_path().join(filter.metadata_root());
    let meta_dir = meta_dir.as_std_path();

    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        !e.file_type().is_dir() || meta_dir.starts_with(e.path()) || e.path().starts_with(meta_dir)
    });

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| ScanError::Io {
            path: err
                .path()
                .and_then(Utf8Path::from_path)
                .unwrap_or(root.as_path())
                .to_path_buf(),
            source: err.into(),
        })?;

        if entry.file_type().is_dir() {
            on_dir(entry.path());
            continue;
        }

        let Some(path) = Utf8Path::from_path(entry.path()) else {
            log::debug!("skipping non UTF-8 path {}", entry.path().display());
            continue;
        };
        let Ok(relative) = path.strip_prefix(root.as_path()) else {
            continue;
        };
        let relative = relative.as_str().replace('\\', "/");
        if filter.matches(&relative) {
            found.push(path.to_string());
        }
    }
    Ok(found)
}

/// Collect matching files inside a mounted archive, as `/`-rooted in-archive paths.
pub fn walk_archive<H: ArchiveHandle>(handle: &H, filter: &ResourceFilter) -> Vec<String> {
    handle
        .files()
        .into_iter()
        .filter(|name| filter.matches(name))
        .map(|name| format!("/{name}"))
        .collect()
}
