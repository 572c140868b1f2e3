//! The worklist-driven scan: seed, expand, walk.

use crate::archive::{ArchiveAccessor, ZipAccessor};
use crate::error::ScanError;
use crate::expand::expand_archive;
use crate::resolve::{Seeds, VisitedSet};
use crate::walk::{ResourceFilter, walk_archive, walk_directory};
use camino::Utf8PathBuf;
use metascan_types::{ClasspathEntry, Diagnostic, EntryPath, ErrorPolicy};
use std::collections::BTreeSet;
use std::io;

/// Entries in class-loader search order.
///
/// Each archive is followed by the entries its manifest references (depth-first, in
/// declaration order), then by the next element of the original path lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classpath {
    entries: Vec<ClasspathEntry>,
}

impl Classpath {
    pub fn new(entries: Vec<ClasspathEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ClasspathEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ClasspathEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScanOutcome {
    pub classpath: Classpath,
    pub resources: BTreeSet<String>,
    /// Entries skipped under [`ErrorPolicy::Skip`].
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Scanner<A = ZipAccessor> {
    accessor: A,
    filter: ResourceFilter,
    on_error: ErrorPolicy,
}

impl Scanner<ZipAccessor> {
    pub fn new(filter: ResourceFilter, on_error: ErrorPolicy) -> Self {
        Self::with_accessor(ZipAccessor, filter, on_error)
    }
}

struct Visit {
    entry: ClasspathEntry,
    resources: Vec<String>,
    discovered: Vec<EntryPath>,
}

impl<A: ArchiveAccessor> Scanner<A> {
    pub fn with_accessor(accessor: A, filter: ResourceFilter, on_error: ErrorPolicy) -> Self {
        Self {
            accessor,
            filter,
            on_error,
        }
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Drain the worklist seeded by `seeds`.
    ///
    /// A location is opened on its first pop and skipped on later ones, so every reachable
    /// location is visited exactly once and cyclic manifest references terminate.
    pub fn scan(&self, seeds: Seeds) -> Result<ScanOutcome, ScanError> {
        let mut stack: Vec<EntryPath> = seeds.entries.into_iter().rev().collect();
        let mut opened = VisitedSet::default();
        let mut outcome = ScanOutcome::default();
        let mut order = Vec::new();

        while let Some(path) = stack.pop() {
            if !opened.admit(path.clone()) {
                continue;
            }
            match self.visit(&path, &opened) {
                Ok(Some(visit)) => {
                    outcome.resources.extend(visit.resources);
                    stack.extend(visit.discovered.into_iter().rev());
                    order.push(visit.entry);
                }
                Ok(None) => {}
                Err(err) => match self.on_error {
                    ErrorPolicy::Fail => return Err(err),
                    ErrorPolicy::Skip => {
                        let message = err.describe();
                        log::warn!("skipping {path}: {message}");
                        outcome.diagnostics.push(Diagnostic {
                            entry: path,
                            message,
                        });
                    }
                },
            }
        }

        outcome.classpath = Classpath::new(order);
        log::info!(
            "scanned {} entries ({} opened), found {} resources",
            outcome.classpath.len(),
            opened.len(),
            outcome.resources.len()
        );
        Ok(outcome)
    }

    fn visit(&self, path: &EntryPath, opened: &VisitedSet) -> Result<Option<Visit>, ScanError> {
        let metadata = match std::fs::metadata(path.as_path()) {
            Ok(m) => m,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("skipping missing entry {path}");
                return Ok(None);
            }
            Err(source) => {
                return Err(ScanError::Io {
                    path: Utf8PathBuf::from(path.as_str()),
                    source,
                });
            }
        };

        if metadata.is_dir() {
            log::debug!("walking directory {path}");
            let resources = walk_directory(path, &self.filter)?;
            return Ok(Some(Visit {
                entry: ClasspathEntry::directory(path.clone()),
                resources,
                discovered: Vec::new(),
            }));
        }

        if !self.accessor.is_archive(path.as_path())? {
            log::debug!("skipping {path}: not an archive");
            return Ok(None);
        }

        log::debug!("walking archive {path}");
        let mut handle = self.accessor.mount(path)?;
        let resources = walk_archive(&handle, &self.filter);
        let discovered = expand_archive(path, &mut handle, opened)?;
        Ok(Some(Visit {
            entry: ClasspathEntry::archive(path.clone()),
            resources,
            discovered,
        }))
    }
}
