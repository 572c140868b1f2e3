//! Classpath adapters: resolve path lists, open archives, follow manifest references,
//! and walk entries for metadata resources.
//!
//! This crate is allowed to do filesystem IO. Everything runs synchronously on the
//! caller's thread; archive handles are closed as soon as an entry has been visited.

#![forbid(unsafe_code)]

pub mod archive;
pub mod classify;
mod error;
pub mod expand;
pub mod manifest;
pub mod resolve;
pub mod scan;
pub mod walk;

pub use archive::{ArchiveAccessor, ArchiveHandle, ZipAccessor, has_archive_signature};
pub use classify::{classify, container_identity, locate};
pub use error::ScanError;
pub use resolve::{ClasspathInput, PATH_LIST_SEPARATOR, Seeds, VisitedSet, resolve_seeds};
pub use scan::{Classpath, ScanOutcome, Scanner};
pub use walk::ResourceFilter;
