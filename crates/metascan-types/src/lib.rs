//! Stable DTOs shared across the metascan workspace.
//!
//! This crate is intentionally boring:
//! - canonical entry path identity and its normalization rules
//! - classpath entry and report data types
//! - the effective scan policy
//! - well-known ids, resource locations and defaults

#![forbid(unsafe_code)]

pub mod entry;
pub mod ids;
pub mod path;
pub mod policy;
pub mod report;

pub use entry::{ClasspathEntry, EntryKind};
pub use ids::SCHEMA_REPORT_V1;
pub use path::{EntryPath, PathError};
pub use policy::{ErrorPolicy, ScanPolicy};
pub use report::{Diagnostic, Flattening, FlatteningReport, ProbeResult, ScanReport, ToolMeta};
