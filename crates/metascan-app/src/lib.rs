//! Use case orchestration for metascan.
//!
//! This crate provides the application layer: use cases that coordinate settings, classpath
//! scanning and rendering. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod render;
mod scan;

pub use render::{render_markdown, render_verdict, serialize_report, write_text};
pub use scan::{ScanInput, ScanOutput, probe_exit_code, run_probe, run_scan};
