//! Rendering utilities for human-facing output (Markdown, verdict lines).

#![forbid(unsafe_code)]

mod markdown;

pub use markdown::{render_markdown, render_verdict};
