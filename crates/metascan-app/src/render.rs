//! Report serialization and rendering.

use anyhow::Context;
use camino::Utf8Path;
use metascan_types::{FlatteningReport, ScanReport};

pub fn render_markdown(report: &ScanReport) -> String {
    metascan_render::render_markdown(report)
}

pub fn render_verdict(flattening: &FlatteningReport) -> String {
    metascan_render::render_verdict(flattening)
}

/// Pretty JSON with a trailing newline.
pub fn serialize_report(report: &ScanReport) -> anyhow::Result<String> {
    let mut text = serde_json::to_string_pretty(report).context("serialize report")?;
    text.push('\n');
    Ok(text)
}

/// Write `text` to `path`, creating parent directories.
pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write {path}"))?;
    Ok(())
}
