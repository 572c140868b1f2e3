use metascan_types::{Flattening, FlatteningReport, ScanReport};

pub fn render_markdown(report: &ScanReport) -> String {
    let mut out = String::new();

    out.push_str("## Metadata scan\n\n");
    out.push_str(&format!(
        "Flattened: {}\n\n",
        report.flattening.verdict.is_flattened()
    ));
    if let Some(note) = &report.flattening.diagnostic {
        out.push_str(&format!("> Note: {}\n\n", note));
    }

    if !report.diagnostics.is_empty() {
        out.push_str("### Skipped entries\n\n");
        for d in &report.diagnostics {
            out.push_str(&format!("- `{}`: {}\n", d.entry, d.message));
        }
        out.push('\n');
    }

    out.push_str("### Discovered resources\n\n");
    if report.resources.is_empty() {
        out.push_str("No resources found.\n");
        return out;
    }
    for r in &report.resources {
        out.push_str(r);
        out.push('\n');
    }

    out
}

/// One line describing the packaging layout, e.g. `modular`.
pub fn render_verdict(flattening: &FlatteningReport) -> String {
    match (flattening.verdict, &flattening.diagnostic) {
        (Flattening::Indeterminate, Some(note)) => format!("indeterminate ({note})"),
        (verdict, _) => verdict.as_str().to_string(),
    }
}
