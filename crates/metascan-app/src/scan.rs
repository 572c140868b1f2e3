//! The `scan` and `probe` use cases: resolve the classpath, walk it, classify packaging.

use anyhow::Context;
use camino::Utf8Path;
use metascan_classpath::{ClasspathInput, ResourceFilter, Scanner, classify, resolve_seeds};
use metascan_settings::{Overrides, ResolvedConfig};
use metascan_types::{
    Flattening, FlatteningReport, SCHEMA_REPORT_V1, ScanReport, ToolMeta, ids,
};

/// Input for the scan use case.
#[derive(Clone, Debug)]
pub struct ScanInput<'a> {
    /// Directory relative path-list elements are resolved against.
    pub cwd: &'a Utf8Path,
    /// Primary path list, platform separated.
    pub class_path: &'a str,
    /// Module path list, same format.
    pub module_path: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

#[derive(Clone, Debug)]
pub struct ScanOutput {
    pub report: ScanReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the scan use case: resolve config, traverse the classpath, classify packaging.
pub fn run_scan(input: ScanInput<'_>) -> anyhow::Result<ScanOutput> {
    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        metascan_settings::MetascanConfigV1::default()
    } else {
        metascan_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved = metascan_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;
    let policy = &resolved.effective;

    let filter = ResourceFilter::new(&policy.metadata_root, &policy.include)
        .context("compile include globs")?;
    let seeds = resolve_seeds(
        &ClasspathInput {
            class_path: input.class_path.to_string(),
            module_path: input.module_path.to_string(),
        },
        input.cwd,
    )
    .context("resolve classpath")?;
    log::debug!("{} initial classpath entries", seeds.entries.len());

    let scanner = Scanner::new(filter, policy.on_error);
    let outcome = scanner.scan(seeds).context("scan classpath")?;
    let flattening = classify(&outcome.classpath, scanner.accessor(), &policy.probes)
        .context("classify packaging")?;

    let report = ScanReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: ids::TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        classpath: outcome.classpath.into_entries(),
        resources: outcome.resources.into_iter().collect(),
        flattening,
        diagnostics: outcome.diagnostics,
    };

    Ok(ScanOutput {
        report,
        resolved_config: resolved,
    })
}

/// Run the probe use case: only the flattening verdict is of interest.
pub fn run_probe(input: ScanInput<'_>) -> anyhow::Result<FlatteningReport> {
    Ok(run_scan(input)?.report.flattening)
}

/// Map verdict to exit code: 0 = determinate, 3 = indeterminate.
pub fn probe_exit_code(verdict: Flattening) -> i32 {
    match verdict {
        Flattening::Flattened | Flattening::Modular => 0,
        Flattening::Indeterminate => 3,
    }
}
