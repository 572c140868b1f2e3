use crate::model::MetascanConfigV1;
use anyhow::Context;
use globset::Glob;
use metascan_types::{ErrorPolicy, ScanPolicy};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub metadata_root: Option<String>,
    pub on_error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: ScanPolicy,
}

pub fn resolve_config(
    cfg: MetascanConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let mut effective = ScanPolicy::default();

    if let Some(root) = overrides.metadata_root.or(cfg.metadata_root) {
        effective.metadata_root = parse_metadata_root(&root)?;
    }

    if !cfg.include.is_empty() {
        validate_include(&cfg.include)?;
        effective.include = cfg.include;
    }

    if let Some(probes) = cfg.probes {
        effective.probes = parse_probes(probes)?;
    }

    if let Some(on_error) = overrides.on_error.or(cfg.on_error) {
        effective.on_error = parse_on_error(&on_error)?;
    }

    Ok(ResolvedConfig { effective })
}

fn parse_metadata_root(v: &str) -> anyhow::Result<String> {
    let trimmed = v.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        anyhow::bail!("metadata_root must not be empty");
    }
    if trimmed.starts_with('/') || trimmed.contains('\\') {
        anyhow::bail!("metadata_root must be a relative, '/'-separated path: {v}");
    }
    // Resources are matched on the literal prefix, so the root must already be normal.
    if trimmed
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        anyhow::bail!("metadata_root must not contain empty, '.' or '..' segments: {v}");
    }
    Ok(trimmed.to_string())
}

fn validate_include(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid include glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_probes(probes: Vec<String>) -> anyhow::Result<[String; 2]> {
    let count = probes.len();
    let [a, b]: [String; 2] = probes
        .try_into()
        .map_err(|_| anyhow::anyhow!("probes must list exactly two resources (got {count})"))?;
    for probe in [&a, &b] {
        if probe.trim().is_empty() || probe.starts_with('/') {
            anyhow::bail!("probe must be a non-empty relative resource path: {probe:?}");
        }
    }
    Ok([a, b])
}

fn parse_on_error(v: &str) -> anyhow::Result<ErrorPolicy> {
    match v {
        "fail" => Ok(ErrorPolicy::Fail),
        "skip" => Ok(ErrorPolicy::Skip),
        other => anyhow::bail!("unknown on_error: {other} (expected 'fail' or 'skip')"),
    }
}
