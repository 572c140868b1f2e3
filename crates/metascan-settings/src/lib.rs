//! Config parsing and override resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::MetascanConfigV1;
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `metascan.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<MetascanConfigV1> {
    let cfg: MetascanConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective policy used by the scanner (defaults + config + overrides).
pub fn resolve_config(
    cfg: MetascanConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
