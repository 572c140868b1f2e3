//! Effective scan policy after config and overrides are merged.

use crate::ids;
use serde::{Deserialize, Serialize};

/// What to do when a single entry cannot be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the whole scan on the first failure.
    #[default]
    Fail,
    /// Record a diagnostic for the entry and keep going.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanPolicy {
    /// Entry-relative prefix every discovered resource must live under.
    pub metadata_root: String,
    /// Optional globs a resource must also match (entry-relative, `/`-separated).
    pub include: Vec<String>,
    pub probes: [String; 2],
    pub on_error: ErrorPolicy,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            metadata_root: ids::DEFAULT_METADATA_ROOT.to_string(),
            include: Vec::new(),
            probes: ids::DEFAULT_PROBES.map(str::to_string),
            on_error: ErrorPolicy::Fail,
        }
    }
}
