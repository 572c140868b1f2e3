use serde::{Deserialize, Serialize};

/// `metascan.toml` schema v1.
///
/// Every field is optional; anything left out falls back to the built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetascanConfigV1 {
    /// Optional schema string for tooling (`metascan.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Entry-relative directory holding metadata resources (`META-INF/helidon`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_root: Option<String>,

    /// Globs a resource must also match to be reported.
    #[serde(default)]
    pub include: Vec<String>,

    /// Exactly two resources, each shipped by a different module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probes: Option<Vec<String>>,

    /// `fail` (default) or `skip`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<String>,
}
