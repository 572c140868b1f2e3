use crate::{ClasspathEntry, EntryPath};
use serde::{Deserialize, Serialize};

/// Packaging layout inferred from where the two probe resources live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flattening {
    /// Both probes come from the same physical container.
    Flattened,
    /// Each probe comes from its own container.
    Modular,
    /// At least one probe is missing from the classpath.
    Indeterminate,
}

impl Flattening {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flattening::Flattened => "flattened",
            Flattening::Modular => "modular",
            Flattening::Indeterminate => "indeterminate",
        }
    }

    pub fn is_flattened(&self) -> bool {
        matches!(self, Flattening::Flattened)
    }
}

/// Outcome of looking up a single probe resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub resource: String,
    /// Full location the lookup resolved to, e.g. `/out/app.jar!/META-INF/...`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// The archive or directory holding the resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

impl ProbeResult {
    pub fn absent(resource: &str) -> Self {
        Self {
            resource: resource.to_string(),
            location: None,
            container: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.container.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatteningReport {
    pub verdict: Flattening,
    pub probes: Vec<ProbeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

/// An entry that was skipped instead of aborting the scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub entry: EntryPath,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Everything a single scan produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub schema: String,
    pub tool: ToolMeta,
    /// Entries in resolution order.
    pub classpath: Vec<ClasspathEntry>,
    /// Discovered resources, sorted.
    pub resources: Vec<String>,
    pub flattening: FlatteningReport,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}
