//! Stable identifiers and well-known resource locations.

/// Schema id stamped on every emitted report.
pub const SCHEMA_REPORT_V1: &str = "metascan.report.v1";

pub const TOOL_NAME: &str = "metascan";

// Archive layout
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
pub const CLASS_PATH_ATTRIBUTE: &str = "Class-Path";

/// First two bytes of every zip-family container (`PK`).
pub const ARCHIVE_SIGNATURE: [u8; 2] = [0x50, 0x4B];

// Resource defaults
pub const DEFAULT_METADATA_ROOT: &str = "META-INF/helidon";
pub const DEFAULT_PROBES: [&str; 2] = [
    "META-INF/helidon/io.helidon.metadata/module1/file.json",
    "META-INF/helidon/io.helidon.metadata/module2/file.json",
];
