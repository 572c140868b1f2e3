//! Flattening detection from the containers that hold two probe resources.

use crate::archive::{ArchiveAccessor, ArchiveHandle};
use crate::error::ScanError;
use crate::scan::Classpath;
use metascan_types::{EntryKind, Flattening, FlatteningReport, ProbeResult};

/// Find the first entry, in classpath order, that holds `resource`.
///
/// A resource that no entry holds is not an error: it comes back as an absent result.
pub fn locate<A: ArchiveAccessor>(
    classpath: &Classpath,
    accessor: &A,
    resource: &str,
) -> Result<ProbeResult, ScanError> {
    for entry in classpath.entries() {
        let found = match entry.kind {
            EntryKind::Directory => entry.path.join(resource).is_file(),
            EntryKind::Archive => accessor.mount(&entry.path)?.contains(resource),
        };
        if found {
            let location = entry.resource_location(resource);
            let container = container_identity(&location, resource).map(str::to_string);
            return Ok(ProbeResult {
                resource: resource.to_string(),
                location: Some(location),
                container,
            });
        }
    }
    Ok(ProbeResult::absent(resource))
}

/// Strip the resource suffix and any `!` container marker from a resolved location.
///
/// `/out/app.jar!/META-INF/x/file.json` with resource `META-INF/x/file.json` gives
/// `/out/app.jar`; `/out/classes/META-INF/x/file.json` gives `/out/classes`.
pub fn container_identity<'a>(location: &'a str, resource: &str) -> Option<&'a str> {
    let prefix = location.strip_suffix(resource)?;
    let prefix = prefix
        .strip_suffix('/')
        .or_else(|| prefix.strip_suffix('\\'))
        .unwrap_or(prefix);
    Some(prefix.strip_suffix('!').unwrap_or(prefix))
}

/// Compare the containers of both probes.
pub fn classify<A: ArchiveAccessor>(
    classpath: &Classpath,
    accessor: &A,
    probes: &[String; 2],
) -> Result<FlatteningReport, ScanError> {
    let first = locate(classpath, accessor, &probes[0])?;
    let second = locate(classpath, accessor, &probes[1])?;

    let (verdict, diagnostic) = match (&first.container, &second.container) {
        (Some(a), Some(b)) if a == b => (Flattening::Flattened, None),
        (Some(_), Some(_)) => (Flattening::Modular, None),
        _ => {
            let missing: Vec<&str> = [&first, &second]
                .into_iter()
                .filter(|p| !p.is_resolved())
                .map(|p| p.resource.as_str())
                .collect();
            let diagnostic = format!(
                "probe resource not found on the classpath: {}",
                missing.join(", ")
            );
            log::warn!("{diagnostic}");
            (Flattening::Indeterminate, Some(diagnostic))
        }
    };

    Ok(FlatteningReport {
        verdict,
        probes: vec![first, second],
        diagnostic,
    })
}
