//! Follow an archive's manifest cross-references to more classpath entries.

use crate::archive::ArchiveHandle;
use crate::error::ScanError;
use crate::resolve::VisitedSet;
use metascan_types::EntryPath;

/// Resolve the archive's cross-references, dropping locations already opened.
///
/// Tokens resolve against the directory holding `archive`, never against the working
/// directory. Returns the references in declaration order, each once; nothing is returned
/// unless every token resolves. A reference to an entry that appears later in the path
/// lists is still returned, so it is searched right after `archive`.
pub fn expand_archive<H: ArchiveHandle>(
    archive: &EntryPath,
    handle: &mut H,
    opened: &VisitedSet,
) -> Result<Vec<EntryPath>, ScanError> {
    let resolved = handle
        .cross_references()?
        .iter()
        .filter(|token| !token.is_empty())
        .map(|token| archive.resolve_sibling(token))
        .collect::<Result<Vec<_>, _>>()?;

    let mut discovered: Vec<EntryPath> = Vec::new();
    for path in resolved {
        if opened.contains(&path) || discovered.contains(&path) {
            continue;
        }
        log::debug!("{archive} references {path}");
        discovered.push(path);
    }
    Ok(discovered)
}
