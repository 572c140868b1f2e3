//! Archive access: signature sniffing, mounting, and manifest cross-references.
//!
//! The engine only talks to [`ArchiveAccessor`] and [`ArchiveHandle`], so another container
//! format can be plugged in without touching expansion or walking. [`ZipAccessor`] is the
//! production implementation.

use crate::error::ScanError;
use crate::manifest::Manifest;
use camino::Utf8Path;
use metascan_types::EntryPath;
use metascan_types::ids::{ARCHIVE_SIGNATURE, MANIFEST_PATH};
use std::fs::File;
use std::io::{self, BufReader, Read};
use zip::ZipArchive;
use zip::result::ZipError;

/// Opens archives found on the classpath.
pub trait ArchiveAccessor {
    type Handle: ArchiveHandle;

    /// Content-based detection: the file name is never consulted.
    fn is_archive(&self, path: &Utf8Path) -> Result<bool, ScanError>;

    /// Mount the archive. The handle releases the file when dropped.
    fn mount(&self, path: &EntryPath) -> Result<Self::Handle, ScanError>;
}

/// A mounted archive viewed as a file tree.
pub trait ArchiveHandle {
    /// Every file (not directory) in the archive, as root-relative `/`-separated paths.
    fn files(&self) -> Vec<String>;

    /// Whether `resource` (root-relative) names a file in the archive.
    fn contains(&self, resource: &str) -> bool;

    /// Raw cross-reference tokens declared by the archive's manifest.
    ///
    /// An archive without a manifest, or without the attribute, has none.
    fn cross_references(&mut self) -> Result<Vec<String>, ScanError>;
}

/// Read the first two bytes of `path` and compare them to the zip signature.
pub fn has_archive_signature(path: &Utf8Path) -> Result<bool, ScanError> {
    let io_err = |source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == ARCHIVE_SIGNATURE),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => Err(io_err(err)),
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ZipAccessor;

impl ArchiveAccessor for ZipAccessor {
    type Handle = ZipHandle;

    fn is_archive(&self, path: &Utf8Path) -> Result<bool, ScanError> {
        has_archive_signature(path)
    }

    fn mount(&self, path: &EntryPath) -> Result<ZipHandle, ScanError> {
        let open_err = |source| ScanError::ArchiveOpen {
            path: path.as_path().to_path_buf(),
            source,
        };
        let file = File::open(path.as_path()).map_err(open_err)?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|e| open_err(e.into()))?;
        Ok(ZipHandle {
            path: path.clone(),
            archive,
        })
    }
}

pub struct ZipHandle {
    path: EntryPath,
    archive: ZipArchive<BufReader<File>>,
}

impl ArchiveHandle for ZipHandle {
    fn files(&self) -> Vec<String> {
        self.archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(|name| name.trim_start_matches('/').to_string())
            .collect()
    }

    fn contains(&self, resource: &str) -> bool {
        !resource.ends_with('/') && self.archive.index_for_name(resource).is_some()
    }

    fn cross_references(&mut self) -> Result<Vec<String>, ScanError> {
        let mut entry = match self.archive.by_name(MANIFEST_PATH) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(Vec::new()),
            Err(err) => {
                return Err(ScanError::ArchiveOpen {
                    path: self.path.as_path().to_path_buf(),
                    source: err.into(),
                });
            }
        };

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|source| ScanError::Io {
                path: self.path.join(MANIFEST_PATH),
                source,
            })?;

        let manifest = Manifest::parse(&bytes).map_err(|err| ScanError::ManifestParse {
            path: self.path.join(MANIFEST_PATH),
            line: err.line,
            reason: err.reason,
        })?;
        Ok(manifest.class_path())
    }
}
