use camino::Utf8PathBuf;
use metascan_types::PathError;
use std::io;

/// Failure while resolving, opening, or walking a classpath entry.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("cannot open archive {path}")]
    ArchiveOpen {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed manifest in {path} (line {line}): {reason}")]
    ManifestParse {
        path: Utf8PathBuf,
        line: usize,
        reason: String,
    },

    #[error("I/O error at {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// One-line description including every source in the chain.
    pub fn describe(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = err.source();
        }
        out
    }
}
