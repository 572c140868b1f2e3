use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Raw path input that cannot be turned into an [`EntryPath`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("empty path")]
    Empty,
    #[error("path contains a NUL byte: {raw:?}")]
    ContainsNul { raw: String },
    #[error("cannot resolve {raw:?} against relative base {base}")]
    RelativeBase { raw: String, base: Utf8PathBuf },
}

/// Canonical identity of a classpath location.
///
/// Normalization is lexical and deterministic:
/// - always absolute (relative input is joined onto a caller-supplied base)
/// - no `.` components, `..` folded into its parent (and clamped at the root)
/// - the platform's native separator throughout
///
/// Symlinks are not resolved, so two links to the same file stay distinct identities.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryPath(Utf8PathBuf);

impl EntryPath {
    /// Normalize `raw`, resolving it against `base` when it is relative.
    pub fn normalize(raw: &str, base: &Utf8Path) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        if raw.contains('\0') {
            return Err(PathError::ContainsNul {
                raw: raw.to_string(),
            });
        }

        let candidate = Utf8Path::new(raw);
        let joined = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else if base.is_absolute() {
            base.join(candidate)
        } else {
            return Err(PathError::RelativeBase {
                raw: raw.to_string(),
                base: base.to_path_buf(),
            });
        };

        Ok(Self(lexical_normalize(&joined)))
    }

    /// Resolve a reference token relative to this path's parent directory.
    ///
    /// This is how an archive's manifest references are anchored: `../libs/x.jar`
    /// declared by `/proj/app/a.jar` lands on `/proj/libs/x.jar`.
    pub fn resolve_sibling(&self, token: &str) -> Result<EntryPath, PathError> {
        let parent = self.0.parent().unwrap_or(&self.0);
        Self::normalize(token, parent)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }

    pub fn join(&self, relative: &str) -> Utf8PathBuf {
        self.0.join(relative)
    }
}

impl AsRef<Utf8Path> for EntryPath {
    fn as_ref(&self) -> &Utf8Path {
        &self.0
    }
}

impl AsRef<Path> for EntryPath {
    fn as_ref(&self) -> &Path {
        self.0.as_std_path()
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

fn lexical_normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => out.push(component.as_str()),
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                // `pop` refuses to remove the root, which clamps `/..` to `/`.
                out.pop();
            }
            Utf8Component::Normal(segment) => out.push(segment),
        }
    }
    out
}
