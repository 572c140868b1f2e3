//! Minimal JAR manifest reader: main-section attributes only.
//!
//! Format rules honored here:
//! - `Name: value` headers, names are case-insensitive
//! - a line starting with a single space continues the previous value
//! - the main section ends at the first blank line
//! - LF, CRLF and bare CR line endings

use metascan_types::ids::CLASS_PATH_ATTRIBUTE;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestError {
    /// 1-based line number, 0 when the whole document is unreadable.
    pub line: usize,
    pub reason: String,
}

impl ManifestError {
    fn at(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    main: Vec<(String, String)>,
}

impl Manifest {
    pub fn parse(bytes: &[u8]) -> Result<Self, ManifestError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|err| ManifestError::at(0, format!("not valid UTF-8: {err}")))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        let mut main: Vec<(String, String)> = Vec::new();
        for (idx, line) in text.split('\n').enumerate() {
            let line_no = idx + 1;
            if line.is_empty() {
                break;
            }
            if let Some(rest) = line.strip_prefix(' ') {
                let (_, value) = main
                    .last_mut()
                    .ok_or_else(|| ManifestError::at(line_no, "continuation line without a header"))?;
                value.push_str(rest);
                continue;
            }

            let (name, value) = line
                .split_once(": ")
                .ok_or_else(|| ManifestError::at(line_no, "expected 'Name: value'"))?;
            if !is_valid_name(name) {
                return Err(ManifestError::at(
                    line_no,
                    format!("invalid attribute name {name:?}"),
                ));
            }
            main.push((name.to_string(), value.to_string()));
        }

        Ok(Self { main })
    }

    /// Look up a main-section attribute. Later duplicates win.
    pub fn main_attribute(&self, name: &str) -> Option<&str> {
        self.main
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whitespace-separated `Class-Path` tokens, in declaration order.
    pub fn class_path(&self) -> Vec<String> {
        self.main_attribute(CLASS_PATH_ATTRIBUTE)
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
