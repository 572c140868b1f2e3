//! Shared test utilities for the metascan workspace.
//!
//! Fixture builders write real archives and directory trees, so tests exercise the same
//! code paths a packaged application would. Helpers panic on failure; they are for tests.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Builds a zip archive laid out like a JAR.
#[derive(Clone, Debug, Default)]
pub struct JarBuilder {
    manifest: Option<String>,
    entries: Vec<(String, Option<Vec<u8>>)>,
}

impl JarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a manifest whose main section declares `Class-Path: <value>`.
    pub fn class_path(mut self, value: &str) -> Self {
        self.manifest = Some(format!(
            "Manifest-Version: 1.0\r\nClass-Path: {value}\r\n\r\n"
        ));
        self
    }

    /// Write `text` verbatim as `META-INF/MANIFEST.MF`.
    pub fn raw_manifest(mut self, text: &str) -> Self {
        self.manifest = Some(text.to_string());
        self
    }

    /// Add a directory entry; `name` should end with `/`.
    pub fn dir(mut self, name: &str) -> Self {
        self.entries.push((name.to_string(), None));
        self
    }

    pub fn file(mut self, name: &str, contents: &str) -> Self {
        self.entries
            .push((name.to_string(), Some(contents.as_bytes().to_vec())));
        self
    }

    pub fn write(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        let file = File::create(path).expect("create archive");
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        if let Some(manifest) = &self.manifest {
            zip.add_directory("META-INF/", options)
                .expect("add META-INF");
            zip.start_file("META-INF/MANIFEST.MF", options)
                .expect("start manifest");
            zip.write_all(manifest.as_bytes()).expect("write manifest");
        }
        for (name, contents) in &self.entries {
            match contents {
                None => {
                    if self.manifest.is_some() && name == "META-INF/" {
                        continue;
                    }
                    zip.add_directory(name.as_str(), options)
                        .expect("add directory");
                }
                Some(bytes) => {
                    zip.start_file(name.as_str(), options).expect("start file");
                    zip.write_all(bytes).expect("write file");
                }
            }
        }
        zip.finish().expect("finish archive");
    }
}

/// Write a file, creating parent directories.
pub fn write_file(path: impl AsRef<Path>, contents: &str) {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

/// Convert a temp-dir path to UTF-8.
pub fn utf8_path(path: &Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).expect("utf8 path")
}

/// Normalize non-deterministic report fields for golden comparison.
///
/// - root-only: `tool.version` becomes `"__VERSION__"` when the root looks like a report
///   (has `schema`, `tool`, `classpath`, `resources`, `flattening`)
/// - recursive: every string starting with `root` has that prefix replaced by `<ROOT>`
///   and backslashes turned into `/`
pub fn normalize_report(mut value: Value, root: &Utf8Path) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_report = ["schema", "tool", "classpath", "resources", "flattening"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_report
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    replace_root_recursive(&mut value, root.as_str());
    value
}

fn replace_root_recursive(value: &mut Value, root: &str) {
    match value {
        Value::String(s) => {
            if let Some(rest) = s.strip_prefix(root) {
                *s = format!("<ROOT>{}", rest.replace('\\', "/"));
            }
        }
        Value::Object(map) => {
            for val in map.values_mut() {
                replace_root_recursive(val, root);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                replace_root_recursive(val, root);
            }
        }
        _ => {}
    }
}
