use mactrans::config::Document;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path of a settings file that does not exist yet.
pub fn config_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("config.json")
}

/// Write `value` as the stored settings document.
pub fn write_config(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn read_raw(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

pub fn read_document(path: &Path) -> Document {
    match serde_json::from_str(&read_raw(path)).unwrap() {
        Value::Object(map) => map,
        other => panic!("stored config is not an object: {}", other),
    }
}

pub fn as_document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {}", other),
    }
}
