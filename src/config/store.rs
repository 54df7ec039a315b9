//! ConfigStore: the application's single settings document.
//!
//! The store is "always usable": loading and saving never return an error to
//! the caller. Unreadable or corrupt files fall back to a freshly synthesized
//! default document; failed writes leave the in-memory document as the source
//! of truth. Every absorbed failure is logged through `tracing` and recorded
//! as a [`StorageIssue`] so it stays observable.
//!
//! Single-threaded by design: one owner, no locking, and each `set` rewrites
//! the whole file synchronously.

use crate::config::defaults::{default_document, first_run_document};
use crate::config::document::{assign, lookup, DottedKey, Document};
use crate::config::merge::MergeService;
use crate::config::sections::Section;
use crate::config::validation::{validate_document, ValidationResult};
use crate::error::{ApiError, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Which side of storage an absorbed failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The file existed but could not be read or parsed.
    Unreadable,
    /// The serialized document could not be written.
    Unwritable,
}

/// A storage failure the store absorbed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageIssue {
    pub kind: IssueKind,
    pub path: PathBuf,
    pub message: String,
}

/// Narrow read/write access to settings, taken by collaborators instead of
/// the concrete store.
pub trait SettingsAccess {
    /// Value at `key`, or `default` when any segment is missing.
    fn get(&self, key: &str, default: Value) -> Value;

    /// Write `value` at `key` and persist.
    fn set(&mut self, key: &str, value: Value);
}

/// Configuration store bound to one file.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    document: Document,
    issues: Vec<StorageIssue>,
}

impl ConfigStore {
    /// Load the document at `path`.
    ///
    /// A missing file or an unreadable one yields a synthesized default
    /// document, written back immediately. A readable file is completed with
    /// any default keys it lacks and then validated; reconciliation alone does
    /// not write to storage.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            document: Document::new(),
            issues: Vec::new(),
        };

        if !store.path.exists() {
            info!(path = %store.path.display(), "No configuration found, creating defaults");
            store.synthesize_defaults();
            return store;
        }

        match read_document(&store.path) {
            Ok(mut document) => {
                let report = MergeService::reconcile(&mut document, &default_document());
                if !report.is_empty() {
                    debug!(
                        path = %store.path.display(),
                        inserted_sections = ?report.inserted_sections,
                        inserted_keys = ?report.inserted_keys,
                        "Completed configuration with defaults"
                    );
                }
                for section in &report.reset_sections {
                    warn!(
                        path = %store.path.display(),
                        section = %section,
                        "Section was not a mapping, reset to defaults"
                    );
                }
                store.document = document;
                store.log_validation();
            }
            Err(e) => {
                error!(
                    path = %store.path.display(),
                    error = %e,
                    "Failed to load configuration, falling back to defaults"
                );
                store.record(IssueKind::Unreadable, &e);
                store.synthesize_defaults();
            }
        }

        store
    }

    /// Replace the document with the defaults plus the built-in templates and
    /// persist it.
    pub fn synthesize_defaults(&mut self) -> &Document {
        self.save(Some(first_run_document()));
        &self.document
    }

    /// Optionally replace the in-memory document, then write it out.
    ///
    /// Returns whether the write succeeded. A failure is logged and recorded;
    /// the in-memory document is kept either way.
    pub fn save(&mut self, document: Option<Document>) -> bool {
        if let Some(document) = document {
            self.document = document;
        }
        match self.try_save() {
            Ok(()) => true,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Failed to save configuration");
                self.record(IssueKind::Unwritable, &e);
                false
            }
        }
    }

    /// Write the document, returning the failure instead of absorbing it.
    pub fn try_save(&self) -> Result<(), StoreError> {
        let text = serialize_document(&self.document)?;
        std::fs::write(&self.path, text).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Borrow the value at a bare or dotted `key`.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        lookup(&self.document, &DottedKey::parse(key))
    }

    /// Value at `key`, or `default` if any segment is absent.
    pub fn get(&self, key: &str, default: Value) -> Value {
        self.lookup(key).cloned().unwrap_or(default)
    }

    /// Value at `key` deserialized as `T`; `None` when absent or mistyped.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.lookup(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Write `value` at `key`, creating intermediate mappings, then save the
    /// whole document.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let report = assign(&mut self.document, &DottedKey::parse(key), value.into());
        for path in &report.created {
            debug!(key = %key, created = %path, "Created intermediate mapping");
        }
        for path in &report.replaced {
            warn!(key = %key, replaced = %path, "Replaced non-mapping value on the way to key");
        }
        self.save(None);
    }

    /// Typed view of a fixed section.
    pub fn section<S: Section>(&self) -> Result<S, ApiError> {
        S::from_document(&self.document)
    }

    /// Replace a whole section with a typed value and save.
    pub fn set_section<S: Section + Serialize>(&mut self, section: &S) {
        self.set(S::NAME, crate::config::sections::to_value(section));
    }

    /// Run the schema validation pass over the current document.
    pub fn validate(&self) -> ValidationResult {
        validate_document(&self.document)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Storage failures absorbed since the store was constructed.
    pub fn issues(&self) -> &[StorageIssue] {
        &self.issues
    }

    fn record(&mut self, kind: IssueKind, error: &StoreError) {
        self.issues.push(StorageIssue {
            kind,
            path: self.path.clone(),
            message: error.to_string(),
        });
    }

    fn log_validation(&self) {
        let result = self.validate();
        for message in &result.errors {
            warn!(path = %self.path.display(), problem = %message, "Invalid configuration value");
        }
        for message in &result.warnings {
            warn!(path = %self.path.display(), problem = %message, "Questionable configuration value");
        }
    }
}

impl SettingsAccess for ConfigStore {
    fn get(&self, key: &str, default: Value) -> Value {
        ConfigStore::get(self, key, default)
    }

    fn set(&mut self, key: &str, value: Value) {
        ConfigStore::set(self, key, value)
    }
}

fn read_document(path: &Path) -> Result<Document, StoreError> {
    let text = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(document) => Ok(document),
        _ => Err(StoreError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Pretty JSON with 2-space indentation and literal non-ASCII text.
pub fn serialize_document(document: &Document) -> Result<String, StoreError> {
    serde_json::to_string_pretty(document).map_err(StoreError::Serialize)
}
