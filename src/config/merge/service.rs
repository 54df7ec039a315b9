//! MergeService: fills a loaded document with missing default keys.
//!
//! Reconciliation is one level deep. Missing top-level sections are inserted
//! whole; inside a section whose default is a mapping, missing sub-keys are
//! inserted. Anything deeper (individual `templates` entries, for instance) is
//! left exactly as stored.

use crate::config::document::Document;
use serde_json::Value;

/// What reconciliation changed, for logging.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Top-level sections inserted from defaults.
    pub inserted_sections: Vec<String>,
    /// `section.key` paths inserted from defaults.
    pub inserted_keys: Vec<String>,
    /// Sections whose stored value was not a mapping and were reset.
    pub reset_sections: Vec<String>,
}

impl MergeReport {
    pub fn is_empty(&self) -> bool {
        self.inserted_sections.is_empty()
            && self.inserted_keys.is_empty()
            && self.reset_sections.is_empty()
    }
}

/// Merge service for default completion.
pub struct MergeService;

impl MergeService {
    /// Insert every default key missing from `document`, preserving existing
    /// values. Returns what was added.
    pub fn reconcile(document: &mut Document, defaults: &Document) -> MergeReport {
        let mut report = MergeReport::default();

        for (section, default_value) in defaults {
            let Some(stored) = document.get_mut(section) else {
                document.insert(section.clone(), default_value.clone());
                report.inserted_sections.push(section.clone());
                continue;
            };

            let Value::Object(default_keys) = default_value else {
                continue;
            };

            match stored {
                Value::Object(stored_keys) => {
                    for (key, value) in default_keys {
                        if !stored_keys.contains_key(key) {
                            stored_keys.insert(key.clone(), value.clone());
                            report.inserted_keys.push(format!("{}.{}", section, key));
                        }
                    }
                }
                other => {
                    *other = default_value.clone();
                    report.reset_sections.push(section.clone());
                }
            }
        }

        report
    }
}
