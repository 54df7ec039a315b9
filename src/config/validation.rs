//! Schema validation of a loaded document.
//!
//! Runs once after load (and on demand) and only reports: the document is
//! never altered, so a user's hand-edited value survives even when it is
//! flagged.

use crate::config::defaults::{
    default_document, HISTORY_PLACEHOLDER, SYSTEM_PROMPT_SECTION, TEMPLATES_SECTION,
    TRANSCRIPT_PLACEHOLDER, USER_MESSAGE_PLACEHOLDER,
};
use crate::config::document::{kind_name, Document};
use crate::config::sections::{AiProvider, Theme, TranscriptFormat, WHISPER_MODELS};
use serde::Serialize;
use serde_json::Value;

/// Validation result for a configuration document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub checks: Vec<(String, bool)>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_check(&mut self, description: &str, passed: bool) {
        self.checks.push((description.to_string(), passed));
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_checks(&self) -> usize {
        self.checks.len()
    }

    pub fn passed_checks(&self) -> usize {
        self.checks.iter().filter(|(_, passed)| *passed).count()
    }

    /// Record a check that fails with `error`.
    fn require(&mut self, description: &str, passed: bool, error: impl FnOnce() -> String) {
        self.add_check(description, passed);
        if !passed {
            self.add_error(error());
        }
    }
}

/// Validate `document` against the default schema.
pub fn validate_document(document: &Document) -> ValidationResult {
    let mut result = ValidationResult::new();
    let defaults = default_document();

    for (section, default_value) in &defaults {
        let Some(stored) = document.get(section) else {
            result.require(&format!("section {} present", section), false, || {
                format!("Missing section: {}", section)
            });
            continue;
        };
        result.add_check(&format!("section {} present", section), true);

        let Value::Object(default_keys) = default_value else {
            check_kind(&mut result, section, stored, default_value);
            continue;
        };
        let Value::Object(stored_keys) = stored else {
            result.require(&format!("{} is a mapping", section), false, || {
                format!("{} must be an object, found {}", section, kind_name(stored))
            });
            continue;
        };

        if section == TEMPLATES_SECTION {
            continue;
        }
        for (key, default) in default_keys {
            let path = format!("{}.{}", section, key);
            match stored_keys.get(key) {
                Some(value) => check_kind(&mut result, &path, value, default),
                None => result.require(&format!("{} present", path), false, || {
                    format!("Missing key: {}", path)
                }),
            }
        }
    }

    check_enumerations(&mut result, document);
    check_templates(&mut result, document);
    check_system_prompt(&mut result, document);

    result
}

fn check_kind(result: &mut ValidationResult, path: &str, value: &Value, default: &Value) {
    let expected = kind_name(default);
    let found = kind_name(value);
    result.require(&format!("{} is {}", path, expected), expected == found, || {
        format!("{} must be {}, found {}", path, expected, found)
    });
}

fn check_enumerations(result: &mut ValidationResult, document: &Document) {
    let enums: [(&str, &str, &[&str]); 3] = [
        ("ui", "theme", &Theme::ALL),
        ("format", "transcription", &TranscriptFormat::ALL),
        ("ai", "provider", &AiProvider::ALL),
    ];
    for (section, key, allowed) in enums {
        let Some(Value::String(value)) = document.get(section).and_then(|s| s.get(key)) else {
            continue;
        };
        let path = format!("{}.{}", section, key);
        result.require(
            &format!("{} is one of {}", path, allowed.join("/")),
            allowed.contains(&value.as_str()),
            || format!("{} must be one of {}, found {:?}", path, allowed.join(", "), value),
        );
    }

    if let Some(Value::String(model)) = document.get("whisper").and_then(|s| s.get("model")) {
        if !WHISPER_MODELS.contains(&model.as_str()) {
            result.add_warning(format!("whisper.model {:?} is not a known model size", model));
        }
    }

    if let Some(tokens) = document.get("ai").and_then(|s| s.get("max_tokens")) {
        result.require("ai.max_tokens is a non-negative integer", tokens.is_u64(), || {
            format!("ai.max_tokens must be a non-negative integer, found {}", tokens)
        });
    }

    if let Some(Value::Array(installed)) =
        document.get("local_models").and_then(|s| s.get("installed"))
    {
        result.require(
            "local_models.installed holds strings",
            installed.iter().all(Value::is_string),
            || "local_models.installed must only hold strings".to_string(),
        );
    }
}

fn check_templates(result: &mut ValidationResult, document: &Document) {
    let Some(Value::Object(entries)) = document.get(TEMPLATES_SECTION) else {
        return;
    };
    for (id, entry) in entries {
        let well_formed = ["name", "description", "prompt"]
            .iter()
            .all(|field| entry.get(field).map_or(false, Value::is_string));
        result.require(&format!("template {} well-formed", id), well_formed, || {
            format!("Template {} needs string name, description and prompt", id)
        });
        if let Some(Value::String(prompt)) = entry.get("prompt") {
            if !prompt.contains(TRANSCRIPT_PLACEHOLDER) {
                result.add_warning(format!(
                    "Template {} has no {} placeholder",
                    id, TRANSCRIPT_PLACEHOLDER
                ));
            }
        }
    }
}

fn check_system_prompt(result: &mut ValidationResult, document: &Document) {
    let Some(Value::String(prompt)) = document.get(SYSTEM_PROMPT_SECTION) else {
        return;
    };
    for placeholder in [
        HISTORY_PLACEHOLDER,
        USER_MESSAGE_PLACEHOLDER,
        TRANSCRIPT_PLACEHOLDER,
    ] {
        if !prompt.contains(placeholder) {
            result.add_warning(format!("system_prompt has no {} placeholder", placeholder));
        }
    }
}
