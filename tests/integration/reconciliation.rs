use mactrans::config::defaults::default_document;
use mactrans::config::{ConfigStore, Document};
use proptest::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::integration::support::{as_document, config_path, write_config};

/// Every droppable default entry: `(section, None)` for a whole section,
/// `(section, Some(key))` for a second-level key.
fn default_entries() -> Vec<(String, Option<String>)> {
    let mut entries = Vec::new();
    for (section, value) in default_document() {
        if let Value::Object(keys) = &value {
            for key in keys.keys() {
                entries.push((section.clone(), Some(key.clone())));
            }
        }
        entries.push((section, None));
    }
    entries
}

fn drop_entries(document: &mut Document, mask: &[bool]) {
    for ((section, key), drop) in default_entries().into_iter().zip(mask) {
        if !drop {
            continue;
        }
        match key {
            Some(key) => {
                if let Some(Value::Object(keys)) = document.get_mut(&section) {
                    keys.shift_remove(&key);
                }
            }
            None => {
                document.shift_remove(&section);
            }
        }
    }
}

proptest! {
    #[test]
    fn load_completes_any_partial_document(
        mask in proptest::collection::vec(any::<bool>(), default_entries().len()),
        microphone in "[A-Za-z0-9 ]{1,24}",
    ) {
        let temp_dir = TempDir::new().unwrap();
        let path = config_path(&temp_dir);

        let mut stored = default_document();
        stored["audio"]["microphone"] = json!(microphone.clone());
        stored["whisper"]["language"] = json!("de");
        drop_entries(&mut stored, &mask);
        write_config(&path, &Value::Object(stored.clone()));

        let store = ConfigStore::load(&path);
        let loaded = store.document();
        let defaults = default_document();

        for (section, default_value) in &defaults {
            let value = loaded.get(section);
            prop_assert!(value.is_some(), "missing section {}", section);
            if let Value::Object(default_keys) = default_value {
                for (key, default_key_value) in default_keys {
                    let found = loaded[section].get(key);
                    prop_assert!(found.is_some(), "missing {}.{}", section, key);
                    let stored_value = stored.get(section).and_then(|s| s.get(key));
                    let expected = stored_value.unwrap_or(default_key_value);
                    prop_assert_eq!(found.unwrap(), expected);
                }
            }
        }
        prop_assert!(store.issues().is_empty());
    }
}

#[test]
fn old_document_gains_new_fields_and_keeps_customizations() {
    let temp_dir = TempDir::new().unwrap();
    let path = config_path(&temp_dir);
    write_config(
        &path,
        &json!({
            "audio": {"microphone": "Studio", "auto_save": false},
            "ai": {"provider": "claude", "claude_key": "sk-ant"},
            "templates": {
                "custom": {"name": "Mine", "prompt": "{audiotranscript}"}
            }
        }),
    );

    let store = ConfigStore::load(&path);

    assert_eq!(store.get("audio.microphone", Value::Null), json!("Studio"));
    assert_eq!(store.get("audio.auto_save", Value::Null), json!(false));
    assert_eq!(store.get("audio.auto_send", Value::Null), json!(false));
    assert_eq!(store.get("ai.provider", Value::Null), json!("claude"));
    assert_eq!(store.get("ai.max_tokens", Value::Null), json!(1000));
    assert_eq!(store.get("format.transcription", Value::Null), json!("txt"));
    assert!(store.get("system_prompt", Value::Null).is_string());

    // Template entries are not completed field by field.
    assert_eq!(
        store.get("templates", Value::Null),
        json!({"custom": {"name": "Mine", "prompt": "{audiotranscript}"}})
    );
    assert_eq!(
        store.get("templates.custom.description", json!("none")),
        json!("none")
    );
}

#[test]
fn document_without_templates_gets_empty_section() {
    let temp_dir = TempDir::new().unwrap();
    let path = config_path(&temp_dir);
    let mut stored = default_document();
    stored.shift_remove("templates");
    write_config(&path, &Value::Object(stored));

    let store = ConfigStore::load(&path);

    assert_eq!(store.get("templates", Value::Null), json!({}));
}

#[test]
fn new_fields_are_appended_after_existing_ones() {
    let temp_dir = TempDir::new().unwrap();
    let path = config_path(&temp_dir);
    write_config(&path, &json!({"ui": {"theme": "dark"}}));

    let store = ConfigStore::load(&path);

    let ui = as_document(store.get("ui", Value::Null));
    let keys: Vec<&str> = ui.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["theme", "transcript_font_size", "chat_mode_default"]);
    let sections: Vec<&str> = store.document().keys().map(String::as_str).collect();
    assert_eq!(sections[0], "ui");
}
