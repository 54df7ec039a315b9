//! Typed views over the fixed configuration sections.
//!
//! The document stays an untyped tree; these structs are read from it on
//! demand (`ConfigStore::section`) so callers that want compile-time field
//! names and enums do not have to walk `serde_json::Value`s. Every field
//! falls back to its default when absent.

use crate::config::document::Document;
use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A fixed top-level section with a typed view.
pub trait Section: DeserializeOwned + Default {
    /// Top-level key of the section.
    const NAME: &'static str;

    /// Read the section out of `document`. A missing section yields the
    /// default view.
    fn from_document(document: &Document) -> Result<Self, ApiError> {
        match document.get(Self::NAME) {
            None => Ok(Self::default()),
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|source| ApiError::InvalidSection {
                    section: Self::NAME.to_string(),
                    source,
                })
            }
        }
    }
}

/// Audio input settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Selected microphone device name.
    pub microphone: String,
    /// Selected system-audio capture device name.
    pub system_audio: String,
    pub auto_save: bool,
    /// Directory transcripts are written to; empty means the default.
    pub save_path: String,
    /// Forward finished transcripts to the assistant automatically.
    pub auto_send: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            microphone: String::new(),
            system_audio: String::new(),
            auto_save: true,
            save_path: String::new(),
            auto_send: false,
        }
    }
}

impl Section for AudioSettings {
    const NAME: &'static str = "audio";
}

/// Speech recognition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhisperSettings {
    /// Model size: tiny, base, small, medium, large.
    pub model: String,
    pub language: String,
    pub temperature: f64,
}

/// Whisper model sizes the application knows how to fetch.
pub const WHISPER_MODELS: [&str; 5] = ["tiny", "base", "small", "medium", "large"];

impl Default for WhisperSettings {
    fn default() -> Self {
        Self {
            model: "base".to_string(),
            language: "ru".to_string(),
            temperature: 0.0,
        }
    }
}

impl Section for WhisperSettings {
    const NAME: &'static str = "whisper";
}

/// Assistant backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    Claude,
    Local,
}

impl AiProvider {
    pub const ALL: [&'static str; 3] = ["openai", "claude", "local"];
}

/// Assistant settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub provider: AiProvider,
    pub openai_key: String,
    pub claude_key: String,
    /// Model identifier; empty means the provider default.
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: AiProvider::OpenAi,
            openai_key: String::new(),
            claude_key: String::new(),
            model: String::new(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

impl Section for AiSettings {
    const NAME: &'static str = "ai";
}

/// Locally installed models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalModelsSettings {
    pub installed: Vec<String>,
    pub path: String,
}

impl Section for LocalModelsSettings {
    const NAME: &'static str = "local_models";
}

/// Interface theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [&'static str; 3] = ["system", "light", "dark"];
}

/// Interface settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub theme: Theme,
    pub transcript_font_size: String,
    /// Open the chat in transcript mode by default.
    pub chat_mode_default: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            transcript_font_size: "medium".to_string(),
            chat_mode_default: true,
        }
    }
}

impl Section for UiSettings {
    const NAME: &'static str = "ui";
}

/// Transcript file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptFormat {
    #[default]
    Txt,
    Srt,
    Json,
}

impl TranscriptFormat {
    pub const ALL: [&'static str; 3] = ["txt", "srt", "json"];
}

/// Transcript export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    pub transcription: TranscriptFormat,
    pub include_timestamps: bool,
    /// Tag lines with their source (MIC/SPEAKER).
    pub include_sources: bool,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            transcription: TranscriptFormat::Txt,
            include_timestamps: true,
            include_sources: true,
        }
    }
}

impl Section for FormatSettings {
    const NAME: &'static str = "format";
}

/// A prompt template stored under `templates.<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub prompt: String,
}

/// Templates in document order. Entries that are not well-formed templates
/// are skipped with a warning; validation reports them in detail.
pub fn templates(document: &Document) -> Vec<(String, Template)> {
    let Some(Value::Object(entries)) = document.get(crate::config::defaults::TEMPLATES_SECTION)
    else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|(id, value)| match serde_json::from_value::<Template>(value.clone()) {
            Ok(template) => Some((id.clone(), template)),
            Err(e) => {
                tracing::warn!(template = %id, error = %e, "Skipping malformed template");
                None
            }
        })
        .collect()
}

/// Serialize a typed section back into a document value.
pub fn to_value<S: Section + Serialize>(section: &S) -> Value {
    serde_json::to_value(section).unwrap_or_else(|_| Value::Object(Map::new()))
}
