//! Prompt rendering for summary templates and the chat system prompt.

use crate::config::defaults::{
    HISTORY_PLACEHOLDER, SYSTEM_PROMPT_SECTION, TEMPLATES_SECTION, TRANSCRIPT_PLACEHOLDER,
    USER_MESSAGE_PLACEHOLDER,
};
use crate::config::SettingsAccess;
use crate::error::ApiError;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Values substituted into a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptContext {
    /// Replaces `{audiotranscript}`.
    pub transcript: String,
    /// Replaces `{usermessage}`.
    pub user_message: String,
    /// Replaces `{messagestory}`.
    pub message_history: String,
}

impl PromptContext {
    pub fn with_transcript(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            ..Self::default()
        }
    }
}

/// Substitute the known placeholders in a single pass over `text`. Other
/// braces are left as written, and substituted values are never rescanned.
pub fn render(text: &str, context: &PromptContext) -> String {
    let substitutions = [
        (TRANSCRIPT_PLACEHOLDER, context.transcript.as_str()),
        (USER_MESSAGE_PLACEHOLDER, context.user_message.as_str()),
        (HISTORY_PLACEHOLDER, context.message_history.as_str()),
    ];

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match substitutions
            .iter()
            .find(|(placeholder, _)| tail.starts_with(*placeholder))
        {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render the prompt of `templates.<template_id>`.
pub fn render_template(
    settings: &dyn SettingsAccess,
    template_id: &str,
    context: &PromptContext,
) -> Result<String, ApiError> {
    let key = format!("{}.{}.prompt", TEMPLATES_SECTION, template_id);
    match settings.get(&key, Value::Null) {
        Value::String(prompt) => Ok(render(&prompt, context)),
        Value::Null => Err(ApiError::TemplateNotFound(template_id.to_string())),
        other => Err(ApiError::ConfigError(format!(
            "Template {} prompt must be a string, found {}",
            template_id,
            crate::config::document::kind_name(&other)
        ))),
    }
}

/// Render the configured chat system prompt.
pub fn render_system_prompt(
    settings: &dyn SettingsAccess,
    context: &PromptContext,
) -> Result<String, ApiError> {
    match settings.get(SYSTEM_PROMPT_SECTION, Value::Null) {
        Value::String(prompt) => Ok(render(&prompt, context)),
        _ => Err(ApiError::ConfigError(
            "system_prompt is not set to a string".to_string(),
        )),
    }
}

/// Resolve a transcript file path with support for absolute, tilde, and relative paths
///
/// Path resolution priority:
/// 1. Absolute path
/// 2. Tilde expansion (if starts with `~/`)
/// 3. Relative to current directory (if starts with `./`)
/// 4. Relative to the transcripts directory
pub fn resolve_transcript_path(path: &str, transcripts_dir: &Path) -> Result<PathBuf, ApiError> {
    if Path::new(path).is_absolute() {
        return Ok(PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home =
            std::env::var("HOME").map_err(|_| ApiError::ConfigError("HOME not set".to_string()))?;
        return Ok(PathBuf::from(home).join(rest));
    }
    if let Some(rest) = path.strip_prefix("./") {
        let current_dir = std::env::current_dir().map_err(|e| {
            ApiError::ConfigError(format!("Failed to get current directory: {}", e))
        })?;
        return Ok(current_dir.join(rest));
    }
    Ok(transcripts_dir.join(path))
}

/// Read a transcript, rejecting empty files.
pub fn load_transcript(path: &Path) -> Result<String, ApiError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ApiError::ConfigError(format!(
            "Failed to read transcript {}: {}",
            path.display(),
            e
        ))
    })?;
    if content.trim().is_empty() {
        return Err(ApiError::InvalidArgument(format!(
            "Transcript {} is empty",
            path.display()
        )));
    }
    Ok(content)
}
