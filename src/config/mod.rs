//! Configuration
//!
//! The settings document, its defaults, default completion on load, dotted-key
//! access, typed section views, and the directories the application uses.

pub mod defaults;
pub mod document;
pub mod merge;
pub mod paths;
pub mod sections;
pub mod sources;
pub mod store;
pub mod validation;

pub use document::{DottedKey, Document};
pub use paths::AppDirectories;
pub use sections::{
    AiProvider, AiSettings, AudioSettings, FormatSettings, LocalModelsSettings, Section, Template,
    Theme, TranscriptFormat, UiSettings, WhisperSettings,
};
pub use store::{ConfigStore, IssueKind, SettingsAccess, StorageIssue};
pub use validation::{validate_document, ValidationResult};

use crate::error::ApiError;
use std::path::PathBuf;

/// Resolve the settings file path with precedence: CLI, MACTRANS_CONFIG env,
/// platform default.
///
/// Only the platform default provisions directories; an explicit path is used
/// as given.
pub fn resolve_config_path(cli_path: Option<PathBuf>) -> Result<PathBuf, ApiError> {
    if let Some(p) = cli_path {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    if let Some(p) = sources::environment::config_path_override() {
        return Ok(p);
    }
    let dirs = AppDirectories::resolve()?;
    dirs.provision()?;
    Ok(dirs.config_file())
}
