//! Application directory layout and provisioning.
//!
//! The settings file lives in the application-support directory; transcripts
//! and chats are user-facing and live under the documents directory.

use crate::error::ApiError;
use std::path::{Path, PathBuf};

/// Application name used for directory names.
pub const APP_NAME: &str = "MacTrans";

/// File name of the settings document inside the application-support directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// The directories the application works in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirectories {
    /// Holds `config.json`.
    pub app_support: PathBuf,
    pub docs: PathBuf,
    pub transcripts: PathBuf,
    pub chats: PathBuf,
}

impl AppDirectories {
    /// Resolve the platform locations.
    ///
    /// Application support is the project config directory
    /// (`~/Library/Application Support/MacTrans` on macOS, `$XDG_CONFIG_HOME/mactrans`
    /// on Linux). Documents is `<user documents>/MacTrans`, falling back to
    /// `$HOME/Documents/MacTrans` when the platform has no documents directory.
    pub fn resolve() -> Result<Self, ApiError> {
        let project_dirs = directories::ProjectDirs::from("", "", APP_NAME).ok_or_else(|| {
            ApiError::ConfigError(
                "Could not determine platform application directory (HOME not set)".to_string(),
            )
        })?;
        let app_support = project_dirs.config_dir().to_path_buf();

        let user_dirs = directories::UserDirs::new().ok_or_else(|| {
            ApiError::ConfigError("Could not determine user home directory".to_string())
        })?;
        let documents = user_dirs
            .document_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| user_dirs.home_dir().join("Documents"));

        Ok(Self::with_roots(app_support, documents.join(APP_NAME)))
    }

    /// Lay the directories out under `root`: `root/app_support` and `root/docs`.
    pub fn under(root: &Path) -> Self {
        Self::with_roots(root.join("app_support"), root.join("docs"))
    }

    fn with_roots(app_support: PathBuf, docs: PathBuf) -> Self {
        let transcripts = docs.join("Transcripts");
        let chats = docs.join("Chats");
        Self {
            app_support,
            docs,
            transcripts,
            chats,
        }
    }

    /// Create every directory that does not exist yet.
    pub fn provision(&self) -> Result<(), ApiError> {
        for dir in self.all() {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    ApiError::ConfigError(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
                tracing::debug!(path = %dir.display(), "Created application directory");
            }
        }
        Ok(())
    }

    /// Point application support at the directory holding `config_file`,
    /// for a settings file given explicitly instead of the platform default.
    pub fn holding_config(mut self, config_file: &Path) -> Self {
        self.app_support = match config_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        self
    }

    /// Location of the settings document.
    pub fn config_file(&self) -> PathBuf {
        self.app_support.join(CONFIG_FILE_NAME)
    }

    pub fn all(&self) -> [&Path; 4] {
        [
            self.app_support.as_path(),
            self.docs.as_path(),
            self.transcripts.as_path(),
            self.chats.as_path(),
        ]
    }
}
