//! Error types.
//!
//! The configuration store absorbs storage failures by contract, so these
//! types only surface from the explicitly fallible helpers (`try_save`,
//! typed section views, directory provisioning, prompt rendering, the CLI).

use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the configuration file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config {path} does not hold a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by the library API outside the store's absorbing contract.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Section {section} is malformed: {source}")]
    InvalidSection {
        section: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
