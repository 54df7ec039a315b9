//! MacTrans: settings store for a meeting transcription assistant
//!
//! A JSON-backed settings document with compiled-in defaults, default
//! completion on load, dotted-key access, and synchronous persistence, plus
//! the application directory layout and prompt-template rendering built on
//! top of it.

pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod tooling;

pub use config::{ConfigStore, SettingsAccess};
pub use error::{ApiError, StoreError};
