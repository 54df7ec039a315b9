//! CLI Tooling
//!
//! Command-line front end over the settings store: read and write settings by
//! dotted key, inspect and render prompt templates, validate the document.

use crate::config::sections::templates;
use crate::config::{AppDirectories, ConfigStore};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::prompt::{load_transcript, render_template, resolve_transcript_path, PromptContext};
use crate::tooling::format::{
    display_value, format_document_json, format_document_text, format_template_list_json,
    format_template_list_text, format_template_text, format_validation_json,
    format_validation_text,
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

/// MacTrans - meeting transcription assistant settings
#[derive(Parser)]
#[command(name = "mactrans")]
#[command(about = "Manage MacTrans settings and prompt templates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file path (overrides MACTRANS_CONFIG and the platform default)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging to stderr (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Per-target log level, repeatable (e.g. mactrans::config=debug)
    #[arg(long = "log-module", value_name = "TARGET=LEVEL")]
    pub log_modules: Vec<String>,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,

    /// Disable logging entirely
    #[arg(long)]
    pub no_log: bool,
}

impl Cli {
    /// Logging settings from the global flags. `--verbose` means debug to stderr
    /// unless the level or output is given explicitly.
    pub fn logging_config(&self) -> LoggingConfig {
        let mut config = LoggingConfig::default();
        if self.verbose {
            config.level = "debug".to_string();
            config.output = "stderr".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        config.file = self.log_file.clone();
        config.modules = self.log_modules.clone();
        config.color = !self.no_color;
        config.enabled = !self.no_log;
        config
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create the application directories and the settings file
    Init,
    /// Settings commands (path, show, get, set, validate)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Prompt template commands (list, show, render)
    Templates {
        #[command(subcommand)]
        command: TemplateCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the settings file location
    Path,
    /// Show all settings
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Read a value by key (e.g. audio.microphone)
    Get {
        key: String,
        /// JSON value printed when the key is absent
        #[arg(long)]
        default: Option<String>,
    },
    /// Write a value by key; the value is parsed as JSON when possible
    Set { key: String, value: String },
    /// Check the settings against the schema
    Validate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TemplateCommands {
    /// List prompt templates
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one template in full
    Show { id: String },
    /// Render a template against a transcript file
    Render {
        id: String,
        /// Transcript file; relative names resolve against the transcripts directory
        #[arg(long)]
        transcript: String,
        /// User message for {usermessage}
        #[arg(long, default_value = "")]
        message: String,
        /// Chat history for {messagestory}
        #[arg(long, default_value = "")]
        history: String,
    },
}

/// Parse a command-line value: JSON literal when it parses, plain string otherwise.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// CLI context owning the settings store
pub struct CliContext {
    store: ConfigStore,
    directories: Option<AppDirectories>,
}

impl CliContext {
    /// Create a context for the settings file resolved from `config_path`,
    /// `MACTRANS_CONFIG`, or the platform default.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let path = crate::config::resolve_config_path(config_path)?;
        match AppDirectories::resolve() {
            Ok(directories) => Ok(Self::with_config_file(path, directories)),
            Err(e) => {
                warn!(error = %e, "Application directories unavailable");
                Ok(Self {
                    store: ConfigStore::load(path),
                    directories: None,
                })
            }
        }
    }

    /// Create a context for an explicit settings file. Application support
    /// becomes the file's directory; the document directories are kept.
    pub fn with_config_file(config_path: PathBuf, directories: AppDirectories) -> Self {
        let directories = directories.holding_config(&config_path);
        Self {
            store: ConfigStore::load(config_path),
            directories: Some(directories),
        }
    }

    /// Create a context rooted at explicit directories, provisioning them first.
    pub fn with_directories(directories: AppDirectories) -> Result<Self, ApiError> {
        directories.provision()?;
        let store = ConfigStore::load(directories.config_file());
        Ok(Self {
            store,
            directories: Some(directories),
        })
    }

    /// The settings store
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Execute a CLI command
    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Init => self.handle_init(),
            Commands::Config { command } => self.handle_config_command(command),
            Commands::Templates { command } => self.handle_template_command(command),
        }
    }

    fn handle_init(&mut self) -> Result<String, ApiError> {
        let directories = self.directories.as_ref().ok_or_else(|| {
            ApiError::ConfigError("Application directories could not be determined".to_string())
        })?;
        directories.provision()?;
        if !self.store.path().exists() {
            self.store.try_save()?;
        }
        info!(path = %self.store.path().display(), "Initialized application directories");

        let mut out = String::from("Initialized MacTrans\n");
        out.push_str(&format!("  Settings:    {}\n", self.store.path().display()));
        out.push_str(&format!("  Support:     {}\n", directories.app_support.display()));
        out.push_str(&format!("  Documents:   {}\n", directories.docs.display()));
        out.push_str(&format!("  Transcripts: {}\n", directories.transcripts.display()));
        out.push_str(&format!("  Chats:       {}", directories.chats.display()));
        Ok(out)
    }

    fn handle_config_command(&mut self, command: &ConfigCommands) -> Result<String, ApiError> {
        match command {
            ConfigCommands::Path => Ok(self.store.path().display().to_string()),
            ConfigCommands::Show { format } => match format.as_str() {
                "json" => Ok(format_document_json(self.store.document())),
                "text" => Ok(format_document_text(
                    self.store.document(),
                    &self.store.path().display().to_string(),
                )),
                other => Err(invalid_format(other)),
            },
            ConfigCommands::Get { key, default } => {
                let default = match default {
                    Some(raw) => parse_value(raw),
                    None => Value::Null,
                };
                Ok(display_value(&self.store.get(key, default)))
            }
            ConfigCommands::Set { key, value } => {
                let value = parse_value(value);
                let issues_before = self.store.issues().len();
                self.store.set(key, value.clone());
                if let Some(issue) = self.store.issues().get(issues_before) {
                    return Err(ApiError::ConfigError(format!(
                        "{} was set but not saved: {}",
                        key, issue.message
                    )));
                }
                info!(key = %key, "Updated setting");
                Ok(format!("{} = {}", key, value))
            }
            ConfigCommands::Validate { format } => {
                let result = self.store.validate();
                match format.as_str() {
                    "json" => Ok(format_validation_json(&result, self.store.issues())),
                    "text" => Ok(format_validation_text(&result, self.store.issues())),
                    other => Err(invalid_format(other)),
                }
            }
        }
    }

    fn handle_template_command(&mut self, command: &TemplateCommands) -> Result<String, ApiError> {
        match command {
            TemplateCommands::List { format } => {
                let listed = templates(self.store.document());
                match format.as_str() {
                    "json" => Ok(format_template_list_json(&listed)),
                    "text" => Ok(format_template_list_text(&listed)),
                    other => Err(invalid_format(other)),
                }
            }
            TemplateCommands::Show { id } => templates(self.store.document())
                .into_iter()
                .find(|(template_id, _)| template_id == id)
                .map(|(template_id, template)| format_template_text(&template_id, &template))
                .ok_or_else(|| ApiError::TemplateNotFound(id.clone())),
            TemplateCommands::Render {
                id,
                transcript,
                message,
                history,
            } => {
                let transcripts_dir = match &self.directories {
                    Some(dirs) => dirs.transcripts.clone(),
                    None => std::env::current_dir().map_err(|e| {
                        ApiError::ConfigError(format!("Failed to get current directory: {}", e))
                    })?,
                };
                let path = resolve_transcript_path(transcript, &transcripts_dir)?;
                let context = PromptContext {
                    transcript: load_transcript(&path)?,
                    user_message: message.clone(),
                    message_history: history.clone(),
                };
                render_template(&self.store, id, &context)
            }
        }
    }
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::InvalidArgument(format!(
        "Invalid format: {} (must be 'text' or 'json')",
        format
    ))
}
