use clap::Parser;
use mactrans::config::AppDirectories;
use mactrans::tooling::cli::{Cli, CliContext, Commands, ConfigCommands, TemplateCommands};
use mactrans::ApiError;
use serde_json::{json, Value};
use tempfile::TempDir;

fn context(temp_dir: &TempDir) -> CliContext {
    CliContext::with_directories(AppDirectories::under(temp_dir.path())).unwrap()
}

fn config(command: ConfigCommands) -> Commands {
    Commands::Config { command }
}

fn templates(command: TemplateCommands) -> Commands {
    Commands::Templates { command }
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["mactrans", "init"],
        vec!["mactrans", "config", "path"],
        vec!["mactrans", "config", "show", "--format", "json"],
        vec!["mactrans", "config", "get", "audio.microphone"],
        vec!["mactrans", "config", "get", "nope", "--default", "\"x\""],
        vec!["mactrans", "config", "set", "ui.theme", "dark"],
        vec!["mactrans", "config", "validate"],
        vec!["mactrans", "templates", "list"],
        vec!["mactrans", "templates", "show", "tasks"],
        vec![
            "mactrans",
            "templates",
            "render",
            "tasks",
            "--transcript",
            "meeting.txt",
        ],
        vec!["mactrans", "--verbose", "--config", "/tmp/c.json", "config", "path"],
        vec![
            "mactrans",
            "--log-module",
            "mactrans::config=debug",
            "--no-color",
            "--no-log",
            "config",
            "path",
        ],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_incomplete_commands() {
    assert!(Cli::try_parse_from(["mactrans", "config", "set", "ui.theme"]).is_err());
    assert!(Cli::try_parse_from(["mactrans", "templates", "render", "tasks"]).is_err());
    assert!(Cli::try_parse_from(["mactrans", "scan"]).is_err());
}

#[test]
fn logging_flags_reach_logging_config() {
    let cli = Cli::try_parse_from([
        "mactrans",
        "--verbose",
        "--log-format",
        "json",
        "--log-module",
        "mactrans::config=trace",
        "--log-module",
        "mactrans::prompt=warn",
        "--no-color",
        "config",
        "path",
    ])
    .unwrap();

    let config = cli.logging_config();
    assert!(config.enabled);
    assert!(!config.color);
    assert_eq!(config.level, "debug");
    assert_eq!(config.output, "stderr");
    assert_eq!(config.format, "json");
    assert_eq!(
        config.modules,
        vec!["mactrans::config=trace", "mactrans::prompt=warn"]
    );

    let silent = Cli::try_parse_from(["mactrans", "--no-log", "init"]).unwrap();
    assert!(!silent.logging_config().enabled);
    assert!(silent.logging_config().color);
}

#[test]
fn init_with_explicit_settings_file_reports_its_directory() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = AppDirectories::under(temp_dir.path());
    let settings = temp_dir.path().join("elsewhere").join("custom.json");
    let mut cli = CliContext::with_config_file(settings.clone(), dirs.clone());

    let output = cli.execute(&Commands::Init).unwrap();

    assert!(settings.is_file());
    let support = temp_dir.path().join("elsewhere");
    assert!(output.contains(&format!("Support:     {}", support.display())));
    assert!(!dirs.app_support.exists());
    assert!(dirs.transcripts.is_dir());
    assert!(dirs.chats.is_dir());
}

#[test]
fn init_creates_directories_and_settings() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = AppDirectories::under(temp_dir.path());
    let mut cli = CliContext::with_directories(dirs.clone()).unwrap();

    let output = cli.execute(&Commands::Init).unwrap();

    assert!(output.contains("Initialized MacTrans"));
    assert!(dirs.config_file().is_file());
    for dir in dirs.all() {
        assert!(dir.is_dir());
    }
}

#[test]
fn config_set_then_get_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let mut cli = context(&temp_dir);

    cli.execute(&config(ConfigCommands::Set {
        key: "audio.microphone".to_string(),
        value: "Built-in Mic".to_string(),
    }))
    .unwrap();
    cli.execute(&config(ConfigCommands::Set {
        key: "ai.max_tokens".to_string(),
        value: "2048".to_string(),
    }))
    .unwrap();

    // A fresh context reads what the previous one wrote.
    let mut fresh = context(&temp_dir);
    let microphone = fresh
        .execute(&config(ConfigCommands::Get {
            key: "audio.microphone".to_string(),
            default: None,
        }))
        .unwrap();
    assert_eq!(microphone, "Built-in Mic");
    assert_eq!(
        fresh.store().get("ai.max_tokens", Value::Null),
        json!(2048)
    );
}

#[test]
fn config_get_missing_prints_default() {
    let temp_dir = TempDir::new().unwrap();
    let mut cli = context(&temp_dir);

    let missing = cli
        .execute(&config(ConfigCommands::Get {
            key: "nope.nope".to_string(),
            default: Some("\"fallback\"".to_string()),
        }))
        .unwrap();
    assert_eq!(missing, "fallback");

    let null = cli
        .execute(&config(ConfigCommands::Get {
            key: "nope".to_string(),
            default: None,
        }))
        .unwrap();
    assert_eq!(null, "null");
}

#[test]
fn config_show_json_matches_store() {
    let temp_dir = TempDir::new().unwrap();
    let mut cli = context(&temp_dir);

    let output = cli
        .execute(&config(ConfigCommands::Show {
            format: "json".to_string(),
        }))
        .unwrap();

    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed, Value::Object(cli.store().document().clone()));
}

#[test]
fn config_validate_json_contract_has_required_fields() {
    let temp_dir = TempDir::new().unwrap();
    let mut cli = context(&temp_dir);
    cli.execute(&config(ConfigCommands::Set {
        key: "format.transcription".to_string(),
        value: "docx".to_string(),
    }))
    .unwrap();

    let output = cli
        .execute(&config(ConfigCommands::Validate {
            format: "json".to_string(),
        }))
        .unwrap();

    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["valid"], json!(false));
    assert!(parsed.get("passed_checks").and_then(|v| v.as_u64()).is_some());
    assert!(parsed.get("total_checks").and_then(|v| v.as_u64()).is_some());
    let errors = parsed["errors"].as_array().unwrap();
    assert!(errors
        .iter()
        .any(|e| e.as_str().unwrap().contains("format.transcription")));
    assert!(parsed["storage_issues"].as_array().unwrap().is_empty());
}

#[test]
fn invalid_format_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut cli = context(&temp_dir);
    let err = cli
        .execute(&config(ConfigCommands::Show {
            format: "yaml".to_string(),
        }))
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
}

#[test]
fn templates_list_json_contract() {
    let temp_dir = TempDir::new().unwrap();
    let mut cli = context(&temp_dir);

    let output = cli
        .execute(&templates(TemplateCommands::List {
            format: "json".to_string(),
        }))
        .unwrap();

    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["total"], json!(4));
    let ids: Vec<&str> = parsed["templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["default", "detailed", "tasks", "decisions"]);
}

#[test]
fn templates_show_unknown_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut cli = context(&temp_dir);
    let err = cli
        .execute(&templates(TemplateCommands::Show {
            id: "missing".to_string(),
        }))
        .unwrap_err();
    assert!(matches!(err, ApiError::TemplateNotFound(id) if id == "missing"));
}

#[test]
fn templates_render_reads_transcript_from_transcripts_dir() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = AppDirectories::under(temp_dir.path());
    let mut cli = CliContext::with_directories(dirs.clone()).unwrap();
    std::fs::write(
        dirs.transcripts.join("standup.txt"),
        "[MIC] Carol: release moves to Monday.",
    )
    .unwrap();

    let output = cli
        .execute(&templates(TemplateCommands::Render {
            id: "decisions".to_string(),
            transcript: "standup.txt".to_string(),
            message: String::new(),
            history: String::new(),
        }))
        .unwrap();

    assert!(output.contains("[MIC] Carol: release moves to Monday."));
    assert!(!output.contains("{audiotranscript}"));
}
