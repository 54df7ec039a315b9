//! Text and JSON renderings of settings, templates, and validation results.

use crate::config::{Document, StorageIssue, Template, ValidationResult};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::{json, Value};

const VALUE_PREVIEW_CHARS: usize = 60;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// A value as shown in tables and `config get`: strings bare, everything else
/// as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn preview(text: &str) -> String {
    let single_line = text.trim().replace('\n', " ");
    if single_line.chars().count() > VALUE_PREVIEW_CHARS {
        let cut: String = single_line.chars().take(VALUE_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        single_line
    }
}

/// Settings as a key/value table, one row per second-level key.
pub fn format_document_text(document: &Document, path: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", format_section_heading("Settings")));
    out.push_str(&format!("  File: {}\n\n", path));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Key", "Value"]);
    for (section, value) in document {
        match value {
            Value::Object(entries) if !entries.is_empty() => {
                for (key, inner) in entries {
                    table.add_row(vec![
                        format!("{}.{}", section, key),
                        preview(&display_value(inner)),
                    ]);
                }
            }
            other => {
                table.add_row(vec![section.clone(), preview(&display_value(other))]);
            }
        }
    }
    out.push_str(&format!("{}\n", table));
    out
}

/// Settings as pretty JSON, the same text written to disk.
pub fn format_document_json(document: &Document) -> String {
    serde_json::to_string_pretty(document).unwrap_or_else(|_| "{}".to_string())
}

/// Template list as a table.
pub fn format_template_list_text(templates: &[(String, Template)]) -> String {
    if templates.is_empty() {
        return "No templates configured.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Name", "Description"]);
    for (id, template) in templates {
        table.add_row(vec![
            id.clone(),
            template.name.clone(),
            preview(&template.description),
        ]);
    }
    format!(
        "{}\n\n{}\n\nTotal: {} template(s)",
        format_section_heading("Templates"),
        table,
        templates.len()
    )
}

/// Template list as JSON.
pub fn format_template_list_json(templates: &[(String, Template)]) -> String {
    let list: Vec<_> = templates
        .iter()
        .map(|(id, template)| {
            json!({
                "id": id,
                "name": template.name,
                "description": template.description,
            })
        })
        .collect();
    let out = json!({ "templates": list, "total": templates.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

/// A single template in full.
pub fn format_template_text(id: &str, template: &Template) -> String {
    let mut out = format!("Template: {}\n", id);
    out.push_str(&format!("Name: {}\n", template.name));
    out.push_str(&format!("Description: {}\n", template.description));
    out.push_str("\nPrompt:\n");
    out.push_str(template.prompt.trim_matches('\n'));
    out
}

/// Validation result as text.
pub fn format_validation_text(result: &ValidationResult, issues: &[StorageIssue]) -> String {
    let mut output = format!("{}\n\n", format_section_heading("Settings Validation"));

    if result.is_valid() && result.checks.iter().all(|(_, passed)| *passed) {
        output.push_str(&format!("  {} All validation checks passed\n", "ok".green()));
    } else {
        for (description, _) in result.checks.iter().filter(|(_, passed)| !*passed) {
            output.push_str(&format!("  {} {}\n", "FAIL".red(), description));
        }
        for error in &result.errors {
            output.push_str(&format!("  {} {}\n", "error:".red(), error));
        }
    }
    for warning in &result.warnings {
        output.push_str(&format!("  {} {}\n", "warning:".yellow(), warning));
    }
    for issue in issues {
        output.push_str(&format!(
            "  {} {:?} {}: {}\n",
            "storage:".yellow(),
            issue.kind,
            issue.path.display(),
            issue.message
        ));
    }

    output.push_str(&format!(
        "\nValidation summary: {}/{} checks passed\n",
        result.passed_checks(),
        result.total_checks()
    ));
    output
}

/// Validation result as JSON.
pub fn format_validation_json(result: &ValidationResult, issues: &[StorageIssue]) -> String {
    let issues: Vec<_> = issues
        .iter()
        .map(|issue| {
            json!({
                "kind": format!("{:?}", issue.kind),
                "path": issue.path.display().to_string(),
                "message": issue.message,
            })
        })
        .collect();
    let out = json!({
        "valid": result.is_valid(),
        "passed_checks": result.passed_checks(),
        "total_checks": result.total_checks(),
        "errors": result.errors,
        "warnings": result.warnings,
        "storage_issues": issues,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
