//! Configuration document model and dotted-key addressing.
//!
//! The document is an untyped value tree: `serde_json::Value` with
//! insertion-ordered mappings (`preserve_order`). Keys address it either as a
//! bare top-level name (`"system_prompt"`) or as a dot-delimited path through
//! nested mappings (`"audio.microphone"`). Traversal never indexes into
//! sequences.

use serde_json::{Map, Value};

/// The root of the configuration tree.
pub type Document = Map<String, Value>;

/// A parsed dotted key.
///
/// Splitting is literal: `"a..b"` has an empty middle segment and `""` is a
/// single empty segment, so every key maps to at least one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedKey<'a> {
    segments: Vec<&'a str>,
}

impl<'a> DottedKey<'a> {
    pub fn parse(key: &'a str) -> Self {
        Self {
            segments: key.split('.').collect(),
        }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// All segments but the last.
    pub fn parents(&self) -> &[&'a str] {
        &self.segments[..self.segments.len() - 1]
    }

    pub fn leaf(&self) -> &'a str {
        self.segments[self.segments.len() - 1]
    }
}

/// Resolve `key` against `document`. `None` as soon as a segment is absent or
/// the value reached so far is not a mapping.
pub fn lookup<'d>(document: &'d Document, key: &DottedKey<'_>) -> Option<&'d Value> {
    let (first, rest) = key.segments().split_first()?;
    let mut current = document.get(*first)?;
    for segment in rest {
        current = current.as_object()?.get(*segment)?;
    }
    Some(current)
}

/// Outcome of [`assign`], reported so callers can log replaced values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AssignReport {
    /// Intermediate paths that did not exist and were created as mappings.
    pub created: Vec<String>,
    /// Intermediate paths that held a non-mapping value and were replaced.
    pub replaced: Vec<String>,
}

/// Write `value` at `key`, creating missing intermediate mappings. An
/// intermediate segment holding a non-mapping value is replaced by an empty
/// mapping. The leaf is always overwritten.
pub fn assign(document: &mut Document, key: &DottedKey<'_>, value: Value) -> AssignReport {
    let mut report = AssignReport::default();
    let mut current = document;
    let mut walked = String::new();

    for segment in key.parents() {
        if !walked.is_empty() {
            walked.push('.');
        }
        walked.push_str(segment);

        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| {
                report.created.push(walked.clone());
                Value::Object(Map::new())
            });
        if !slot.is_object() {
            report.replaced.push(walked.clone());
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(map) => map,
            _ => unreachable!("slot was just made a mapping"),
        };
    }

    current.insert(key.leaf().to_string(), value);
    report
}

/// JSON kind name used in validation and CLI output.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
