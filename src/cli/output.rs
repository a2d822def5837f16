//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::error::{Error, KeyError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a successful key validation.
#[must_use]
pub fn format_key_valid(key: &str, kind: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("Valid {kind}: {key}\n"),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct KeyValid<'a> {
                key: &'a str,
                kind: &'a str,
                valid: bool,
            }
            format_json(&KeyValid {
                key,
                kind,
                valid: true,
            })
        }
    }
}

/// Formats chunks of items.
#[must_use]
pub fn format_chunks(chunks: &[&[String]], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "{} chunks:", chunks.len());
            for (i, chunk) in chunks.iter().enumerate() {
                let _ = writeln!(output, "  [{i}] {}", chunk.join(", "));
            }
            output
        }
        OutputFormat::Json => format_json(&chunks),
    }
}

/// Formats a merged mapping.
///
/// Text output is always pretty-printed JSON, since the value is a document.
#[must_use]
pub fn format_merged(merged: &Map<String, Value>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}\n", format_json(merged)),
        OutputFormat::Json => format_json(merged),
    }
}

/// Formats a single string result under `field`.
#[must_use]
pub fn format_value(field: &str, value: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{value}\n"),
        OutputFormat::Json => {
            let mut object = Map::new();
            object.insert(field.to_string(), Value::String(value.to_string()));
            format_json(&object)
        }
    }
}

/// Formats a yes/no answer.
#[must_use]
pub fn format_answer(answer: bool, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}\n", if answer { "yes" } else { "no" }),
        OutputFormat::Json => {
            let mut object = Map::new();
            object.insert("answer".to_string(), Value::Bool(answer));
            format_json(&object)
        }
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                success: bool,
                error: String,
                kind: &'static str,
            }
            format_json(&ErrorOutput {
                success: false,
                error: error.to_string(),
                kind: error_kind(error),
            })
        }
    }
}

/// Short machine-readable name of an error's kind.
const fn error_kind(error: &Error) -> &'static str {
    match error {
        Error::Key(KeyError::NotAString { .. }) => "type",
        Error::Key(KeyError::TooLong { .. }) => "length",
        Error::Key(KeyError::InvalidFormat { .. }) => "format",
        Error::Chunking(_) => "invalid_argument",
        Error::Prompt(crate::error::PromptError::Timeout { .. }) => "timeout",
        Error::Prompt(_) => "prompt",
        Error::Template(_) => "template",
        Error::Io(_) => "io",
        Error::Command(_) => "command",
        Error::Config { .. } => "config",
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
