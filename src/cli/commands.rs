//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::chunking::{Chunks, checked_chunk_size};
use crate::cli::output::{
    OutputFormat, format_answer, format_chunks, format_key_valid, format_merged, format_value,
};
use crate::cli::parser::{Cli, Commands};
use crate::collections::merge_dicts;
use crate::error::{CommandError, IoError, Result};
use crate::keys::{KeyKind, KeyValidator, convert_camel_to_snake};
use crate::prompt::{ask_yesno, ask_yesno_with_timeout};
use crate::template::{TaskInstanceInfo, render_log_filename};
use crate::web::{WebConfig, build_url_with_query};
use chrono::DateTime;
use serde_json::{Map, Value};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    tracing::debug!(command = ?cli.command, ?format, "executing command");

    match &cli.command {
        Commands::ValidateKey {
            key,
            group,
            max_length,
            json,
        } => cmd_validate_key(key, *group, *max_length, *json, format),
        Commands::Chunk { size, items } => cmd_chunk(*size, items, format),
        Commands::Merge { base, overrides } => cmd_merge(base, overrides, format),
        Commands::CamelToSnake { name } => Ok(format_value(
            "snake_case",
            &convert_camel_to_snake(name),
            format,
        )),
        Commands::LogFilename {
            dag_id,
            task_id,
            execution_date,
            try_number,
            template,
        } => cmd_log_filename(dag_id, task_id, execution_date, *try_number, template, format),
        Commands::Url { params } => cmd_url(cli, params, format),
        Commands::Ask {
            question,
            timeout,
            default,
        } => cmd_ask(question, *timeout, default.as_deref(), format),
    }
}

fn cmd_validate_key(
    key: &str,
    group: bool,
    max_length: Option<usize>,
    json: bool,
    format: OutputFormat,
) -> Result<String> {
    let kind = if group { KeyKind::GroupKey } else { KeyKind::Key };
    let validator = KeyValidator::for_kind(kind)
        .max_length(max_length.unwrap_or_else(|| kind.default_max_length()));

    if json {
        let value: Value = serde_json::from_str(key)?;
        validator.validate_value(&value)?;
    } else {
        validator.validate(key)?;
    }

    let label = match kind {
        KeyKind::Key => "key",
        KeyKind::GroupKey => "group key",
    };
    Ok(format_key_valid(key, label, format))
}

fn cmd_chunk(size: i64, items: &[String], format: OutputFormat) -> Result<String> {
    let size = checked_chunk_size(size)?;
    let chunks: Vec<&[String]> = Chunks::new(items, size).collect();
    tracing::debug!(items = items.len(), chunks = chunks.len(), "chunked items");
    Ok(format_chunks(&chunks, format))
}

fn cmd_merge(base: &Path, overrides: &Path, format: OutputFormat) -> Result<String> {
    let base = read_json_object(base)?;
    let overrides = read_json_object(overrides)?;
    let merged = merge_dicts(&base, &overrides);
    Ok(format_merged(&merged, format))
}

/// Reads a file that must hold a single JSON object.
fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            IoError::ReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        }
    })?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        _ => Err(CommandError::InvalidInput(format!(
            "{} does not contain a JSON object",
            path.display()
        ))
        .into()),
    }
}

fn cmd_log_filename(
    dag_id: &str,
    task_id: &str,
    execution_date: &str,
    try_number: u32,
    template: &str,
    format: OutputFormat,
) -> Result<String> {
    let execution_date = DateTime::parse_from_rfc3339(execution_date).map_err(|e| {
        CommandError::InvalidArgument(format!("execution date '{execution_date}': {e}"))
    })?;
    let ti = TaskInstanceInfo::new(dag_id, task_id, execution_date);
    let filename = render_log_filename(&ti, try_number, template)?;
    Ok(format_value("filename", &filename, format))
}

fn cmd_url(cli: &Cli, params: &[String], format: OutputFormat) -> Result<String> {
    let config = WebConfig::new(&cli.base_url, &cli.default_view)?;
    let query = params
        .iter()
        .map(|param| {
            param.split_once('=').ok_or_else(|| {
                CommandError::InvalidArgument(format!("expected key=value, got '{param}'"))
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let url = build_url_with_query(&config, &query)?;
    Ok(format_value("url", &url, format))
}

fn cmd_ask(
    question: &str,
    timeout: Option<u64>,
    default: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let default = default.map(parse_default_answer).transpose()?;
    // The question goes to stderr so stdout carries only the answer
    let answer = match timeout {
        Some(seconds) => ask_yesno_with_timeout(
            question,
            Duration::from_secs(seconds),
            default,
            io::BufReader::new(io::stdin()),
            io::stderr(),
        )?,
        None => ask_yesno(question, default, io::stdin().lock(), io::stderr())?,
    };
    Ok(format_answer(answer, format))
}

fn parse_default_answer(answer: &str) -> Result<bool> {
    match answer.to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(CommandError::InvalidArgument(format!(
            "default must be yes or no, got '{other}'"
        ))
        .into()),
    }
}
