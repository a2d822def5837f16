//! Log filename rendering.
//!
//! A filename template is either a template-engine string (anything
//! containing `{{`), rendered with `tera`, or a plain format string with
//! `{dag_id}`-style placeholders.

pub mod format;

use self::format::Arg;
use crate::error::{Result, TemplateError};
use chrono::{DateTime, FixedOffset, Timelike};
use serde::Serialize;

/// Default template used when none is configured.
pub const DEFAULT_LOG_FILENAME_TEMPLATE: &str =
    "{{ ti.dag_id }}/{{ ti.task_id }}/{{ ts }}/{{ try_number }}.log";

/// A parsed filename template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameTemplate {
    /// Plain format string with `{name}` placeholders.
    Format(String),
    /// Template-engine string.
    Engine(String),
}

/// Classifies a template string by whether it uses engine syntax.
///
/// # Examples
///
/// ```
/// use flow_helpers::template::{FilenameTemplate, parse_template_string};
///
/// assert!(matches!(parse_template_string("{{ ts }}.log"), FilenameTemplate::Engine(_)));
/// assert!(matches!(parse_template_string("{dag_id}.log"), FilenameTemplate::Format(_)));
/// ```
#[must_use]
pub fn parse_template_string(template: &str) -> FilenameTemplate {
    if template.contains("{{") {
        FilenameTemplate::Engine(template.to_string())
    } else {
        FilenameTemplate::Format(template.to_string())
    }
}

/// The identifying fields of a task run needed to name its log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInstanceInfo {
    /// DAG identifier.
    pub dag_id: String,
    /// Task identifier.
    pub task_id: String,
    /// Logical date of the run.
    pub execution_date: DateTime<FixedOffset>,
}

impl TaskInstanceInfo {
    /// Creates task instance info.
    #[must_use]
    pub fn new(
        dag_id: impl Into<String>,
        task_id: impl Into<String>,
        execution_date: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            dag_id: dag_id.into(),
            task_id: task_id.into(),
            execution_date,
        }
    }
}

#[derive(Serialize)]
struct TiContext<'a> {
    dag_id: &'a str,
    task_id: &'a str,
    execution_date: &'a str,
    try_number: u32,
}

/// Builds the engine context for one try of a task instance.
///
/// The task instance is exposed as both `ti` and `task_instance`.
fn engine_context(ti: &TaskInstanceInfo, try_number: u32, ts: &str) -> tera::Context {
    let mut context = tera::Context::new();
    let ti_context = TiContext {
        dag_id: &ti.dag_id,
        task_id: &ti.task_id,
        execution_date: ts,
        try_number,
    };
    context.insert("ti", &ti_context);
    context.insert("task_instance", &ti_context);
    context.insert("dag_id", &ti.dag_id);
    context.insert("task_id", &ti.task_id);
    context.insert("execution_date", ts);
    context.insert("ts", ts);
    context.insert("ts_nodash", &ti.execution_date.format("%Y%m%dT%H%M%S").to_string());
    context.insert("ts_nodash_with_tz", &ts.replace(['-', ':'], ""));
    context.insert("ds", &ti.execution_date.format("%Y-%m-%d").to_string());
    context.insert("ds_nodash", &ti.execution_date.format("%Y%m%d").to_string());
    context.insert("try_number", &try_number);
    context
}

/// Renders the log filename of one try of a task instance.
///
/// Engine templates are strict: a name missing from the context is an error
/// rather than an empty string. Use tera's `default` filter
/// (`{{ owner | default(value="") }}`) for optional names.
///
/// # Errors
///
/// Returns [`TemplateError`] if the template fails to parse or references an
/// unknown variable.
pub fn render_log_filename(ti: &TaskInstanceInfo, try_number: u32, template: &str) -> Result<String> {
    let execution_date = isoformat(&ti.execution_date);
    match parse_template_string(template) {
        FilenameTemplate::Engine(source) => {
            let context = engine_context(ti, try_number, &execution_date);
            tera::Tera::one_off(&source, &context, false)
                .map_err(|e| TemplateError::from(e).into())
        }
        FilenameTemplate::Format(source) => format::render(&source, |name| match name {
            "dag_id" => Some(Arg::Str(&ti.dag_id)),
            "task_id" => Some(Arg::Str(&ti.task_id)),
            "execution_date" => Some(Arg::Str(&execution_date)),
            "try_number" => Some(Arg::Int(i64::from(try_number))),
            _ => None,
        }),
    }
}

/// Formats a timestamp the way Python's `datetime.isoformat` does.
///
/// Fractional seconds appear only when non-zero, always with six digits.
#[must_use]
pub fn isoformat(timestamp: &DateTime<FixedOffset>) -> String {
    if timestamp.nanosecond() / 1_000 == 0 {
        timestamp.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    } else {
        timestamp.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
    }
}
