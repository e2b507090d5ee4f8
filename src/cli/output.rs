//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use serde::Serialize;
use std::fmt::Write;

use crate::core::{AngleMode, HistoryEntry};
use crate::error::Error;
use crate::eval::Number;
use crate::session::{CommandOutcome, SessionState};

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

/// Formats a one-shot evaluation result.
#[must_use]
pub fn format_value(expression: &str, value: &Number, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{value}\n"),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct EvalOutput<'a> {
                expression: &'a str,
                result: &'a Number,
            }
            format_json(&EvalOutput {
                expression,
                result: value,
            })
        }
    }
}

/// Formats the outcome of a single input.
#[must_use]
pub fn format_outcome(outcome: &CommandOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "{}", outcome.display_text);
            if let Some(ref note) = outcome.notification {
                let _ = writeln!(output, "  [{note}]");
            }
            output
        }
        OutputFormat::Json => format_json(outcome),
    }
}

/// Formats history entries, most recent first.
#[must_use]
pub fn format_history(entries: &[&HistoryEntry], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if entries.is_empty() {
                return "No history.\n".to_string();
            }
            let mut output = String::new();
            output.push_str("History:\n");
            for entry in entries {
                let _ = writeln!(output, "  {entry}");
            }
            output
        }
        OutputFormat::Json => format_json(&entries),
    }
}

/// Snapshot of a session after a key replay.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport<'a> {
    /// Outcome of the last key.
    pub outcome: &'a CommandOutcome,
    /// Final state.
    pub state: SessionState,
    /// Angle mode label.
    pub angle_mode: AngleMode,
    /// Memory register.
    pub memory: Number,
    /// Recent history, most recent first.
    pub history: Vec<&'a HistoryEntry>,
}

/// Formats a session report.
#[must_use]
pub fn format_report(report: &SessionReport<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = format_outcome(report.outcome, format);
            let _ = writeln!(output, "Mode:   {}", report.angle_mode);
            let _ = writeln!(output, "Memory: {}", report.memory);
            if !report.history.is_empty() {
                output.push_str(&format_history(&report.history, format));
            }
            output
        }
        OutputFormat::Json => format_json(report),
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput<'a> {
                error: String,
                #[serde(skip_serializing_if = "Option::is_none")]
                kind: Option<&'a str>,
            }
            let kind = match error {
                Error::Calc(calc) => Some(calc.kind()),
                _ => None,
            };
            format_json(&ErrorOutput {
                error: error.to_string(),
                kind,
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .map(|mut s| {
            s.push('\n');
            s
        })
        .unwrap_or_else(|_| "{}\n".to_string())
}
