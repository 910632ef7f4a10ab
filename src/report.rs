//! Rendering of run summaries as text and JSON.
//!
//! The text form prints one line per case followed by a key=value summary
//! line. The JSON form carries the same counts plus per-case detail and is
//! the shape persisted by [`crate::artifact::write_json_report`].

use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

use crate::runner::{CaseOutcome, CaseStatus, RunSummary};

/// Errors raised while rendering reports.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ReportError {
    /// Indicates the JSON encoder rejected the report.
    #[error("failed to encode report: {0}")]
    Serialise(String),
}

/// Writes the human-readable report for `summary` to `target`.
///
/// # Errors
///
/// Returns any I/O error raised by the sink.
pub fn write_text(mut target: impl Write, summary: &RunSummary) -> io::Result<()> {
    for outcome in &summary.outcomes {
        writeln!(target, "{}", case_line(outcome))?;
    }
    writeln!(
        target,
        "suite complete: tests={}, passed={}, failures={}, errors={}, elapsed_ms={}",
        summary.executed(),
        summary.passed(),
        summary.failures(),
        summary.errors(),
        summary.elapsed.as_millis()
    )
}

fn case_line(outcome: &CaseOutcome) -> String {
    let millis = outcome.elapsed.as_millis();
    match &outcome.status {
        CaseStatus::Passed => format!("{}: ok ({millis}ms)", outcome.name),
        CaseStatus::Failed(failure) => {
            format!("{}: FAILED ({millis}ms): {failure}", outcome.name)
        }
        CaseStatus::Errored(message) => {
            format!("{}: ERROR ({millis}ms): {message}", outcome.name)
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    tests: usize,
    passed: usize,
    failures: usize,
    errors: usize,
    elapsed_ms: u128,
    cases: Vec<JsonCase<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonCase<'a> {
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    elapsed_ms: u128,
}

/// Renders the machine-readable report for `summary`.
///
/// # Errors
///
/// Returns [`ReportError::Serialise`] when encoding fails.
pub fn render_json(summary: &RunSummary) -> Result<String, ReportError> {
    let report = JsonReport {
        tests: summary.executed(),
        passed: summary.passed(),
        failures: summary.failures(),
        errors: summary.errors(),
        elapsed_ms: summary.elapsed.as_millis(),
        cases: summary.outcomes.iter().map(json_case).collect(),
    };
    serde_json::to_string(&report).map_err(|err| ReportError::Serialise(err.to_string()))
}

fn json_case(outcome: &CaseOutcome) -> JsonCase<'_> {
    let (status, detail) = match &outcome.status {
        CaseStatus::Passed => ("passed", None),
        CaseStatus::Failed(failure) => ("failed", Some(failure.to_string())),
        CaseStatus::Errored(message) => ("errored", Some(message.clone())),
    };
    JsonCase {
        name: outcome.name.as_str(),
        status,
        detail,
        elapsed_ms: outcome.elapsed.as_millis(),
    }
}
