//! Report rendering for the terminal.

mod json;

pub use json::{SerializationError, to_json_stable};

use std::fmt::Write as _;

use postcheck_domain::{CaseOutcome, CaseResult, RunReport};

use crate::settings::ReportFormat;

/// Renders a report in the requested format.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(report: &RunReport, format: ReportFormat) -> Result<String, SerializationError> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => to_json_stable(report),
    }
}

/// One line per case, then a summary line.
///
/// ```text
/// PASS    register      POST /api/user/register (12 ms)
/// FAIL    login         POST /api/user/login expected=200 OK actual=401 Unauthorized (8 ms)
/// PENDING comment_post  PUT /api/post/comment expected status for comment creation is undocumented
///
/// 3 cases: 1 passed, 1 failed, 0 errored, 1 pending (20 ms)
/// ```
#[must_use]
pub fn render_text(report: &RunReport) -> String {
    let width = report
        .results
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for result in &report.results {
        let _ = writeln!(out, "{}", case_line(result, width));
    }

    let _ = writeln!(
        out,
        "\n{} cases: {} passed, {} failed, {} errored, {} pending ({} ms)",
        report.total,
        report.passed,
        report.failed,
        report.errored,
        report.pending,
        report.duration_ms
    );
    out
}

fn case_line(result: &CaseResult, width: usize) -> String {
    let head = format!(
        "{:<8}{:<width$}  {} {}",
        result.outcome.label(),
        result.name,
        result.method,
        result.path
    );

    match &result.outcome {
        CaseOutcome::Passed { .. } => format!("{head} ({} ms)", result.duration_ms),
        CaseOutcome::Failed { expected, actual } => format!(
            "{head} expected={expected} actual={actual} ({} ms)",
            result.duration_ms
        ),
        CaseOutcome::Errored { message } => format!("{head} {message}"),
        CaseOutcome::Pending { reason } => format!("{head} {reason}"),
    }
}
