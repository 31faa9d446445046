//! Case outcomes and run reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::HttpMethod;
use crate::response::StatusCode;

/// Outcome of a single case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// The status code matched.
    Passed {
        /// Observed status.
        actual: StatusCode,
    },
    /// The status code did not match.
    Failed {
        /// Expected status.
        expected: StatusCode,
        /// Observed status.
        actual: StatusCode,
    },
    /// No response was obtained (transport or request-construction error).
    Errored {
        /// Error message.
        message: String,
    },
    /// The case is not implemented; nothing was sent.
    Pending {
        /// Why the case is not implemented.
        reason: String,
    },
}

impl CaseOutcome {
    /// Compares an observed status against the expected one.
    #[must_use]
    pub fn check_status(expected: StatusCode, actual: StatusCode) -> Self {
        if expected == actual {
            Self::Passed { actual }
        } else {
            Self::Failed { expected, actual }
        }
    }

    /// Returns true for `Failed` and `Errored`.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::Errored { .. })
    }

    /// Short label for summaries.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed { .. } => "PASS",
            Self::Failed { .. } => "FAIL",
            Self::Errored { .. } => "ERROR",
            Self::Pending { .. } => "PENDING",
        }
    }
}

/// Result of running one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Case name.
    pub name: String,
    /// HTTP method of the case.
    pub method: HttpMethod,
    /// Request path of the case.
    pub path: String,
    /// What happened.
    pub outcome: CaseOutcome,
    /// Time spent on the case in milliseconds.
    pub duration_ms: u64,
}

/// Results of a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier.
    pub id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-case results in run order.
    pub results: Vec<CaseResult>,
    /// Number of cases run.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
    /// Number of errored cases.
    pub errored: usize,
    /// Number of pending cases.
    pub pending: usize,
    /// Total run time in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Creates a report and tallies the outcomes.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, results: Vec<CaseResult>, duration_ms: u64) -> Self {
        let count = |f: fn(&CaseOutcome) -> bool| results.iter().filter(|r| f(&r.outcome)).count();
        let passed = count(|o| matches!(o, CaseOutcome::Passed { .. }));
        let failed = count(|o| matches!(o, CaseOutcome::Failed { .. }));
        let errored = count(|o| matches!(o, CaseOutcome::Errored { .. }));
        let pending = count(|o| matches!(o, CaseOutcome::Pending { .. }));

        Self {
            id: Uuid::now_v7(),
            started_at,
            total: results.len(),
            results,
            passed,
            failed,
            errored,
            pending,
            duration_ms,
        }
    }

    /// True when no case failed or errored. Pending cases do not count.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }

    /// Looks up a case result by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(name: &str, outcome: CaseOutcome) -> CaseResult {
        CaseResult {
            name: name.to_string(),
            method: HttpMethod::Get,
            path: "/api/posts".to_string(),
            outcome,
            duration_ms: 1,
        }
    }

    #[test]
    fn test_check_status() {
        let ok = StatusCode::new(200);
        assert_eq!(
            CaseOutcome::check_status(ok, ok),
            CaseOutcome::Passed { actual: ok }
        );

        let outcome = CaseOutcome::check_status(ok, StatusCode::new(401));
        assert_eq!(
            outcome,
            CaseOutcome::Failed {
                expected: ok,
                actual: StatusCode::new(401)
            }
        );
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_report_counts() {
        let report = RunReport::new(
            Utc::now(),
            vec![
                result(
                    "a",
                    CaseOutcome::Passed {
                        actual: StatusCode::new(200),
                    },
                ),
                result(
                    "b",
                    CaseOutcome::Failed {
                        expected: StatusCode::new(200),
                        actual: StatusCode::new(500),
                    },
                ),
                result(
                    "c",
                    CaseOutcome::Errored {
                        message: "refused".to_string(),
                    },
                ),
                result(
                    "d",
                    CaseOutcome::Pending {
                        reason: "later".to_string(),
                    },
                ),
            ],
            40,
        );

        assert_eq!(report.total, 4);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.errored, 1);
        assert_eq!(report.pending, 1);
        assert!(!report.is_success());
        assert_eq!(report.get("c").map(|r| r.outcome.label()), Some("ERROR"));
    }

    #[test]
    fn test_pending_does_not_fail_run() {
        let report = RunReport::new(
            Utc::now(),
            vec![
                result(
                    "a",
                    CaseOutcome::Passed {
                        actual: StatusCode::new(201),
                    },
                ),
                result(
                    "b",
                    CaseOutcome::Pending {
                        reason: "later".to_string(),
                    },
                ),
            ],
            5,
        );
        assert!(report.is_success());
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_value(CaseOutcome::Failed {
            expected: StatusCode::new(200),
            actual: StatusCode::new(500),
        })
        .unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({"status": "failed", "expected": 200, "actual": 500})
        );
    }
}
