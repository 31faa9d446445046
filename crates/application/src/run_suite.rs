//! Run Suite Use Case
//!
//! Executes test cases one after another against the service under test and
//! collects their outcomes into a `RunReport`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use postcheck_domain::{CaseOutcome, CaseResult, Expectation, Fixture, RunReport, TestCase};
use tracing::{debug, info, warn};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Clock, HttpClient};

/// Options controlling which cases run and how.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Run only these cases, in suite order. `None` runs everything.
    pub only: Option<Vec<String>>,
    /// Stop after the first failed or errored case.
    pub stop_on_failure: bool,
    /// Per-request timeout; `None` leaves it to the HTTP client.
    pub timeout: Option<Duration>,
}

/// Use case for running a suite of cases.
///
/// Cases run sequentially: each request completes (or fails) before the next
/// one is sent. A failing case never prevents later cases from running unless
/// `stop_on_failure` is set.
///
/// # Example
///
/// ```ignore
/// let runner = RunSuite::new(Arc::new(ReqwestHttpClient::new()?), Arc::new(SystemClock), fixture);
/// let report = runner.run(standard_suite(&fixture)).await?;
/// ```
pub struct RunSuite<C: HttpClient> {
    client: Arc<C>,
    clock: Arc<dyn Clock>,
    fixture: Arc<Fixture>,
    options: RunOptions,
}

impl<C: HttpClient> RunSuite<C> {
    /// Creates a runner with default options.
    #[must_use]
    pub fn new(client: Arc<C>, clock: Arc<dyn Clock>, fixture: Arc<Fixture>) -> Self {
        Self {
            client,
            clock,
            fixture,
            options: RunOptions::default(),
        }
    }

    /// Replaces the run options.
    #[must_use]
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the fixture this runner was built with.
    #[must_use]
    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    /// Applies the `only` filter, keeping suite order.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCase` for a name not in the suite and `EmptySelection`
    /// if nothing is left.
    pub fn select(&self, cases: Vec<TestCase>) -> ApplicationResult<Vec<TestCase>> {
        let Some(only) = &self.options.only else {
            return Ok(cases);
        };

        if let Some(name) = only.iter().find(|n| !cases.iter().any(|c| &c.name == *n)) {
            let known: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
            return Err(ApplicationError::UnknownCase {
                name: name.clone(),
                known: known.join(", "),
            });
        }

        let selected: Vec<_> = cases.into_iter().filter(|c| only.contains(&c.name)).collect();
        if selected.is_empty() {
            return Err(ApplicationError::EmptySelection);
        }
        Ok(selected)
    }

    /// Checks everything that can be checked before sending anything: the
    /// base URL and the tokens each case needs.
    ///
    /// # Errors
    ///
    /// Returns the first domain error found.
    pub fn validate(&self, cases: &[TestCase]) -> ApplicationResult<()> {
        self.fixture.base_url()?;
        for case in cases {
            case.check_token(&self.fixture)?;
        }
        Ok(())
    }

    /// Selects, validates and runs the cases.
    ///
    /// # Errors
    ///
    /// Returns an error only if the run cannot start; case failures are
    /// reported in the `RunReport`.
    pub async fn run(&self, cases: Vec<TestCase>) -> ApplicationResult<RunReport> {
        let cases = self.select(cases)?;
        self.validate(&cases)?;

        let started_at = self.clock.now();
        let start = Instant::now();
        info!(cases = cases.len(), base_url = %self.fixture.base_url, "starting run");

        let mut results = Vec::with_capacity(cases.len());
        for case in &cases {
            let result = self.run_case(case).await;
            let failed = result.outcome.is_failure();
            results.push(result);

            if failed && self.options.stop_on_failure {
                warn!(case = %case.name, "stopping run after failure");
                break;
            }
        }

        let report = RunReport::new(started_at, results, elapsed_ms(start));
        info!(
            passed = report.passed,
            failed = report.failed,
            errored = report.errored,
            pending = report.pending,
            duration_ms = report.duration_ms,
            "run finished"
        );
        Ok(report)
    }

    /// Runs a single case. Never fails: every problem becomes an outcome.
    pub async fn run_case(&self, case: &TestCase) -> CaseResult {
        let start = Instant::now();
        let outcome = self.outcome_of(case).await;

        match &outcome {
            CaseOutcome::Passed { actual } => info!(case = %case.name, %actual, "passed"),
            CaseOutcome::Failed { expected, actual } => {
                warn!(case = %case.name, %expected, %actual, "status mismatch");
            }
            CaseOutcome::Errored { message } => warn!(case = %case.name, %message, "errored"),
            CaseOutcome::Pending { reason } => info!(case = %case.name, %reason, "pending"),
        }

        CaseResult {
            name: case.name.clone(),
            method: case.method,
            path: case.path.clone(),
            outcome,
            duration_ms: elapsed_ms(start),
        }
    }

    async fn outcome_of(&self, case: &TestCase) -> CaseOutcome {
        let request = match case.to_request(&self.fixture, self.options.timeout) {
            Ok(request) => request,
            Err(e) => {
                return CaseOutcome::Errored {
                    message: e.to_string(),
                };
            }
        };

        let expected = match &case.expectation {
            Expectation::Status { expected } => *expected,
            Expectation::NotImplemented { reason } => {
                debug!(case = %case.name, url = %request.url, "request built but not sent");
                return CaseOutcome::Pending {
                    reason: reason.clone(),
                };
            }
        };

        debug!(case = %case.name, method = %request.method, url = %request.url, "sending");
        match self.client.execute(&request).await {
            Ok(response) => {
                let outcome = CaseOutcome::check_status(expected, response.status);
                if outcome.is_failure() {
                    debug!(
                        case = %case.name,
                        size = response.size,
                        elapsed_ms = response.duration.as_millis(),
                        body = %response.body,
                        "unexpected response"
                    );
                }
                outcome
            }
            Err(e) => CaseOutcome::Errored {
                message: e.to_string(),
            },
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
