//! postcheck - Main Entry Point
//!
//! Resolves settings, runs the standard suite against the configured
//! service and prints the report. Exit codes: 0 when every case passed or is
//! pending, 1 when a case failed or errored, 2 when the run could not start.

use std::process::ExitCode;
use std::sync::Arc;

use postcheck_application::RunSuite;
use postcheck_domain::standard_suite;
use postcheck_infrastructure::{ReqwestHttpClient, SettingsLoader, SystemClock, render};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_CASE_FAILED: u8 = 1;
const EXIT_NOT_STARTED: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("postcheck v{}", env!("CARGO_PKG_VERSION"));

    match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "run did not start");
            eprintln!("postcheck: {e}");
            ExitCode::from(EXIT_NOT_STARTED)
        }
    }
}

async fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let settings = SettingsLoader::from_process_env().load()?;
    let options = settings.run.to_options()?;
    let format = settings.run.report;

    let fixture = Arc::new(settings.fixture);
    let suite = standard_suite(&fixture);

    let runner = RunSuite::new(
        Arc::new(ReqwestHttpClient::new()?),
        Arc::new(SystemClock::new()),
        Arc::clone(&fixture),
    )
    .with_options(options);

    let report = runner.run(suite).await?;
    print!("{}", render(&report, format)?);

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_CASE_FAILED)
    })
}
