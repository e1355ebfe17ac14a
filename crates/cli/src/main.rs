//! Clinicheck - acceptance-check harness for the clinic-management service.
//!
//! Runs the built-in clinic suite (or a JSON suite file named by the
//! `CLINICHECK_SUITE` environment variable) against the base URL in
//! `TEST_BASE_URL` and exits non-zero when any check fails.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use clinicheck_domain::HarnessConfig;
use clinicheck_engine::{CaseRunner, ReqwestClient, render};

mod suite;

/// Environment variable naming an optional JSON suite file.
const SUITE_ENV: &str = "CLINICHECK_SUITE";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(all_passed) => {
            if all_passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "harness could not run");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<bool, Box<dyn std::error::Error>> {
    // Configuration is read once here and immutable afterwards.
    let config = HarnessConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, "clinicheck v{}", env!("CARGO_PKG_VERSION"));

    let cases = match std::env::var(SUITE_ENV) {
        Ok(path) => {
            let path = PathBuf::from(path);
            tracing::info!(path = %path.display(), "loading suite file");
            suite::load_suite(&path)?
        }
        Err(_) => suite::clinic_suite(),
    };

    let runner = CaseRunner::new(ReqwestClient::new()?);
    let report = runner.run_suite(&cases, &config).await;

    print!("{}", render(&report));
    Ok(report.all_passed())
}
