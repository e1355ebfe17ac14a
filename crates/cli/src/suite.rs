//! Built-in clinic suite and suite-file loading.

use std::path::Path;

use thiserror::Error;

use clinicheck_domain::{Assertion, CheckCase};

/// Errors loading a suite file.
#[derive(Debug, Error)]
pub enum SuiteLoadError {
    /// The file could not be read.
    #[error("failed to read suite file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid JSON array of cases.
    #[error("failed to parse suite file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The file parsed but contains no cases.
    #[error("suite file contains no cases")]
    Empty,
}

/// The built-in acceptance suite for the clinic-management service.
///
/// Three checks: list clinics and create clinic as `admin:admin`, and an
/// unauthenticated health probe.
#[must_use]
pub fn clinic_suite() -> Vec<CheckCase> {
    vec![
        CheckCase::get("list clinics", "/clinics")
            .with_basic_auth("admin", "admin")
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::json_content_type())
            .with_assertion(Assertion::json_path_count_at_least("_embedded.clinics", 0)),
        CheckCase::post("create clinic", "/clinics")
            .with_basic_auth("admin", "admin")
            .with_json_body(r#"{"name":"Test Clinic","address":"123 Test St","phone":"555-0123"}"#)
            .with_assertion(Assertion::status(201))
            .with_assertion(Assertion::json_path_equals(
                "name",
                serde_json::json!("Test Clinic"),
            )),
        CheckCase::get("health check", "/actuator/health")
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::json_path_equals(
                "status",
                serde_json::json!("UP"),
            )),
    ]
}

/// Loads a suite from a JSON file holding an array of cases.
///
/// # Errors
///
/// Returns a [`SuiteLoadError`] if the file cannot be read, is not valid
/// JSON, or holds no cases.
pub fn load_suite(path: &Path) -> Result<Vec<CheckCase>, SuiteLoadError> {
    let text = std::fs::read_to_string(path)?;
    let cases: Vec<CheckCase> = serde_json::from_str(&text)?;
    if cases.is_empty() {
        return Err(SuiteLoadError::Empty);
    }
    Ok(cases)
}
