//! Case and suite execution.
//!
//! Sends each case's request through the [`HttpClient`] port, evaluates
//! its assertions in declared order, and aggregates a suite report. A
//! failing case never aborts the rest of the run.

use std::time::Instant;

use chrono::Utc;

use clinicheck_domain::{CaseReport, CheckCase, HarnessConfig, SuiteReport};

use crate::assertions::evaluate;
use crate::client::HttpClient;

/// Executes check cases against a configured base URL.
pub struct CaseRunner<C> {
    client: C,
}

impl<C: HttpClient> CaseRunner<C> {
    /// Creates a runner over the given transport.
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Runs a single case and reports the outcome.
    ///
    /// Assertions are evaluated in declared order against the captured
    /// response. All assertions are evaluated unless the case opts into
    /// `stop_on_failure`. A case that fails validation is reported as
    /// invalid without being sent; transport failures (connection
    /// refused, DNS, timeout) produce a transport outcome with no
    /// assertion results.
    pub async fn run(&self, case: &CheckCase, config: &HarnessConfig) -> CaseReport {
        let start = Instant::now();

        if let Err(e) = case.validate() {
            tracing::warn!(case = %case.name, error = %e, "invalid case definition");
            return CaseReport::invalid_case(case.id, &case.name, e.to_string(), elapsed_ms(start));
        }

        let url = config.endpoint(&case.path);
        tracing::info!(case = %case.name, method = %case.method, %url, "running check");

        let response = match self.client.execute(case, &url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(case = %case.name, error = %e, "transport failure");
                return CaseReport::transport_failure(
                    case.id,
                    &case.name,
                    e.to_string(),
                    elapsed_ms(start),
                );
            }
        };

        let mut results = Vec::with_capacity(case.assertions.len());
        for assertion in &case.assertions {
            let result = evaluate(assertion, &response);
            let failed = !result.passed;
            results.push(result);

            if failed && case.stop_on_failure {
                break;
            }
        }

        let report = CaseReport::from_results(case.id, &case.name, results, elapsed_ms(start));
        tracing::info!(case = %case.name, outcome = ?report.outcome, "check finished");
        report
    }

    /// Runs every case in order and aggregates a suite report.
    ///
    /// Failures are local to the case that produced them; the suite
    /// always completes and reports.
    pub async fn run_suite(&self, cases: &[CheckCase], config: &HarnessConfig) -> SuiteReport {
        let started_at = Utc::now();
        let start = Instant::now();

        let mut reports = Vec::with_capacity(cases.len());
        for case in cases {
            reports.push(self.run(case, config).await);
        }

        SuiteReport::new(started_at, reports, elapsed_ms(start))
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use clinicheck_domain::{Assertion, CaseOutcome, CheckResponse};

    use crate::client::TransportError;

    /// Transport fake returning a canned response per path.
    struct FakeClient {
        responses: HashMap<String, CheckResponse>,
    }

    impl FakeClient {
        fn with_response(path: &str, response: CheckResponse) -> Self {
            let mut responses = HashMap::new();
            responses.insert(path.to_string(), response);
            Self { responses }
        }
    }

    #[async_trait]
    impl HttpClient for FakeClient {
        async fn execute(
            &self,
            case: &CheckCase,
            _url: &str,
        ) -> Result<CheckResponse, TransportError> {
            self.responses
                .get(&case.path)
                .cloned()
                .ok_or_else(|| TransportError::ConnectionRefused {
                    host: "localhost".to_string(),
                })
        }
    }

    fn json_response(status: u16, body: &str) -> CheckResponse {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        CheckResponse::new(status, headers, body, Duration::from_millis(5))
    }

    fn config() -> HarnessConfig {
        HarnessConfig::default()
    }

    #[tokio::test]
    async fn test_passing_case() {
        let client =
            FakeClient::with_response("/actuator/health", json_response(200, r#"{"status":"UP"}"#));
        let runner = CaseRunner::new(client);

        let case = CheckCase::get("health check", "/actuator/health")
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::json_path_equals("status", serde_json::json!("UP")));

        let report = runner.run(&case, &config()).await;
        assert_eq!(report.outcome, CaseOutcome::Passed);
        assert_eq!(report.results.len(), 2);
    }

    #[tokio::test]
    async fn test_degraded_health_fails() {
        let client = FakeClient::with_response(
            "/actuator/health",
            json_response(200, r#"{"status":"DEGRADED"}"#),
        );
        let runner = CaseRunner::new(client);

        let case = CheckCase::get("health check", "/actuator/health")
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::json_path_equals("status", serde_json::json!("UP")));

        let report = runner.run(&case, &config()).await;
        assert_eq!(report.outcome, CaseOutcome::Failed);
        // Report-all: the passing status assertion is still recorded.
        assert_eq!(report.results.len(), 2);
        assert!(report.results[0].passed);
        assert!(!report.results[1].passed);
    }

    #[tokio::test]
    async fn test_stop_on_failure() {
        let client = FakeClient::with_response("/clinics", json_response(403, "{}"));
        let runner = CaseRunner::new(client);

        let case = CheckCase::get("list clinics", "/clinics")
            .with_stop_on_failure(true)
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::json_content_type());

        let report = runner.run(&case, &config()).await;
        assert_eq!(report.outcome, CaseOutcome::Failed);
        assert_eq!(report.results.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_a_failed_case() {
        let client = FakeClient {
            responses: HashMap::new(),
        };
        let runner = CaseRunner::new(client);

        let case = CheckCase::get("list clinics", "/clinics").with_assertion(Assertion::status(200));
        let report = runner.run(&case, &config()).await;

        assert!(matches!(report.outcome, CaseOutcome::Transport { .. }));
        assert!(report.results.is_empty());
        assert_eq!(
            report.failures(),
            vec!["transport failure: connection refused by localhost".to_string()]
        );
    }

    #[tokio::test]
    async fn test_invalid_case_reported_not_sent() {
        let client = FakeClient {
            responses: HashMap::new(),
        };
        let runner = CaseRunner::new(client);

        let case = CheckCase::get("bad path", "clinics").with_assertion(Assertion::status(200));
        let report = runner.run(&case, &config()).await;

        // Not a transport failure: the request was never sent.
        assert!(matches!(report.outcome, CaseOutcome::Invalid { .. }));
        assert!(report.results.is_empty());
        assert_eq!(
            report.failures(),
            vec!["invalid case definition: invalid path: clinics".to_string()]
        );
    }

    #[tokio::test]
    async fn test_suite_continues_past_failures() {
        let client = FakeClient::with_response(
            "/actuator/health",
            json_response(200, r#"{"status":"UP"}"#),
        );
        let runner = CaseRunner::new(client);

        let cases = vec![
            // No canned response registered for /clinics: transport failure.
            CheckCase::get("list clinics", "/clinics").with_assertion(Assertion::status(200)),
            CheckCase::get("health check", "/actuator/health")
                .with_assertion(Assertion::status(200)),
        ];

        let report = runner.run_suite(&cases, &config()).await;
        assert_eq!(report.total, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
    }
}
