//! Check and suite reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assertion::AssertionResult;

/// Outcome of a single check case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Every assertion held.
    Passed,
    /// At least one assertion did not hold.
    Failed,
    /// The case definition itself was invalid; nothing was sent.
    Invalid {
        /// Validation error description.
        error: String,
    },
    /// The request could not be completed; no assertions were evaluated.
    Transport {
        /// Transport error description.
        error: String,
    },
}

impl CaseOutcome {
    /// Returns true for [`CaseOutcome::Passed`].
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Report for one executed check case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case identifier.
    pub case_id: Uuid,
    /// Case name.
    pub case_name: String,
    /// Overall outcome.
    pub outcome: CaseOutcome,
    /// Per-assertion results, in evaluation order.
    ///
    /// Empty when the outcome is [`CaseOutcome::Transport`].
    pub results: Vec<AssertionResult>,
    /// Case execution time in milliseconds.
    pub duration_ms: u64,
}

impl CaseReport {
    /// Builds a report from evaluated assertion results.
    ///
    /// The outcome is [`CaseOutcome::Passed`] iff every result passed.
    #[must_use]
    pub fn from_results(
        case_id: Uuid,
        case_name: impl Into<String>,
        results: Vec<AssertionResult>,
        duration_ms: u64,
    ) -> Self {
        let outcome = if results.iter().all(|r| r.passed) {
            CaseOutcome::Passed
        } else {
            CaseOutcome::Failed
        };
        Self {
            case_id,
            case_name: case_name.into(),
            outcome,
            results,
            duration_ms,
        }
    }

    /// Builds a report for a case whose definition failed validation.
    #[must_use]
    pub fn invalid_case(
        case_id: Uuid,
        case_name: impl Into<String>,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            case_id,
            case_name: case_name.into(),
            outcome: CaseOutcome::Invalid {
                error: error.into(),
            },
            results: Vec::new(),
            duration_ms,
        }
    }

    /// Builds a report for a case that failed at the transport level.
    #[must_use]
    pub fn transport_failure(
        case_id: Uuid,
        case_name: impl Into<String>,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            case_id,
            case_name: case_name.into(),
            outcome: CaseOutcome::Transport {
                error: error.into(),
            },
            results: Vec::new(),
            duration_ms,
        }
    }

    /// Messages for every failed assertion, expected vs. observed.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        match &self.outcome {
            CaseOutcome::Invalid { error } => vec![format!("invalid case definition: {error}")],
            CaseOutcome::Transport { error } => vec![format!("transport failure: {error}")],
            CaseOutcome::Passed | CaseOutcome::Failed => self
                .results
                .iter()
                .filter(|r| !r.passed)
                .map(|r| {
                    let detail = r.error.as_deref().unwrap_or("assertion failed");
                    format!("{}: {}", r.assertion.description(), detail)
                })
                .collect(),
        }
    }
}

/// Aggregated report across every case in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-case reports, in execution order.
    pub cases: Vec<CaseReport>,
    /// Total number of cases.
    pub total: usize,
    /// Number of cases that passed.
    pub passed: usize,
    /// Number of cases that failed (assertion or transport).
    pub failed: usize,
    /// Total run time in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Builds a suite report from per-case reports.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, cases: Vec<CaseReport>, duration_ms: u64) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|c| c.outcome.is_pass()).count();
        let failed = total - passed;
        Self {
            started_at,
            cases,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Returns true if every case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
