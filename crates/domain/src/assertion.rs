//! Response assertions.
//!
//! An assertion is a predicate over a captured HTTP response. Assertions
//! are declared on a check case at authoring time and evaluated in order
//! by the engine once the response arrives.

use serde::{Deserialize, Serialize};

/// A single assertion to evaluate against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Response status code equals the expected value exactly.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Content-Type header contains the expected value.
    ///
    /// Substring match so `application/json; charset=utf-8` satisfies
    /// `application/json`.
    ContentType {
        /// Expected content type (partial match).
        expected: String,
    },
    /// Value at a JSON path equals the expected JSON value.
    JsonPathEquals {
        /// Dot path into the body (e.g. `_embedded.clinics` or `$.status`).
        path: String,
        /// Expected value.
        expected: serde_json::Value,
    },
    /// Value at a JSON path is an array with at least `min` elements.
    JsonPathCountAtLeast {
        /// Dot path into the body.
        path: String,
        /// Minimum array length (inclusive).
        min: usize,
    },
}

impl Assertion {
    /// Creates a status-code assertion.
    #[must_use]
    pub const fn status(expected: u16) -> Self {
        Self::StatusCode { expected }
    }

    /// Creates a `Content-Type: application/json` assertion.
    #[must_use]
    pub fn json_content_type() -> Self {
        Self::ContentType {
            expected: "application/json".to_string(),
        }
    }

    /// Creates a JSON-path equality assertion.
    #[must_use]
    pub fn json_path_equals(path: impl Into<String>, expected: serde_json::Value) -> Self {
        Self::JsonPathEquals {
            path: path.into(),
            expected,
        }
    }

    /// Creates a JSON-path array-size assertion.
    #[must_use]
    pub fn json_path_count_at_least(path: impl Into<String>, min: usize) -> Self {
        Self::JsonPathCountAtLeast {
            path: path.into(),
            min,
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::ContentType { expected } => format!("Content-Type contains '{expected}'"),
            Self::JsonPathEquals { path, expected } => format!("JSON {path} equals {expected}"),
            Self::JsonPathCountAtLeast { path, min } => {
                format!("JSON {path} is an array with >= {min} elements")
            }
        }
    }
}

/// Result of evaluating a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// The assertion that was evaluated.
    pub assertion: Assertion,
    /// Whether the assertion held.
    pub passed: bool,
    /// Actual value observed (for display).
    pub actual: Option<String>,
    /// Error message if the assertion failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with the observed value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with the observed value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}
