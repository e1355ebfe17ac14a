//! Check case definition.
//!
//! A check case is a fully self-describing acceptance check: the request
//! to send (method, path, optional body, optional credentials) and the
//! ordered assertions to evaluate against the response. Cases are
//! immutable once defined and serializable for reporting and for
//! file-based suites.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assertion::Assertion;
use crate::body::RequestBody;
use crate::error::{DomainError, DomainResult};
use crate::method::HttpMethod;

/// HTTP Basic credentials, sent preemptively on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicCredentials {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

impl BasicCredentials {
    /// Creates new credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the `Authorization` header value for these credentials.
    ///
    /// No challenge/response negotiation takes place; the header is
    /// attached to every attempt.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", BASE64.encode(raw.as_bytes()))
    }
}

/// A single acceptance check: one request and its assertions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckCase {
    /// Unique identifier, used in reports.
    #[serde(default = "generate_id")]
    pub id: Uuid,
    /// Case name.
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// URL path fragment, starting with '/'.
    pub path: String,
    /// Optional request body.
    #[serde(default)]
    pub body: RequestBody,
    /// Optional basic-auth credentials.
    #[serde(default)]
    pub credentials: Option<BasicCredentials>,
    /// Assertions, evaluated in declared order.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Whether to stop evaluating after the first failed assertion.
    #[serde(default)]
    pub stop_on_failure: bool,
}

fn generate_id() -> Uuid {
    Uuid::now_v7()
}

impl CheckCase {
    /// Creates a new case with the given method and path.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            method,
            path: path.into(),
            body: RequestBody::None,
            credentials: None,
            assertions: Vec::new(),
            stop_on_failure: false,
        }
    }

    /// Creates a GET case.
    #[must_use]
    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Get, path)
    }

    /// Creates a POST case.
    #[must_use]
    pub fn post(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Post, path)
    }

    /// Attaches basic-auth credentials (builder pattern).
    #[must_use]
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(BasicCredentials::new(username, password));
        self
    }

    /// Attaches a JSON body (builder pattern).
    #[must_use]
    pub fn with_json_body(mut self, content: impl Into<String>) -> Self {
        self.body = RequestBody::json(content);
        self
    }

    /// Adds an assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Sets whether evaluation stops on the first failed assertion.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Validates the case definition.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPath`] if the path does not start
    /// with '/', or [`DomainError::InvalidBody`] if an attached body is
    /// not valid JSON text.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.path.starts_with('/') {
            return Err(DomainError::InvalidPath(self.path.clone()));
        }
        if let Some(content) = self.body.content() {
            serde_json::from_str::<serde_json::Value>(content)
                .map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_credentials_header() {
        let creds = BasicCredentials::new("admin", "admin");
        // base64("admin:admin")
        assert_eq!(creds.authorization_header(), "Basic YWRtaW46YWRtaW4=");
    }

    #[test]
    fn test_case_builder() {
        let case = CheckCase::get("list clinics", "/clinics")
            .with_basic_auth("admin", "admin")
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::json_content_type());

        assert_eq!(case.name, "list clinics");
        assert_eq!(case.method, HttpMethod::Get);
        assert_eq!(case.path, "/clinics");
        assert!(case.credentials.is_some());
        assert_eq!(case.assertions.len(), 2);
        assert!(!case.stop_on_failure);
    }

    #[test]
    fn test_validate_rejects_relative_path() {
        let case = CheckCase::get("bad", "clinics");
        assert_eq!(
            case.validate(),
            Err(DomainError::InvalidPath("clinics".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_malformed_body() {
        let case = CheckCase::post("bad body", "/clinics").with_json_body("{not json}");
        assert!(matches!(case.validate(), Err(DomainError::InvalidBody(_))));
    }

    #[test]
    fn test_validate_accepts_well_formed_case() {
        let case = CheckCase::post("create clinic", "/clinics")
            .with_json_body(r#"{"name":"Test Clinic"}"#);
        assert!(case.validate().is_ok());
    }

    #[test]
    fn test_case_serde_round_trip() {
        let case = CheckCase::post("create clinic", "/clinics")
            .with_basic_auth("admin", "admin")
            .with_json_body(r#"{"name":"Test Clinic"}"#)
            .with_assertion(Assertion::status(201));

        let json = serde_json::to_string(&case).unwrap();
        let back: CheckCase = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, case.name);
        assert_eq!(back.assertions, case.assertions);
        assert_eq!(back.credentials, case.credentials);
        assert_eq!(back.body, case.body);
    }
}
