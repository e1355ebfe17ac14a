//! HTTP client port and reqwest adapter.
//!
//! The runner talks to the network through the [`HttpClient`] trait so the
//! execution logic can be exercised against a fake transport in tests. The
//! production implementation wraps `reqwest::Client`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method};
use thiserror::Error;

use clinicheck_domain::{CheckCase, CheckResponse, HttpMethod};

/// Client timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport-level failures.
///
/// Any of these marks the owning case as failed without aborting the rest
/// of the run.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The resolved request URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body is not valid JSON text.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The request did not complete within the client timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The target host actively refused the connection.
    #[error("connection refused by {host}")]
    ConnectionRefused {
        /// Host that refused the connection.
        host: String,
    },

    /// The target host could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// Host that failed to resolve.
        host: String,
        /// Resolver error text.
        message: String,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Any other transport failure, including unreadable response bodies.
    #[error("{0}")]
    Other(String),
}

/// Port through which the runner performs HTTP exchanges.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request described by `case` to `url` and captures the
    /// response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request cannot be built or
    /// does not complete.
    async fn execute(&self, case: &CheckCase, url: &str) -> Result<CheckResponse, TransportError>;
}

/// HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Creates a client with the harness defaults: 30 second timeout,
    /// `clinicheck/<version>` user agent, redirects followed up to 10.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("clinicheck/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wraps a pre-configured reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts the domain method to a reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Attaches the case body, validating JSON syntax before send.
    fn attach_body(
        builder: reqwest::RequestBuilder,
        case: &CheckCase,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        match case.body.content() {
            None => Ok(builder),
            Some(content) => {
                serde_json::from_str::<serde_json::Value>(content)
                    .map_err(|e| TransportError::InvalidBody(e.to_string()))?;
                let mut builder = builder.body(content.to_string());
                if let Some(content_type) = case.body.content_type() {
                    builder = builder.header("Content-Type", content_type);
                }
                Ok(builder)
            }
        }
    }

    /// Maps reqwest errors to the transport taxonomy.
    fn map_error(error: &reqwest::Error) -> TransportError {
        let host = error
            .url()
            .and_then(|u| u.host_str())
            .unwrap_or("unknown")
            .to_string();

        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: u64::try_from(REQUEST_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            };
        }
        if error.is_connect() {
            let message = error.to_string();
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return TransportError::Dns { host, message };
            }
            if lowered.contains("refused") {
                return TransportError::ConnectionRefused { host };
            }
            return TransportError::Connection(message);
        }
        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, case: &CheckCase, url: &str) -> Result<CheckResponse, TransportError> {
        let parsed_url = reqwest::Url::parse(url)
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {url}")))?;

        let start = Instant::now();
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(case.method), parsed_url);

        // Preemptive basic auth: sent on every attempt, no challenge round.
        if let Some(credentials) = &case.credentials {
            builder = builder.header("Authorization", credentials.authorization_header());
        }

        builder = Self::attach_body(builder, case)?;

        tracing::debug!(method = %case.method, url, "sending request");
        let response = builder.send().await.map_err(|e| Self::map_error(&e))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?;
        let duration = start.elapsed();

        tracing::debug!(
            status,
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "response received"
        );
        Ok(CheckResponse::new(status, headers, body, duration))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(ReqwestClient::to_reqwest_method(HttpMethod::Get), Method::GET);
        assert_eq!(ReqwestClient::to_reqwest_method(HttpMethod::Post), Method::POST);
        assert_eq!(ReqwestClient::to_reqwest_method(HttpMethod::Delete), Method::DELETE);
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestClient::new().is_ok());
    }

    #[test]
    fn test_attach_body_rejects_malformed_json() {
        let case = CheckCase::post("bad", "/clinics").with_json_body("{not json}");
        let builder = Client::new().post("http://localhost:9091/clinics");
        let result = ReqwestClient::attach_body(builder, &case);
        assert!(matches!(result, Err(TransportError::InvalidBody(_))));
    }

    #[test]
    fn test_attach_body_accepts_valid_json() {
        let case = CheckCase::post("ok", "/clinics").with_json_body(r#"{"name":"Test Clinic"}"#);
        let builder = Client::new().post("http://localhost:9091/clinics");
        assert!(ReqwestClient::attach_body(builder, &case).is_ok());
    }
}
