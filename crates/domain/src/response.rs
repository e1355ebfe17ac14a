//! Captured HTTP response.
//!
//! The engine captures the interesting parts of a response into a plain
//! value so assertions can be evaluated without holding any transport
//! resources.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A captured HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CheckResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body as text.
    pub body: String,
    /// Time from send to full body receipt.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl CheckResponse {
    /// Creates a response from captured parts.
    #[must_use]
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        body: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            duration,
        }
    }

    /// Looks up a header by name, case-insensitively.
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Returns the Content-Type header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&String> {
        self.get_header("content-type")
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response_with_header(name: &str, value: &str) -> CheckResponse {
        let mut headers = HashMap::new();
        headers.insert(name.to_string(), value.to_string());
        CheckResponse::new(200, headers, "", Duration::from_millis(10))
    }

    #[test]
    fn test_get_header_case_insensitive() {
        let response = response_with_header("Content-Type", "application/json");
        assert_eq!(
            response.get_header("content-type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            response.content_type(),
            Some(&"application/json".to_string())
        );
        assert_eq!(response.get_header("missing"), None);
    }
}
