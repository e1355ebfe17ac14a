//! Harness configuration.
//!
//! Read once before any case executes and immutable thereafter; the
//! runner takes it explicitly rather than through ambient global state.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Environment variable naming the target base URL.
pub const BASE_URL_ENV: &str = "TEST_BASE_URL";

/// Base URL used when no override is supplied.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9091";

/// Process-wide harness configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Base URL every case path is resolved against.
    pub base_url: Url,
}

impl HarnessConfig {
    /// Creates a configuration from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBaseUrl`] if the string is not an
    /// absolute URL.
    pub fn new(base_url: &str) -> DomainResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DomainError::InvalidBaseUrl(format!("{e}: {base_url}")))?;
        Ok(Self { base_url })
    }

    /// Creates a configuration from the `TEST_BASE_URL` environment
    /// variable, falling back to `http://localhost:9091`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBaseUrl`] if the supplied value is
    /// not an absolute URL.
    pub fn from_env() -> DomainResult<Self> {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    /// Resolves a case path against the base URL.
    ///
    /// Plain concatenation with a trailing-slash trim, so `/clinics`
    /// against `http://localhost:9091` and `http://localhost:9091/` both
    /// yield `http://localhost:9091/clinics`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        // The default is a compile-time constant known to parse.
        #[allow(clippy::unwrap_used)]
        let base_url = Url::parse(DEFAULT_BASE_URL).unwrap();
        Self { base_url }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_base_url() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:9091/");
    }

    #[test]
    fn test_endpoint_join() {
        let config = HarnessConfig::new("http://localhost:9091").unwrap();
        assert_eq!(config.endpoint("/clinics"), "http://localhost:9091/clinics");

        let config = HarnessConfig::new("https://clinic.example.com/api/").unwrap();
        assert_eq!(
            config.endpoint("/actuator/health"),
            "https://clinic.example.com/api/actuator/health"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HarnessConfig::new("not a url"),
            Err(DomainError::InvalidBaseUrl(_))
        ));
    }
}
