//! Request body types

use serde::{Deserialize, Serialize};

/// Request body attached to a check case.
///
/// The harness only ever sends JSON payloads; the body text is sent
/// unmodified, byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Raw JSON body
    Json {
        /// The body text; must be valid JSON when sent.
        content: String,
    },
}

impl RequestBody {
    /// Creates a JSON body.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Json {
            content: content.into(),
        }
    }

    /// Returns whether no body is attached.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the body content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Json { content } => Some(content),
        }
    }

    /// Returns the content type to send with this body, if applicable.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json { .. } => Some("application/json"),
        }
    }
}
