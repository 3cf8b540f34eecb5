//! Error types for docsearch operations

use serde::{Deserialize, Serialize};

/// Structured error payload shared between service and client.
///
/// Used as the HTTP error body in docsearch-service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: String,
}

impl ErrorEnvelope {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self::new("internal_error", msg, "Check service logs for details")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocsearchError {
    #[error("Search backend error [{code}]: {message} ({hint})")]
    Backend {
        code: String,
        message: String,
        hint: String,
    },

    #[error("Result cache error: {0}")]
    Cache(String),

    #[error("Invalid namespace {0:?}: must be non-empty and must not contain ':'")]
    InvalidNamespace(String),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocsearchError {
    pub fn backend(
        code: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Backend {
            code: code.into(),
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Envelope form for transport layers.
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            Self::Backend {
                code,
                message,
                hint,
            } => ErrorEnvelope::new(code.clone(), message.clone(), hint.clone()),
            other => ErrorEnvelope::internal(&other.to_string()),
        }
    }
}

/// Check if a backend error has a specific error code
pub fn is_error_code(err: &DocsearchError, code: &str) -> bool {
    matches!(err, DocsearchError::Backend { code: c, .. } if c == code)
}
