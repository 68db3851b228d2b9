//! Error types for Vidhi services
//!
//! Provides:
//! - Distinct error types for different failure modes
//! - A shared `Result` alias used across the workspace
//!
//! Transient source failures (a portal timing out, a page with no usable
//! content) are deliberately NOT errors: the fetcher absorbs them and
//! reports absence. Only failures that make a whole request or the whole
//! process unusable surface as `AppError`.

use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or missing static configuration (empty corpus, bad URL,
    /// malformed config file). Fatal at startup.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // External service errors
    #[error("Embedding service error: {message}")]
    Embedding { message: String },

    #[error("Embedding timeout after {timeout_ms}ms")]
    EmbeddingTimeout { timeout_ms: u64 },

    #[error("Reasoning service error: {message}")]
    Reasoner { message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    // Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Errors that should abort startup rather than degrade gracefully.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Configuration { .. })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_is_fatal() {
        let err = AppError::Configuration {
            message: "corpus is empty".into(),
        };
        assert!(err.is_fatal());
    }

    #[test]
    fn test_transient_errors_not_fatal() {
        let err = AppError::Embedding {
            message: "upstream 503".into(),
        };
        assert!(!err.is_fatal());

        let err = AppError::EmbeddingTimeout { timeout_ms: 7000 };
        assert!(!err.is_fatal());
    }
}
