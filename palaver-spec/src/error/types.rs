//! Core error types.

use thiserror::Error;

/// Errors produced by palaver adapters, registries and helpers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    /// A required configuration value is missing or malformed.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// No API key could be resolved for an upstream vendor.
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// The upstream vendor answered with a non-success status.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Transport-level failure talking to an upstream vendor.
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Timeout: {0}")]
    TimeoutError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    /// A payload was well-formed JSON but not in the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The chunk source failed mid-iteration.
    #[error("Stream error: {0}")]
    StreamError(String),

    /// The requested adapter id is not registered.
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// An adapter with the same id is already registered.
    #[error("Provider already registered: {0}")]
    DuplicateProvider(String),

    /// Neither the requested adapter nor any fallback is reachable.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// `send_message` was called on an adapter after `teardown`.
    #[error("Adapter '{0}' has been torn down")]
    AdapterTornDown(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Coarse error classes used by callers to decide how to surface a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Upstream,
    Stream,
    Registry,
    Lifecycle,
    Validation,
    Internal,
}

impl ChatError {
    /// Build an `ApiError` without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Build a `ConfigurationError` naming a missing environment variable.
    pub fn not_configured(var: &str) -> Self {
        Self::ConfigurationError(format!("{var} is not configured"))
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError(_) | Self::MissingApiKey(_) => ErrorCategory::Configuration,
            Self::ApiError { .. }
            | Self::HttpError(_)
            | Self::TimeoutError(_)
            | Self::JsonError(_)
            | Self::ParseError(_) => ErrorCategory::Upstream,
            Self::StreamError(_) => ErrorCategory::Stream,
            Self::ProviderNotFound(_)
            | Self::DuplicateProvider(_)
            | Self::ProviderUnavailable(_) => ErrorCategory::Registry,
            Self::AdapterTornDown(_) => ErrorCategory::Lifecycle,
            Self::ValidationError(_) => ErrorCategory::Validation,
            Self::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether retrying the same call may succeed.
    ///
    /// Nothing in palaver retries on its own; this is a hint for adapter-owned
    /// network clients.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TimeoutError(_) | Self::HttpError(_) => true,
            Self::ApiError { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(
            ChatError::not_configured("DEEPSEEK_API_KEY").category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            ChatError::api_error(502, "bad gateway").category(),
            ErrorCategory::Upstream
        );
        assert_eq!(
            ChatError::StreamError("eof".into()).category(),
            ErrorCategory::Stream
        );
        assert_eq!(
            ChatError::ProviderNotFound("nope".into()).category(),
            ErrorCategory::Registry
        );
        assert_eq!(
            ChatError::AdapterTornDown("vapi".into()).category(),
            ErrorCategory::Lifecycle
        );
    }

    #[test]
    fn not_configured_names_the_variable() {
        let err = ChatError::not_configured("DEEPSEEK_API_KEY");
        assert!(err.to_string().contains("DEEPSEEK_API_KEY"));
    }

    #[test]
    fn retryable_only_for_transient_failures() {
        assert!(ChatError::api_error(429, "slow down").is_retryable());
        assert!(ChatError::api_error(503, "unavailable").is_retryable());
        assert!(ChatError::TimeoutError("30s".into()).is_retryable());
        assert!(!ChatError::api_error(401, "unauthorized").is_retryable());
        assert!(!ChatError::ProviderNotFound("x".into()).is_retryable());
    }
}
