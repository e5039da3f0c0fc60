//! Error types for Gemini API integration

use thiserror::Error;

/// Errors that can occur when interacting with the Gemini API
#[derive(Debug, Error)]
pub enum GeminiError {
    /// API key is not configured
    #[error("API key not configured. Set GEMINI_API_KEY or run :key <api-key>")]
    ApiKeyNotFound,

    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    KeyringError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("Request timed out")]
    TimedOut,

    /// The service rejected the API key
    #[error("API key rejected by the service")]
    Unauthorized,

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Rate limited by the API
    #[error("Rate limited. Retry after {retry_after_seconds} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_seconds: u64,
    },

    /// Response contained no generated text
    #[error("Empty response{}", .reason.as_deref().map(|r| format!(" ({r})")).unwrap_or_default())]
    EmptyResponse {
        /// Finish or block reason reported by the API, if any
        reason: Option<String>,
    },

    /// Request was cancelled by user
    #[error("Request cancelled")]
    Cancelled,

    /// Invalid API key format
    #[error("Invalid API key format. Gemini keys start with 'AIza'")]
    InvalidApiKey,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GeminiError {
    /// Check if this error is recoverable (user can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GeminiError::RateLimited { .. }
                | GeminiError::RequestError(_)
                | GeminiError::TimedOut
                | GeminiError::Cancelled
        )
    }

    /// Check if this error requires a new API key
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            GeminiError::ApiKeyNotFound | GeminiError::InvalidApiKey | GeminiError::Unauthorized
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_response_mentions_reason() {
        let err = GeminiError::EmptyResponse { reason: Some("SAFETY".into()) };
        assert_eq!(err.to_string(), "Empty response (SAFETY)");
        let err = GeminiError::EmptyResponse { reason: None };
        assert_eq!(err.to_string(), "Empty response");
    }

    #[test]
    fn auth_errors_require_reauth() {
        assert!(GeminiError::Unauthorized.requires_reauth());
        assert!(GeminiError::ApiKeyNotFound.requires_reauth());
        assert!(!GeminiError::RateLimited { retry_after_seconds: 5 }.requires_reauth());
    }

    #[test]
    fn rate_limit_is_recoverable() {
        assert!(GeminiError::RateLimited { retry_after_seconds: 5 }.is_recoverable());
        assert!(!GeminiError::Unauthorized.is_recoverable());
    }
}
