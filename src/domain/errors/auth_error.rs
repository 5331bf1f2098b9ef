//! Authentication error types.

use thiserror::Error;

/// Authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("invalid token format: {reason}")]
    InvalidTokenFormat { reason: String },

    #[error("failed to decode token claims: {reason}")]
    TokenDecodeFailed { reason: String },

    #[error("rejected by the auth service: {message}")]
    Rejected { message: String },

    #[error("failed to retrieve stored token: {message}")]
    TokenRetrievalFailed { message: String },

    #[error("failed to store token: {message}")]
    TokenStorageFailed { message: String },

    #[error("no authentication token available")]
    NoTokenAvailable,

    #[error("network error during authentication: {message}")]
    NetworkError { message: String },

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates an invalid format error.
    #[must_use]
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidTokenFormat {
            reason: reason.into(),
        }
    }

    /// Creates a claims decode error.
    #[must_use]
    pub fn decode_failed(reason: impl Into<String>) -> Self {
        Self::TokenDecodeFailed {
            reason: reason.into(),
        }
    }

    /// Creates a credentials-rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates a retrieval failed error.
    #[must_use]
    pub fn retrieval_failed(message: impl Into<String>) -> Self {
        Self::TokenRetrievalFailed {
            message: message.into(),
        }
    }

    /// Creates a storage failed error.
    #[must_use]
    pub fn storage_failed(message: impl Into<String>) -> Self {
        Self::TokenStorageFailed {
            message: message.into(),
        }
    }

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the user can recover by retrying or re-entering
    /// credentials.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Rejected { .. } | Self::NoTokenAvailable
        )
    }

    /// Returns whether the error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }
}
