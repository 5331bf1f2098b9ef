//! Authentication token value object.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::domain::entities::Identity;
use crate::domain::errors::AuthError;

/// Signed authentication token issued by the auth service.
///
/// The token is an opaque three-segment JWT. The client never constructs
/// one; it only carries the string and parses the claims payload.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    value: String,
}

impl AuthToken {
    /// Creates a new token with structural validation.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return None;
        }

        let mut segments = value.split('.');
        let well_formed = segments.clone().count() == 3 && segments.all(|s| !s.is_empty());
        if !well_formed {
            return None;
        }

        Some(Self { value })
    }

    /// Creates a token without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consumes the token and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.value
    }

    /// Parses the identity claims out of the token payload.
    ///
    /// The signature is not verified here; the auth service signed the
    /// token and the poll service verifies it on every request. This only
    /// reads the claims the services put there.
    ///
    /// # Errors
    /// Returns [`AuthError::TokenDecodeFailed`] if the payload segment is
    /// not valid base64url or does not carry the expected claims.
    pub fn decode_identity(&self) -> Result<Identity, AuthError> {
        let payload = self
            .value
            .split('.')
            .nth(1)
            .ok_or_else(|| AuthError::decode_failed("token has no payload segment"))?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| AuthError::decode_failed(format!("payload is not base64url: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::decode_failed(format!("claims do not match: {e}")))
    }

    /// Returns a masked form safe for display and logs.
    #[must_use]
    pub fn masked(&self) -> String {
        if self.value.len() <= 10 {
            return "*".repeat(self.value.len());
        }

        let visible_prefix = &self.value[..4];
        let visible_suffix = &self.value[self.value.len() - 4..];
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}
