//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::AuthToken;
use crate::domain::errors::AuthError;

/// Port for auth service operations.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchanges credentials for a signed token.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthToken, AuthError>;

    /// Registers a new account. Does not authenticate; the user signs in
    /// afterwards.
    async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;

    /// Builds a decodable unsigned test token carrying the given claims.
    pub fn make_token_for(id: i64, name: &str, email: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            format!(r#"{{"id":{id},"name":"{name}","email":"{email}"}}"#).as_bytes(),
        );
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    /// Mock auth service for testing.
    pub struct MockAuthPort {
        should_succeed: Arc<AtomicBool>,
        token: String,
    }

    impl MockAuthPort {
        /// Creates a mock issuing a token for a fixed test identity.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                token: make_token_for(7, "Test User", "test@example.com"),
            }
        }

        /// Sets success behavior.
        pub fn set_should_succeed(&self, value: bool) {
            self.should_succeed.store(value, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl AuthPort for MockAuthPort {
        async fn sign_in(&self, _email: &str, _password: &str) -> Result<AuthToken, AuthError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(AuthToken::new_unchecked(self.token.clone()))
            } else {
                Err(AuthError::rejected("mock rejection"))
            }
        }

        async fn sign_up(
            &self,
            _name: &str,
            _email: &str,
            _password: &str,
        ) -> Result<(), AuthError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(AuthError::rejected("mock rejection"))
            }
        }
    }
}
