//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AuthToken;
use crate::domain::errors::AuthError;

/// Port for the single persisted-token slot.
///
/// Only the session manager writes or clears the slot; reads funnel
/// through hydration at startup.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves the stored token.
    async fn get_token(&self) -> Result<Option<AuthToken>, AuthError>;

    /// Stores the token.
    async fn store_token(&self, token: &AuthToken) -> Result<(), AuthError>;

    /// Deletes the stored token; absent is not an error.
    async fn delete_token(&self) -> Result<(), AuthError>;

    /// Checks whether a token exists.
    async fn has_token(&self) -> Result<bool, AuthError> {
        Ok(self.get_token().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use std::sync::Arc;

    use tokio::sync::RwLock;

    use super::*;

    /// In-memory token slot for testing.
    pub struct MockTokenStorage {
        token: Arc<RwLock<Option<AuthToken>>>,
    }

    impl MockTokenStorage {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self {
                token: Arc::new(RwLock::new(None)),
            }
        }

        /// Creates mock storage seeded with a token.
        pub fn with_token(token: AuthToken) -> Self {
            Self {
                token: Arc::new(RwLock::new(Some(token))),
            }
        }
    }

    impl Default for MockTokenStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl TokenStoragePort for MockTokenStorage {
        async fn get_token(&self) -> Result<Option<AuthToken>, AuthError> {
            Ok(self.token.read().await.clone())
        }

        async fn store_token(&self, token: &AuthToken) -> Result<(), AuthError> {
            *self.token.write().await = Some(token.clone());
            Ok(())
        }

        async fn delete_token(&self) -> Result<(), AuthError> {
            *self.token.write().await = None;
            Ok(())
        }
    }
}
