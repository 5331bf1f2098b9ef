//! Session manager: the authentication lifecycle.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, RegisterRequest};
use crate::domain::entities::{AuthToken, Identity, Session, SessionState};
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, TokenStoragePort};

/// Owns the process-wide [`Session`] and every operation that may mutate it.
///
/// Constructed once at startup and hydrated before the first render, so
/// every consumer that asks "who is logged in" sees committed state, never
/// a half-applied login.
pub struct SessionManager {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn TokenStoragePort>,
    session: Session,
}

impl SessionManager {
    /// Creates a new manager with an empty, anonymous session.
    #[must_use]
    pub fn new(auth_port: Arc<dyn AuthPort>, storage_port: Arc<dyn TokenStoragePort>) -> Self {
        Self {
            auth_port,
            storage_port,
            session: Session::new(),
        }
    }

    /// Returns the session for reading.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the current token, `""` when anonymous.
    #[must_use]
    pub fn current_token(&self) -> &str {
        self.session.token()
    }

    /// Returns the current identity, if any.
    #[must_use]
    pub fn current_identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    /// Returns the current token as a value object for request signing.
    #[must_use]
    pub fn auth_token(&self) -> Option<AuthToken> {
        AuthToken::new(self.session.token())
    }

    /// Returns whether a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Restores the session from the persisted token slot.
    ///
    /// Called exactly once at startup, before anything reads the session.
    /// No stored token leaves the session anonymous. A stored token that
    /// does not decode is an inconsistent slot this build cannot have
    /// written; it is cleared and hydration concludes anonymous rather
    /// than failing the application.
    pub async fn hydrate(&mut self) -> bool {
        debug!("Hydrating session from stored token");

        let stored = match self.storage_port.get_token().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Failed to read the token slot");
                None
            }
        };

        let Some(token) = stored else {
            debug!("No stored token, session stays anonymous");
            return false;
        };

        match token.decode_identity() {
            Ok(identity) => {
                info!(user = %identity.name(), "Session restored from stored token");
                self.session.authenticate(token.into_inner(), identity);
                true
            }
            Err(e) => {
                warn!(error = %e, "Stored token does not decode, clearing the slot");
                if let Err(e) = self.storage_port.delete_token().await {
                    warn!(error = %e, "Failed to clear the bad token slot");
                }
                self.session.clear();
                false
            }
        }
    }

    /// Signs the user in.
    ///
    /// All-or-nothing with respect to session fields: token and identity
    /// are committed together after the exchange and decode both succeed,
    /// and on any failure neither is set.
    ///
    /// # Errors
    /// Returns the auth service rejection or transport error; the session
    /// is anonymous again when this returns `Err`.
    pub async fn login(&mut self, request: LoginRequest) -> Result<(), AuthError> {
        debug!(email = %request.email, "Attempting sign-in");
        self.session.start_authenticating();

        let result = self.sign_in_and_commit(&request).await;
        self.session.end_loading();

        match &result {
            Ok(()) => {
                let user = self.session.identity().map_or("?", Identity::name);
                info!(user = %user, "Sign-in successful");
            }
            Err(e) => {
                warn!(error = %e, "Sign-in failed");
                self.session.fail(e.to_string());
            }
        }

        result
    }

    async fn sign_in_and_commit(&mut self, request: &LoginRequest) -> Result<(), AuthError> {
        let token = self
            .auth_port
            .sign_in(&request.email, &request.password)
            .await?;

        let identity = token.decode_identity()?;

        if let Err(e) = self.storage_port.store_token(&token).await {
            // Stay signed in; the session just will not survive a restart.
            warn!(error = %e, "Failed to persist token");
        } else {
            debug!("Token persisted");
        }

        self.session.authenticate(token.into_inner(), identity);
        Ok(())
    }

    /// Registers a new account.
    ///
    /// Registration never authenticates; on success the caller tells the
    /// user to sign in. Session credentials are untouched either way.
    ///
    /// # Errors
    /// Returns the auth service rejection or transport error.
    pub async fn register(&mut self, request: RegisterRequest) -> Result<(), AuthError> {
        debug!(email = %request.email, "Attempting sign-up");
        self.session.begin_loading();

        let result = self
            .auth_port
            .sign_up(&request.name, &request.email, &request.password)
            .await;
        self.session.end_loading();

        match &result {
            Ok(()) => info!(email = %request.email, "Sign-up successful"),
            Err(e) => warn!(error = %e, "Sign-up failed"),
        }

        result
    }

    /// Signs the user out and clears the persisted token.
    ///
    /// Unconditional and idempotent; a failure to clear the slot is logged
    /// but the in-memory session is always reset.
    pub async fn logout(&mut self) {
        if self.session.state() == SessionState::Anonymous {
            debug!("Logout requested while anonymous");
        }

        self.session.clear();

        if let Err(e) = self.storage_port.delete_token().await {
            warn!(error = %e, "Failed to clear the stored token");
        } else {
            debug!("Stored token cleared");
        }
    }
}
