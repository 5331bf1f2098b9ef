//! Process-wide authentication session state.

use crate::domain::entities::Identity;

/// Authentication lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No user is logged in.
    #[default]
    Anonymous,
    /// A login attempt is in flight.
    Authenticating,
    /// A user is logged in.
    Authenticated,
    /// The last attempt failed; transient, returns to `Anonymous`.
    Error,
}

/// The single source of truth for "who is logged in".
///
/// Exactly one `Session` exists for the process lifetime, owned by the
/// [`SessionManager`](crate::application::SessionManager); everything else
/// reads it by reference. Token and identity always transition together:
/// the session is authenticated iff the token is non-empty and an identity
/// is present, and the only mutators below preserve that.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: String,
    identity: Option<Identity>,
    state: SessionState,
    is_loading: bool,
    last_error: Option<String>,
}

impl Session {
    /// Creates an empty, anonymous session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current token, `""` when anonymous.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the current identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns whether a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty() && self.identity.is_some()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns whether an auth operation is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Returns the last auth failure message, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Marks an auth operation as started.
    pub(crate) fn begin_loading(&mut self) {
        self.is_loading = true;
    }

    /// Marks the in-flight auth operation as finished.
    pub(crate) fn end_loading(&mut self) {
        self.is_loading = false;
    }

    /// Commits a successful authentication: token and identity together.
    pub(crate) fn authenticate(&mut self, token: String, identity: Identity) {
        debug_assert!(!token.is_empty());
        self.token = token;
        self.identity = Some(identity);
        self.state = SessionState::Authenticated;
        self.last_error = None;
    }

    /// Records a failed attempt; the session stays (or becomes) anonymous.
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.state = SessionState::Error;
        self.last_error = Some(message.into());
        self.reset_credentials();
        self.state = SessionState::Anonymous;
    }

    /// Transitions into the authenticating state.
    pub(crate) fn start_authenticating(&mut self) {
        self.state = SessionState::Authenticating;
        self.last_error = None;
        self.begin_loading();
    }

    /// Clears all credentials; idempotent.
    pub(crate) fn clear(&mut self) {
        self.reset_credentials();
        self.state = SessionState::Anonymous;
        self.last_error = None;
    }

    fn reset_credentials(&mut self) {
        self.token.clear();
        self.identity = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::for_tests(1, "Ada", "ada@example.com")
    }

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new();

        assert_eq!(session.token(), "");
        assert!(session.identity().is_none());
        assert!(!session.is_authenticated());
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_authenticate_sets_both_fields_together() {
        let mut session = Session::new();
        session.authenticate("a.b.c".into(), identity());

        assert!(session.is_authenticated());
        assert_eq!(session.token(), "a.b.c");
        assert_eq!(session.identity().unwrap().name(), "Ada");
        assert_eq!(session.state(), SessionState::Authenticated);
    }

    #[test]
    fn test_fail_leaves_session_anonymous_with_message() {
        let mut session = Session::new();
        session.start_authenticating();
        session.fail("bad credentials");
        session.end_loading();

        assert!(!session.is_authenticated());
        assert_eq!(session.token(), "");
        assert!(session.identity().is_none());
        assert_eq!(session.state(), SessionState::Anonymous);
        assert_eq!(session.last_error(), Some("bad credentials"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut session = Session::new();
        session.authenticate("a.b.c".into(), identity());

        session.clear();
        let after_once = format!("{session:?}");
        session.clear();
        let after_twice = format!("{session:?}");

        assert!(!session.is_authenticated());
        assert_eq!(after_once, after_twice);
    }

    #[test]
    fn test_invariant_holds_through_transitions() {
        let mut session = Session::new();
        assert_eq!(
            session.is_authenticated(),
            !session.token().is_empty() && session.identity().is_some()
        );

        session.start_authenticating();
        session.authenticate("a.b.c".into(), identity());
        assert_eq!(
            session.is_authenticated(),
            !session.token().is_empty() && session.identity().is_some()
        );

        session.clear();
        assert_eq!(
            session.is_authenticated(),
            !session.token().is_empty() && session.identity().is_some()
        );
    }
}
