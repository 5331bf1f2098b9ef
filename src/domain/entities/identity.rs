//! Authenticated user identity.

use serde::Deserialize;

/// Identity decoded from the auth token claims.
///
/// Never constructed by the client directly; it only comes out of
/// [`AuthToken::decode_identity`](super::AuthToken::decode_identity).
/// Unknown claims (`exp` and friends) are ignored on parse.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    id: i64,
    name: String,
    email: String,
}

impl Identity {
    /// Returns the user id.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Returns the user display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
impl Identity {
    /// Builds an identity directly; tests only, production code decodes.
    pub fn for_tests(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_from_claims_json() {
        let identity: Identity = serde_json::from_str(
            r#"{"id":42,"email":"kim@example.com","name":"Kim","exp":4102444800,"iat":1}"#,
        )
        .unwrap();

        assert_eq!(identity.id(), 42);
        assert_eq!(identity.name(), "Kim");
        assert_eq!(identity.email(), "kim@example.com");
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let result: Result<Identity, _> = serde_json::from_str(r#"{"id":42}"#);
        assert!(result.is_err());
    }
}
