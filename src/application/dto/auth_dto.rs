//! Authentication DTOs.

/// Credentials entered on the sign-in form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl LoginRequest {
    /// Creates a new login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Data entered on the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl RegisterRequest {
    /// Creates a new register request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}
