//! Auth service HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::dto::{ErrorResponse, LoginFields, SignInBody, SignUpBody, TokenEnvelope, UserFields};
use crate::domain::entities::AuthToken;
use crate::domain::errors::AuthError;
use crate::domain::ports::AuthPort;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Auth service REST client.
pub struct AuthServiceClient {
    client: Client,
    base_url: String,
}

impl AuthServiceClient {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    /// Returns an error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AuthError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn map_transport_error(e: &reqwest::Error) -> AuthError {
        if e.is_timeout() {
            AuthError::network("request timed out")
        } else if e.is_connect() {
            AuthError::network("failed to connect to the auth service")
        } else {
            AuthError::network(e.to_string())
        }
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> AuthError {
        let error_message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.error,
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => {
                AuthError::rejected(error_message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                AuthError::network("the auth service is temporarily unavailable")
            }
            _ => AuthError::unexpected(format!("unexpected response: {status} - {error_message}")),
        }
    }
}

#[async_trait]
impl AuthPort for AuthServiceClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthToken, AuthError> {
        let url = format!("{}/sign-in", self.base_url);

        debug!("Exchanging credentials for a token");

        let response = self
            .client
            .post(&url)
            .json(&SignInBody {
                login: LoginFields { email, password },
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach the auth service");
                Self::map_transport_error(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let envelope: TokenEnvelope = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse sign-in response");
            AuthError::unexpected(format!("failed to parse response: {e}"))
        })?;

        debug!("Sign-in accepted by the auth service");

        AuthToken::new(&envelope.token)
            .ok_or_else(|| AuthError::invalid_format("auth service returned a malformed token"))
    }

    async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        let url = format!("{}/sign-up", self.base_url);

        debug!("Registering a new account");

        let response = self
            .client
            .post(&url)
            .json(&SignUpBody {
                user: UserFields {
                    name,
                    email,
                    password,
                },
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach the auth service");
                Self::map_transport_error(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        debug!("Sign-up accepted by the auth service");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AuthServiceClient::new("http://localhost:9000");
        assert!(client.is_ok());
    }
}
