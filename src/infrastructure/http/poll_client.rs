//! Poll service HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::dto::{
    CreatePollBody, ErrorResponse, MessageEnvelope, OptionsEnvelope, PollFields, PollsEnvelope,
    SubmitVoteBody, UpdatePollBody, VotesEnvelope,
};
use crate::domain::entities::{AuthToken, OptionId, Poll, PollId, PollOption, VoteRecord};
use crate::domain::errors::ApiError;
use crate::domain::ports::{NewPoll, PollDataPort};

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Poll service REST client. Every request carries the session token as a
/// bearer credential.
pub struct PollServiceClient {
    client: Client,
    base_url: String,
}

impl PollServiceClient {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    /// Returns an error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn map_transport_error(e: &reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::network("request timed out")
        } else if e.is_connect() {
            ApiError::network("failed to connect to the poll service")
        } else {
            ApiError::network(e.to_string())
        }
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> ApiError {
        let error_message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.error,
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::UNAUTHORIZED => ApiError::unauthorized(error_message),
            StatusCode::BAD_REQUEST => ApiError::bad_request(error_message),
            StatusCode::NOT_FOUND => ApiError::not_found(error_message),
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                ApiError::unavailable("the poll service is temporarily unavailable")
            }
            _ => ApiError::unexpected(format!("unexpected response: {status} - {error_message}")),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::handle_error_response(status, response).await)
        }
    }
}

#[async_trait]
impl PollDataPort for PollServiceClient {
    async fn fetch_polls(&self, token: &AuthToken, user_id: i64) -> Result<Vec<Poll>, ApiError> {
        let url = format!("{}/polls", self.base_url);

        debug!(user_id, "Fetching polls");

        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        let envelope: PollsEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::unexpected(format!("failed to parse polls: {e}")))?;

        Ok(envelope.polls.unwrap_or_default())
    }

    async fn create_poll(
        &self,
        token: &AuthToken,
        user_id: i64,
        poll: &NewPoll,
    ) -> Result<String, ApiError> {
        let url = format!("{}/polls", self.base_url);

        debug!(user_id, title = %poll.title, "Creating poll");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&CreatePollBody {
                poll: PollFields {
                    title: &poll.title,
                    description: &poll.description,
                    status: true,
                },
                poll_options: &poll.options,
                user_id,
            })
            .send()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        let envelope: MessageEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::unexpected(format!("failed to parse response: {e}")))?;

        Ok(envelope.message)
    }

    async fn fetch_options(
        &self,
        token: &AuthToken,
        poll_id: PollId,
    ) -> Result<Vec<PollOption>, ApiError> {
        let url = format!("{}/polls/{poll_id}/options", self.base_url);

        debug!(%poll_id, "Fetching poll options");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        let envelope: OptionsEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::unexpected(format!("failed to parse options: {e}")))?;

        Ok(envelope.poll_options.unwrap_or_default())
    }

    async fn fetch_votes(
        &self,
        token: &AuthToken,
        poll_id: PollId,
        user_id: i64,
    ) -> Result<Vec<VoteRecord>, ApiError> {
        let url = format!("{}/polls/{poll_id}/votes", self.base_url);

        debug!(%poll_id, "Fetching poll votes");

        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        let envelope: VotesEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::unexpected(format!("failed to parse votes: {e}")))?;

        let votes = envelope
            .poll_votes
            .unwrap_or_default()
            .into_iter()
            .map(|entry| VoteRecord::new(OptionId(entry.option.id)))
            .collect();

        Ok(votes)
    }

    async fn submit_vote(
        &self,
        token: &AuthToken,
        user_id: i64,
        poll_id: PollId,
        option_id: OptionId,
    ) -> Result<String, ApiError> {
        let url = format!("{}/users/{user_id}/votes", self.base_url);

        debug!(%poll_id, %option_id, "Submitting vote");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&SubmitVoteBody {
                poll_option_id: option_id.as_i64(),
                poll_id: poll_id.as_i64(),
            })
            .send()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        let envelope: MessageEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::unexpected(format!("failed to parse response: {e}")))?;

        Ok(envelope.message)
    }

    async fn close_poll(
        &self,
        token: &AuthToken,
        poll_id: PollId,
        user_id: i64,
    ) -> Result<(), ApiError> {
        let url = format!("{}/polls/{poll_id}", self.base_url);

        debug!(%poll_id, "Closing poll");

        let response = self
            .client
            .put(&url)
            .bearer_auth(token.as_str())
            .json(&UpdatePollBody {
                user_id,
                status: false,
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach the poll service");
                Self::map_transport_error(&e)
            })?;

        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PollServiceClient::new("http://localhost:8000");
        assert!(client.is_ok());
    }
}
