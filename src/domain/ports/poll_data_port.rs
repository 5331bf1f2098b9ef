//! Poll service data port definition.

use async_trait::async_trait;

use crate::domain::entities::{AuthToken, OptionId, Poll, PollId, PollOption, VoteRecord};
use crate::domain::errors::ApiError;

/// A poll to be created, as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewPoll {
    /// Poll title.
    pub title: String,
    /// Poll description.
    pub description: String,
    /// Option texts, in display order.
    pub options: Vec<String>,
}

impl NewPoll {
    /// Returns whether the poll is complete enough to submit: title,
    /// description, and at least one non-empty option.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.title.is_empty()
            && !self.description.is_empty()
            && self.options.first().is_some_and(|o| !o.is_empty())
    }
}

/// Port for poll service operations.
///
/// Every operation carries the session token as a bearer credential.
#[async_trait]
pub trait PollDataPort: Send + Sync {
    /// Fetches all polls visible to the user.
    async fn fetch_polls(&self, token: &AuthToken, user_id: i64) -> Result<Vec<Poll>, ApiError>;

    /// Creates a poll with its options.
    async fn create_poll(
        &self,
        token: &AuthToken,
        user_id: i64,
        poll: &NewPoll,
    ) -> Result<String, ApiError>;

    /// Fetches the options of a poll.
    async fn fetch_options(
        &self,
        token: &AuthToken,
        poll_id: PollId,
    ) -> Result<Vec<PollOption>, ApiError>;

    /// Fetches the votes cast on a poll.
    async fn fetch_votes(
        &self,
        token: &AuthToken,
        poll_id: PollId,
        user_id: i64,
    ) -> Result<Vec<VoteRecord>, ApiError>;

    /// Casts one vote; returns the service's confirmation message.
    async fn submit_vote(
        &self,
        token: &AuthToken,
        user_id: i64,
        poll_id: PollId,
        option_id: OptionId,
    ) -> Result<String, ApiError>;

    /// Closes a poll so it no longer accepts votes.
    async fn close_poll(
        &self,
        token: &AuthToken,
        poll_id: PollId,
        user_id: i64,
    ) -> Result<(), ApiError>;
}
