//! Wire DTOs for the auth and poll services.
//!
//! Bodies and envelopes mirror the services' JSON exactly; list fields may
//! come back as `null` for empty results, hence the `Option` wrappers.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Poll, PollOption};

#[derive(Debug, Serialize)]
pub(crate) struct SignInBody<'a> {
    pub login: LoginFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginFields<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignUpBody<'a> {
    pub user: UserFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenEnvelope {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PollsEnvelope {
    pub polls: Option<Vec<Poll>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OptionsEnvelope {
    pub poll_options: Option<Vec<PollOption>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VotesEnvelope {
    pub poll_votes: Option<Vec<VoteEntry>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VoteEntry {
    pub option: VoteOptionRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VoteOptionRef {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageEnvelope {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePollBody<'a> {
    pub poll: PollFields<'a>,
    pub poll_options: &'a [String],
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct PollFields<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub status: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitVoteBody {
    pub poll_option_id: i64,
    pub poll_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePollBody {
    pub user_id: i64,
    pub status: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_body_shape() {
        let body = SignInBody {
            login: LoginFields {
                email: "ada@example.com",
                password: "pw",
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["login"]["email"], "ada@example.com");
        assert_eq!(json["login"]["password"], "pw");
    }

    #[test]
    fn test_submit_vote_body_is_camel_case() {
        let body = SubmitVoteBody {
            poll_option_id: 5,
            poll_id: 2,
        };

        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"pollOptionId":5,"pollId":2}"#);
    }

    #[test]
    fn test_create_poll_body_shape() {
        let options = vec!["Pizza".to_string(), "Sushi".to_string()];
        let body = CreatePollBody {
            poll: PollFields {
                title: "Lunch",
                description: "Where to?",
                status: true,
            },
            poll_options: &options,
            user_id: 7,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["poll"]["title"], "Lunch");
        assert_eq!(json["poll"]["status"], true);
        assert_eq!(json["pollOptions"][1], "Sushi");
        assert_eq!(json["userId"], 7);
    }

    #[test]
    fn test_votes_envelope_with_null_list() {
        let envelope: VotesEnvelope = serde_json::from_str(r#"{"pollVotes":null}"#).unwrap();
        assert!(envelope.poll_votes.is_none());
    }

    #[test]
    fn test_votes_envelope_with_entries() {
        let envelope: VotesEnvelope = serde_json::from_str(
            r#"{"pollVotes":[{"id":1,"user":{"id":9},"option":{"id":4,"text":"Pizza"}}]}"#,
        )
        .unwrap();

        let votes = envelope.poll_votes.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].option.id, 4);
    }
}
