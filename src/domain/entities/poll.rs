//! Poll domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Poll identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PollId(pub i64);

impl PollId {
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PollId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PollId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Poll option identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionId(pub i64);

impl OptionId {
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OptionId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A poll as the poll service reports it.
///
/// `status` is `true` while the poll is open for voting. Field names on
/// the wire are camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: PollId,
    pub title: String,
    pub description: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl Poll {
    /// Returns whether the poll is still open for voting.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status
    }
}

/// One selectable option of a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: OptionId,
    pub text: String,
}

/// One cast vote, reduced to the option it was cast for.
///
/// The poll service also reports a vote id and the voter; aggregation
/// only needs the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteRecord {
    pub option_id: OptionId,
}

impl VoteRecord {
    #[must_use]
    pub const fn new(option_id: OptionId) -> Self {
        Self { option_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_parses_wire_json() {
        let json = r#"{
            "id": 3,
            "title": "Lunch",
            "description": "Where to?",
            "status": true,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z",
            "endedAt": "0001-01-01T00:00:00Z"
        }"#;

        let poll: Poll = serde_json::from_str(json).unwrap();

        assert_eq!(poll.id, PollId(3));
        assert_eq!(poll.title, "Lunch");
        assert!(poll.is_open());
    }

    #[test]
    fn test_closed_poll_is_not_open() {
        let json = r#"{
            "id": 4,
            "title": "Done",
            "description": "",
            "status": false,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-02T10:00:00Z",
            "endedAt": "2024-05-02T10:00:00Z"
        }"#;

        let poll: Poll = serde_json::from_str(json).unwrap();
        assert!(!poll.is_open());
    }

    #[test]
    fn test_option_parses_wire_json() {
        let option: PollOption = serde_json::from_str(r#"{"id":9,"text":"Pizza"}"#).unwrap();
        assert_eq!(option.id, OptionId(9));
        assert_eq!(option.text, "Pizza");
    }
}
