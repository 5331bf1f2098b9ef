//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Transient user notifications.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Vote tally aggregation.
pub mod tally;

pub use entities::{AuthToken, Identity, Session, SessionState};
pub use errors::{ApiError, AuthError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{AuthPort, PollDataPort, TokenStoragePort};
pub use tally::{PercentageTally, Tally, TallyResult, aggregate};
