//! Domain entity definitions.

mod identity;
mod poll;
mod session;
mod token;

pub use identity::Identity;
pub use poll::{OptionId, Poll, PollId, PollOption, VoteRecord};
pub use session::{Session, SessionState};
pub use token::AuthToken;
