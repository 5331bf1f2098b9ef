mod auth_port;
mod poll_data_port;
mod token_storage_port;

pub use auth_port::AuthPort;
pub use poll_data_port::{NewPoll, PollDataPort};
pub use token_storage_port::TokenStoragePort;

#[cfg(test)]
pub mod mocks {
    pub use super::auth_port::mock::{MockAuthPort, make_token_for};
    pub use super::token_storage_port::mock::MockTokenStorage;
}
