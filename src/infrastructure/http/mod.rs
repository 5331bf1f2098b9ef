//! HTTP adapters for the auth and poll services.

mod auth_client;
mod dto;
mod poll_client;

pub use auth_client::AuthServiceClient;
pub use poll_client::PollServiceClient;
