//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// HTTP clients for the auth and poll services.
pub mod http;
/// Token storage adapters.
pub mod storage;

pub use config::{AppConfig, CliArgs, ConfigStore, LogLevel};
pub use http::{AuthServiceClient, PollServiceClient};
pub use storage::KeyringTokenStorage;
