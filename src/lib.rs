//! Pollux - a lightweight terminal client for a polling service.
//!
//! This crate provides a terminal client for creating polls, voting, and
//! viewing aggregated results, with authentication against a token-issuing
//! auth service.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the session manager, services, and DTOs.
pub mod application;
/// Domain layer containing entities, errors, tallying, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "pollux";
