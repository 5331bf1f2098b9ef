//! Application configuration.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "pollux";
const APP_QUALIFIER: &str = "io";
const APP_ORGANIZATION: &str = "pollux";

const DEFAULT_AUTH_URL: &str = "http://localhost:9000";
const DEFAULT_POLL_URL: &str = "http://localhost:8000";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Service endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Auth service base URL.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Poll service base URL.
    #[serde(default = "default_poll_url")]
    pub poll_url: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            poll_url: default_poll_url(),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Notification display duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Timestamp format string (chrono format) for poll dates.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_duration: default_notification_duration(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

/// Application configuration, merged from the config file and CLI.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Service endpoints.
    #[serde(default)]
    pub services: ServicesConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_poll_url() -> String {
    DEFAULT_POLL_URL.to_string()
}

fn default_notification_duration() -> u64 {
    4
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(auth_url) = args.auth_url {
            self.services.auth_url = auth_url;
        }
        if let Some(poll_url) = args.poll_url {
            self.services.poll_url = poll_url;
        }
        if let Some(notification_duration) = args.notification_duration {
            self.ui.notification_duration = notification_duration;
        }
    }

    /// Returns the default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("pollux.log"))
    }

    /// Returns the effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.services.auth_url, "http://localhost:9000");
        assert_eq!(config.services.poll_url, "http://localhost:8000");
        assert_eq!(config.ui.notification_duration, 4);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            log_level = "debug"

            [services]
            auth_url = "https://auth.example.com"

            [ui]
            notification_duration = 8
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.services.auth_url, "https://auth.example.com");
        assert_eq!(config.services.poll_url, "http://localhost:8000");
        assert_eq!(config.ui.notification_duration, 8);
    }

    #[test]
    fn test_merge_with_args_overrides_file() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            config: None,
            log_path: None,
            log_level: Some(LogLevel::Warn),
            auth_url: Some("http://auth:9000".into()),
            poll_url: None,
            notification_duration: None,
        };

        config.merge_with_args(args);

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.services.auth_url, "http://auth:9000");
        assert_eq!(config.services.poll_url, "http://localhost:8000");
    }
}
