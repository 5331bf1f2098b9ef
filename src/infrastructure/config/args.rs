use std::path::PathBuf;

use clap::Parser;

use super::app_config::LogLevel;

#[derive(Debug, Parser)]
#[command(
    name = "pollux",
    version,
    about = "A lightweight terminal client for the Pollux polling service",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Auth service base URL.
    #[arg(long, env = "AUTH_SERVICE_URL", value_name = "URL")]
    pub auth_url: Option<String>,

    /// Poll service base URL.
    #[arg(long, env = "POLL_SERVICE_URL", value_name = "URL")]
    pub poll_url: Option<String>,

    /// Notification duration in seconds.
    #[arg(long)]
    pub notification_duration: Option<u64>,
}
