use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pollux::infrastructure::{
    AppConfig, AuthServiceClient, CliArgs, ConfigStore, KeyringTokenStorage, PollServiceClient,
};
use pollux::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();

    let store = ConfigStore::new()?;
    let mut config = store.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    Ok(config)
}

fn create_app(config: &AppConfig) -> Result<App> {
    let auth_client = Arc::new(AuthServiceClient::new(&config.services.auth_url)?);
    let poll_client = Arc::new(PollServiceClient::new(&config.services.poll_url)?);
    let token_storage = Arc::new(KeyringTokenStorage::new());

    Ok(App::new(
        auth_client,
        poll_client,
        token_storage,
        Duration::from_secs(config.ui.notification_duration),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let config = load_config()?;
    init_logging(&config)?;

    info!(version = pollux::VERSION, "Starting Pollux");

    let app = create_app(&config)?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
