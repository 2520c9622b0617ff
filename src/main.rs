use anyhow::Context;
use tracing_subscriber::EnvFilter;

use weatherlog::{AppConfig, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, the real environment still applies
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing::debug!("Search history file: {}", config.history_file.display());

    web::run(config).await
}
