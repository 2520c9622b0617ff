use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::AppConfig;
use crate::history::HistoryStore;
use crate::weather::ForecastClient;

/// Form posts are a single short field
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Everything a handler needs, built once at startup
pub struct AppState {
    pub config: AppConfig,
    pub forecasts: ForecastClient,
    pub history: HistoryStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> crate::Result<Self> {
        let forecasts = ForecastClient::new(&config.weather)?;
        let history = HistoryStore::new(config.history_file.clone());
        Ok(Self {
            config,
            forecasts,
            history,
        })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    api::router(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let port = config.port;

    if config.weather.api_key.is_none() {
        tracing::warn!("API_KEY is not set; only the 'test' location will return forecasts");
    }
    match &config.download_root {
        Some(root) => tracing::info!("Downloads confined to {}", root.display()),
        None => tracing::warn!("DOWNLOAD_ROOT is not set; /download serves any readable path"),
    }

    let state = Arc::new(AppState::new(config).context("Failed to create application state")?);
    let app = app(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
