use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Form, Router,
    body::Body,
    extract::{Query, Request, State},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, error, instrument, warn};

use crate::{WeatherLogError, render, web::AppState};

#[derive(Debug, Deserialize)]
pub struct WeatherForm {
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub file: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home).fallback(method_not_allowed))
        .route("/weather", post(get_weather).fallback(method_not_allowed))
        .route("/history", get(history).fallback(method_not_allowed))
        .route("/download", get(download).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(state)
}

async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    render::home(&state.config.bg_color)
}

#[instrument(skip_all, fields(location = %form.location))]
async fn get_weather(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WeatherForm>,
) -> Response {
    if form.location.trim().is_empty() {
        let err = WeatherLogError::validation("Please enter a location.");
        return failure(&state, &err);
    }

    let result = match state.forecasts.get_forecast(&form.location).await {
        Ok(result) => result,
        Err(err) => {
            warn!("Forecast lookup failed: {}", err);
            return failure(&state, &err);
        }
    };

    if let Err(err) = state.history.append(&form.location, result.clone()).await {
        return failure(&state, &err);
    }

    render::weather(&state.config.bg_color, Ok(&result)).into_response()
}

async fn history(State(state): State<Arc<AppState>>) -> Response {
    let entries = match state.history.read_all().await {
        Ok(entries) => entries,
        Err(err) => return failure(&state, &err),
    };

    let download_name =
        downloadable_name(state.config.download_root.as_deref(), state.history.path()).await;
    render::history(&state.config.bg_color, &entries, download_name.as_deref()).into_response()
}

#[instrument(skip(state, request))]
async fn download(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DownloadParams>,
    request: Request,
) -> Response {
    let Some(file) = params.file.filter(|f| !f.is_empty()) else {
        return file_not_found();
    };

    let Some(path) = resolve_download_path(state.config.download_root.as_deref(), &file).await
    else {
        debug!("Download target rejected or missing");
        return file_not_found();
    };

    // metadata does not block on pipes, opening them is left to ServeFile
    match tokio::fs::metadata(&path).await {
        Ok(metadata) if !metadata.is_dir() => {}
        Ok(_) => return file_not_found(),
        Err(err) => {
            debug!("Cannot stat {}: {}", path.display(), err);
            return file_not_found();
        }
    }

    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    if response.status().is_client_error() || response.status().is_server_error() {
        debug!("Cannot serve {}: {}", path.display(), response.status());
        return file_not_found();
    }

    let mut response = response.map(Body::new);
    let disposition = format!("attachment; filename=\"{}\"", attachment_name(&path));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
    }
    response
}

async fn not_found(State(state): State<Arc<AppState>>) -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, render::not_found(&state.config.bg_color))
}

async fn method_not_allowed(State(state): State<Arc<AppState>>) -> (StatusCode, Html<String>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        render::method_not_allowed(&state.config.bg_color),
    )
}

fn file_not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

/// User-facing errors go inline on the weather page, everything else is a 500
fn failure(state: &AppState, err: &WeatherLogError) -> Response {
    let bg_color = &state.config.bg_color;
    if err.is_user_facing() {
        render::weather(bg_color, Err(&err.user_message())).into_response()
    } else {
        error!("Request failed: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            render::internal_error(bg_color, &err.user_message()),
        )
            .into_response()
    }
}

/// Map the requested name to a path on disk.
///
/// Without a root any path is served as given. With a root the target must
/// exist and canonicalize to somewhere below it.
async fn resolve_download_path(root: Option<&Path>, file: &str) -> Option<PathBuf> {
    let Some(root) = root else {
        return Some(PathBuf::from(file));
    };

    let root = tokio::fs::canonicalize(root).await.ok()?;
    let target = tokio::fs::canonicalize(root.join(file)).await.ok()?;
    target.starts_with(&root).then_some(target)
}

/// The `file` value under which `/download` would serve `path`, if any
async fn downloadable_name(root: Option<&Path>, path: &Path) -> Option<String> {
    let Some(root) = root else {
        return Some(path.to_string_lossy().into_owned());
    };

    let root = tokio::fs::canonicalize(root).await.ok()?;
    let target = tokio::fs::canonicalize(path).await.ok()?;
    let relative = target.strip_prefix(&root).ok()?;
    Some(relative.to_string_lossy().into_owned())
}

/// File name safe to put inside a quoted header value
fn attachment_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default()
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}
