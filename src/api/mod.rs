//! HTTP state, error type, router assembly and the status endpoint.

use crate::config::Config;
use crate::mail;
use crate::schedule::BlockSchedule;
use crate::store::WallStore;
use crate::ui;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: WallStore,
    pub schedule: BlockSchedule,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: WallStore, config: Config) -> Self {
        Self {
            store,
            schedule: config.schedule.to_schedule(),
            config: Arc::new(config),
        }
    }
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not a valid id")]
    InvalidId,
    #[error("post does not exist")]
    PostNotFound,
    #[error("can't find that page")]
    NotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidId => StatusCode::BAD_REQUEST,
            AppError::PostNotFound | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(e) => tracing::error!("HTTP error: {e:#}"),
            other => tracing::debug!("HTTP error: {other}"),
        }
        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// General status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub git_sha: &'static str,
    pub users: usize,
    pub blocks: usize,
    pub posts: usize,
}

/// GET /status - Service health check
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let counts = state.store.counts().await;
    Json(StatusResponse {
        service: "the-wall",
        version: env!("CARGO_PKG_VERSION"),
        git_sha: env!("WALL_GIT_SHA"),
        users: counts.users,
        blocks: counts.blocks,
        posts: counts.posts,
    })
}

/// GET /images/{file} - images extracted from incoming email
pub async fn image_handler(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // Stored image names are flat; anything else is not ours.
    if file.contains('/') || file.contains("..") {
        return Err(AppError::NotFound);
    }
    let path = state.store.images_dir().join(&file);
    let bytes = tokio::fs::read(&path).await.map_err(|_| AppError::NotFound)?;
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes))
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // User routes
        .route("/", get(ui::home_page))
        .route("/post", get(ui::post_page))
        .route("/what", get(ui::what_page))
        .route("/how", get(ui::how_page))
        .route("/password", get(ui::password_page).post(ui::password_submit))
        // API routes
        .route("/mail", post(mail::mail_handler))
        .route("/status", get(status_handler))
        // Static assets and stored images
        .route("/static/darkmode.css", get(ui::darkmode_css))
        .route("/static/wall.css", get(ui::wall_css))
        .nest_service("/static/client", ServeDir::new(&state.config.client_dir))
        .route("/images/{file}", get(image_handler))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
