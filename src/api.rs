// 🌐 REST API - JSON summaries for the neighborhood map
// Routes are built here so they can be driven in-process by tests;
// bin/server.rs only loads the data files and binds the listener.

use crate::config::{GROUPS_PATH, INPUT_PATH, OUTPUT_PATH};
use crate::demographics::Demographics;
use crate::groups::Groups;
use crate::stats::{legend, summarize, ColorMode};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;

/// Shared application state (read-only after startup)
#[derive(Clone)]
pub struct AppState {
    pub demographics: Arc<Demographics>,
    pub groups: Arc<Groups>,
}

impl AppState {
    pub fn new(demographics: Demographics, groups: Groups) -> Self {
        AppState {
            demographics: Arc::new(demographics),
            groups: Arc::new(groups),
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

fn failure(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: Option::<()>::None,
            error: Some(message),
        }),
    )
        .into_response()
}

#[derive(Deserialize)]
struct SelectionQuery {
    /// Comma-separated neighborhood and/or group names
    names: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/demographics - Whole document
async fn get_demographics(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.demographics))
}

/// GET /api/groups - Group definitions
async fn get_groups(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.groups))
}

/// GET /api/groups/view - Merged groups plus ungrouped neighborhoods
async fn get_grouped_view(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.groups.view(state.demographics.names())))
}

/// GET /api/summary/:name - One neighborhood or group
async fn get_summary(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match summarize(&[name.as_str()], &state.demographics, &state.groups) {
        Some(summary) => (StatusCode::OK, Json(ApiResponse::ok(summary))).into_response(),
        None => failure(StatusCode::NOT_FOUND, format!("No information on '{}'", name)),
    }
}

/// GET /api/selection?names=A,B - Combined stats for a selection
async fn get_selection(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Response {
    let names: Vec<&str> = query
        .names
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();

    match summarize(&names, &state.demographics, &state.groups) {
        Some(summary) => (StatusCode::OK, Json(ApiResponse::ok(summary))).into_response(),
        None => failure(StatusCode::NOT_FOUND, format!("No information on '{}'", query.names)),
    }
}

/// GET /api/legend/:mode - Color classes for "age" or "income"
async fn get_legend(Path(mode): Path<String>) -> Response {
    match ColorMode::parse(&mode) {
        Some(mode) => (StatusCode::OK, Json(ApiResponse::ok(legend(mode)))).into_response(),
        None => failure(StatusCode::BAD_REQUEST, format!("Unknown color mode '{}'", mode)),
    }
}

// ============================================================================
// Routers
// ============================================================================

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/demographics", get(get_demographics))
        .route("/groups", get(get_groups))
        .route("/groups/view", get(get_grouped_view))
        .route("/summary/:name", get(get_summary))
        .route("/selection", get(get_selection))
        .route("/legend/:mode", get(get_legend))
        .with_state(state)
}

/// Full application: `/api` plus the raw data files a map client fetches
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(state))
        .route_service(&format!("/{}", OUTPUT_PATH), ServeFile::new(OUTPUT_PATH))
        .route_service(&format!("/{}", GROUPS_PATH), ServeFile::new(GROUPS_PATH))
        .route_service(&format!("/{}", INPUT_PATH), ServeFile::new(INPUT_PATH))
        .layer(CorsLayer::permissive())
}
