//! REST API Routes Module
//!
//! This module contains all REST API route handlers:
//! - Sheet data upsert and teardown routes
//! - Health check endpoints (Kubernetes-compatible)
//! - OpenAPI document endpoint

use axum::{response::IntoResponse, routing::get, Json, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;
pub mod sheets;

/// GET /openapi.json - The generated OpenAPI document.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Assemble the full API router.
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .merge(health::create_router())
        .merge(sheets::create_router(state))
        .route("/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
}
