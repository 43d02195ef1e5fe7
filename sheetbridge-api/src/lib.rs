//! HTTP API layer for sheetbridge.
//!
//! Exposes the upsert and teardown operations of [`sheetbridge_core`] over
//! REST, with a generated OpenAPI document and health endpoints.

pub mod config;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod types;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;
pub use types::{ApiResponse, SetSheetDataRequest};
