//! Sheet Data REST API Routes
//!
//! This module implements the sheet-data endpoints:
//! - Upsert a per-currency payload into its spreadsheet
//! - Tear down a tracked worksheet
//! - Tear down a whole spreadsheet
//!
//! All handlers delegate to [`SheetControl`] and translate domain errors
//! into HTTP responses via `ApiError`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
    Json, Router,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{ApiResponse, SetSheetDataRequest};

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /api/v1/sheets/data - Upsert sheet data for a currency
#[utoipa::path(
    post,
    path = "/api/v1/sheets/data",
    tag = "Sheets",
    request_body = SetSheetDataRequest,
    responses(
        (status = 200, description = "Sheet data written", body = ApiResponse),
        (status = 400, description = "Invalid payload", body = ApiError),
        (status = 502, description = "Remote spreadsheet service failed", body = ApiError),
    ),
)]
pub async fn set_sheet_data(
    State(state): State<AppState>,
    Json(request): Json<SetSheetDataRequest>,
) -> ApiResult<impl IntoResponse> {
    let fiat = request.sheet_data.fiat.clone();
    state.control.upsert(&request.sheet_data).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(format!("sheet data written for '{}'", fiat))),
    ))
}

/// DELETE /api/v1/sheets/{fiat} - Delete the spreadsheet for a currency
#[utoipa::path(
    delete,
    path = "/api/v1/sheets/{fiat}",
    tag = "Sheets",
    params(
        ("fiat" = String, Path, description = "Currency key the spreadsheet is tracked under"),
    ),
    responses(
        (status = 200, description = "Spreadsheet deleted", body = ApiResponse),
        (status = 404, description = "No spreadsheet tracked for this currency", body = ApiError),
        (status = 502, description = "Remote spreadsheet service failed", body = ApiError),
    ),
)]
pub async fn delete_spreadsheet(
    State(state): State<AppState>,
    Path(fiat): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.control.delete_spreadsheet(&fiat).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(format!("spreadsheet deleted for '{}'", fiat))),
    ))
}

/// DELETE /api/v1/sheets/{fiat}/worksheets/{worksheet} - Delete one worksheet
#[utoipa::path(
    delete,
    path = "/api/v1/sheets/{fiat}/worksheets/{worksheet}",
    tag = "Sheets",
    params(
        ("fiat" = String, Path, description = "Currency key the spreadsheet is tracked under"),
        ("worksheet" = String, Path, description = "Worksheet title to delete"),
    ),
    responses(
        (status = 200, description = "Worksheet deleted", body = ApiResponse),
        (status = 404, description = "Currency or worksheet not tracked", body = ApiError),
        (status = 502, description = "Remote spreadsheet service failed", body = ApiError),
    ),
)]
pub async fn delete_worksheet(
    State(state): State<AppState>,
    Path((fiat, worksheet)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    state.control.delete_worksheet(&fiat, &worksheet).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(format!(
            "worksheet '{}' deleted for '{}'",
            worksheet, fiat
        ))),
    ))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the sheet-data router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/sheets/data", post(set_sheet_data))
        .route("/api/v1/sheets/:fiat", delete(delete_spreadsheet))
        .route(
            "/api/v1/sheets/:fiat/worksheets/:worksheet",
            delete(delete_worksheet),
        )
        .with_state(state)
}
