//! OpenAPI Specification for the sheetbridge API
//!
//! Uses utoipa to generate the OpenAPI document from Rust types and route
//! annotations.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{health, sheets};
use crate::types::{ApiResponse, SetSheetDataRequest};

use sheetbridge_core::{InfoFilter, RawData, SheetPayload, Soup};

/// OpenAPI document for the sheetbridge API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "sheetbridge API",
        version = "0.2.0",
        description = "Upserts per-currency sheet data into Google Sheets spreadsheets",
    ),
    tags(
        (name = "Sheets", description = "Per-currency spreadsheet upsert and teardown"),
        (name = "Health", description = "Service health checks")
    ),
    paths(
        sheets::set_sheet_data,
        sheets::delete_spreadsheet,
        sheets::delete_worksheet,
        health::ping,
        health::liveness,
    ),
    components(schemas(
        SetSheetDataRequest,
        ApiResponse,
        ApiError,
        ErrorCode,
        SheetPayload,
        Soup,
        RawData,
        InfoFilter,
        health::HealthResponse,
        health::HealthStatus,
    ))
)]
pub struct ApiDoc;
