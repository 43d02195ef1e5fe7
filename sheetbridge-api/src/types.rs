//! Request and response envelope types for the HTTP API.

use serde::{Deserialize, Serialize};
use sheetbridge_core::SheetPayload;

/// Body of `POST /api/v1/sheets/data`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SetSheetDataRequest {
    /// The per-currency payload to upsert.
    pub sheet_data: SheetPayload,
}

/// Uniform success envelope returned by mutation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}
