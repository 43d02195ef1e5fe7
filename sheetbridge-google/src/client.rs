//! REST client for the Google Sheets v4 and Drive v3 APIs.
//!
//! Implements the core's [`SpreadsheetService`] and [`PermissionService`]
//! traits. Every call is single-shot; non-2xx responses surface as
//! [`SheetError::Remote`] with the operation context, HTTP status, and
//! response body preserved for the operator.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sheetbridge_core::{
    GridBounds, PermissionService, SheetError, SheetResult, SpreadsheetService, ValueRange,
};

use crate::auth::{ServiceAccountKey, TokenProvider};

const SHEETS_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_BASE: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";
const PERMISSION_MESSAGE: &str =
    "You have been granted access to a new spreadsheet with fresh market data.";

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSpreadsheetRequest<'a> {
    properties: SpreadsheetProperties<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpreadsheetProperties<'a> {
    title: &'a str,
    auto_recalc: &'a str,
    time_zone: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSpreadsheetResponse {
    spreadsheet_id: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetGet {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum BatchRequest<'a> {
    AddSheet {
        properties: AddSheetProperties<'a>,
    },
    #[serde(rename_all = "camelCase")]
    DeleteSheet {
        sheet_id: i64,
    },
    SetBasicFilter {
        filter: BasicFilter,
    },
}

#[derive(Debug, Serialize)]
struct AddSheetProperties<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct BasicFilter {
    range: GridRange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GridRange {
    sheet_id: i64,
    start_row_index: i64,
    end_row_index: i64,
    start_column_index: i64,
    end_column_index: i64,
}

#[derive(Debug, Serialize)]
struct BatchUpdateRequest<'a> {
    requests: Vec<BatchRequest<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateValuesRequest {
    value_input_option: &'static str,
    data: Vec<WireValueRange>,
}

#[derive(Debug, Serialize)]
struct WireValueRange {
    range: String,
    values: Vec<Vec<String>>,
}

impl From<ValueRange> for WireValueRange {
    fn from(range: ValueRange) -> Self {
        Self {
            range: range.range,
            values: range.values,
        }
    }
}

#[derive(Debug, Serialize)]
struct BatchClearValuesRequest {
    ranges: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PermissionRequest<'a> {
    role: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    email_address: &'a str,
}

// ============================================================================
// CLIENT
// ============================================================================

/// Google-backed implementation of the remote spreadsheet and permission
/// services.
pub struct GoogleSheetsClient {
    http: reqwest::Client,
    token: Arc<TokenProvider>,
}

impl GoogleSheetsClient {
    /// Build a client from a credentials file path.
    pub fn from_credentials_file(path: &str) -> SheetResult<Self> {
        let key = ServiceAccountKey::from_file(path)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SheetError::remote("building HTTP client", e.to_string()))?;
        let token = Arc::new(TokenProvider::new(key, http.clone())?);
        Ok(Self { http, token })
    }

    /// Force a token fetch so startup fails fast on bad credentials.
    pub async fn check_credentials(&self) -> SheetResult<()> {
        self.token.bearer_token().await.map(|_| ())
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        context: &str,
    ) -> SheetResult<reqwest::Response> {
        let token = self.token.bearer_token().await?;
        let response = builder
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SheetError::remote(context, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::remote(
                context,
                format!("HTTP {}: {}", status, body),
            ));
        }
        Ok(response)
    }

    async fn sheet_properties(&self, spreadsheet_id: &str) -> SheetResult<Vec<SheetProperties>> {
        let context = format!("fetching worksheets of spreadsheet '{}'", spreadsheet_id);
        let response = self
            .send(
                self.http
                    .get(format!("{}/{}", SHEETS_BASE, spreadsheet_id))
                    .query(&[("fields", "sheets.properties")]),
                &context,
            )
            .await?;
        let body: SpreadsheetGet = response
            .json()
            .await
            .map_err(|e| SheetError::remote(&context, e.to_string()))?;
        Ok(body.sheets.into_iter().map(|s| s.properties).collect())
    }

    async fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: Vec<BatchRequest<'_>>,
        context: &str,
    ) -> SheetResult<()> {
        self.send(
            self.http
                .post(format!("{}/{}:batchUpdate", SHEETS_BASE, spreadsheet_id))
                .json(&BatchUpdateRequest { requests }),
            context,
        )
        .await
        .map(|_| ())
    }
}

#[async_trait]
impl SpreadsheetService for GoogleSheetsClient {
    async fn list_all(&self) -> SheetResult<Vec<(String, String)>> {
        let context = "listing spreadsheets";
        let response = self
            .send(
                self.http.get(DRIVE_BASE).query(&[
                    ("q", format!("mimeType='{}'", SPREADSHEET_MIME).as_str()),
                    ("fields", "files(id, name)"),
                ]),
                context,
            )
            .await?;
        let body: DriveFileList = response
            .json()
            .await
            .map_err(|e| SheetError::remote(context, e.to_string()))?;
        Ok(body.files.into_iter().map(|f| (f.name, f.id)).collect())
    }

    async fn create_spreadsheet(&self, title: &str) -> SheetResult<String> {
        let context = format!("creating spreadsheet '{}'", title);
        let request = CreateSpreadsheetRequest {
            properties: SpreadsheetProperties {
                title,
                auto_recalc: "MINUTE",
                time_zone: "GMT+00:00",
            },
        };
        let response = self
            .send(self.http.post(SHEETS_BASE).json(&request), &context)
            .await?;
        let body: CreateSpreadsheetResponse = response
            .json()
            .await
            .map_err(|e| SheetError::remote(&context, e.to_string()))?;
        tracing::info!(title, spreadsheet_id = %body.spreadsheet_id, "spreadsheet created");
        Ok(body.spreadsheet_id)
    }

    async fn list_worksheets(&self, spreadsheet_id: &str) -> SheetResult<Vec<String>> {
        Ok(self
            .sheet_properties(spreadsheet_id)
            .await?
            .into_iter()
            .map(|p| p.title)
            .collect())
    }

    async fn create_worksheet(&self, spreadsheet_id: &str, title: &str) -> SheetResult<()> {
        self.batch_update(
            spreadsheet_id,
            vec![BatchRequest::AddSheet {
                properties: AddSheetProperties { title },
            }],
            &format!("creating worksheet '{}'", title),
        )
        .await?;
        tracing::info!(%spreadsheet_id, title, "worksheet created");
        Ok(())
    }

    async fn delete_worksheet(&self, spreadsheet_id: &str, title: &str) -> SheetResult<()> {
        let sheet_id = self.worksheet_grid_id(spreadsheet_id, title).await?;
        self.batch_update(
            spreadsheet_id,
            vec![BatchRequest::DeleteSheet { sheet_id }],
            &format!("deleting worksheet '{}'", title),
        )
        .await?;
        tracing::info!(%spreadsheet_id, title, "worksheet deleted");
        Ok(())
    }

    async fn worksheet_grid_id(&self, spreadsheet_id: &str, title: &str) -> SheetResult<i64> {
        self.sheet_properties(spreadsheet_id)
            .await?
            .into_iter()
            .find(|p| p.title == title)
            .map(|p| p.sheet_id)
            .ok_or_else(|| {
                SheetError::remote(
                    format!("resolving worksheet '{}'", title),
                    "no worksheet with that title",
                )
            })
    }

    async fn create_basic_filter(
        &self,
        spreadsheet_id: &str,
        worksheet_id: i64,
        bounds: GridBounds,
    ) -> SheetResult<()> {
        self.batch_update(
            spreadsheet_id,
            vec![BatchRequest::SetBasicFilter {
                filter: BasicFilter {
                    range: GridRange {
                        sheet_id: worksheet_id,
                        start_row_index: bounds.row_start,
                        end_row_index: bounds.row_end,
                        start_column_index: bounds.col_start,
                        end_column_index: bounds.col_end,
                    },
                },
            }],
            "installing basic filter",
        )
        .await
    }

    async fn write_ranges(&self, spreadsheet_id: &str, ranges: Vec<ValueRange>) -> SheetResult<()> {
        let request = BatchUpdateValuesRequest {
            value_input_option: "USER_ENTERED",
            data: ranges.into_iter().map(WireValueRange::from).collect(),
        };
        self.send(
            self.http
                .post(format!("{}/{}/values:batchUpdate", SHEETS_BASE, spreadsheet_id))
                .json(&request),
            "writing value ranges",
        )
        .await
        .map(|_| ())
    }

    async fn clear_ranges(&self, spreadsheet_id: &str, ranges: Vec<String>) -> SheetResult<()> {
        self.send(
            self.http
                .post(format!("{}/{}/values:batchClear", SHEETS_BASE, spreadsheet_id))
                .json(&BatchClearValuesRequest { ranges }),
            "clearing value ranges",
        )
        .await
        .map(|_| ())
    }

    async fn delete_spreadsheet(&self, spreadsheet_id: &str) -> SheetResult<()> {
        self.send(
            self.http
                .delete(format!("{}/{}", DRIVE_BASE, spreadsheet_id)),
            &format!("deleting spreadsheet '{}'", spreadsheet_id),
        )
        .await?;
        tracing::info!(%spreadsheet_id, "spreadsheet deleted");
        Ok(())
    }
}

#[async_trait]
impl PermissionService for GoogleSheetsClient {
    async fn grant_write(&self, spreadsheet_id: &str, emails: &[String]) -> SheetResult<()> {
        for email in emails {
            let context = format!("granting write access to '{}'", email);
            self.send(
                self.http
                    .post(format!("{}/{}/permissions", DRIVE_BASE, spreadsheet_id))
                    .query(&[
                        ("sendNotificationEmail", "true"),
                        ("emailMessage", PERMISSION_MESSAGE),
                    ])
                    .json(&PermissionRequest {
                        role: "writer",
                        kind: "user",
                        email_address: email,
                    }),
                &context,
            )
            .await?;
            tracing::info!(%spreadsheet_id, email, "write permission granted");
        }
        Ok(())
    }
}
