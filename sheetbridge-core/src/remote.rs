//! Abstract contracts for the remote spreadsheet and permission services.
//!
//! The core never speaks a vendor wire format; it drives these traits and
//! records their outcomes in the cache. The Google-backed implementation
//! lives in the `sheetbridge-google` crate; tests use in-memory fakes.

use async_trait::async_trait;

use crate::error::SheetResult;

/// A single contiguous cell range and the rows of cell text to write into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRange {
    /// A1-notation range, worksheet-qualified (e.g. `'BankA'!A10`).
    pub range: String,
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    pub fn new(range: impl Into<String>, values: Vec<Vec<String>>) -> Self {
        Self {
            range: range.into(),
            values,
        }
    }
}

/// Zero-based grid bounds for a basic filter (half-open, vendor convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub row_start: i64,
    pub row_end: i64,
    pub col_start: i64,
    pub col_end: i64,
}

/// Remote spreadsheet service: the authoritative system of record.
///
/// Implementations must be safe for concurrent invocation. All methods are
/// single-shot; the core performs no retries.
#[async_trait]
pub trait SpreadsheetService: Send + Sync {
    /// Enumerate every remote spreadsheet as `(title, identifier)` pairs.
    /// Titles are fiat keys by construction.
    async fn list_all(&self) -> SheetResult<Vec<(String, String)>>;

    /// Create a spreadsheet with the given title; returns its identifier.
    async fn create_spreadsheet(&self, title: &str) -> SheetResult<String>;

    /// List the worksheet titles inside one spreadsheet.
    async fn list_worksheets(&self, spreadsheet_id: &str) -> SheetResult<Vec<String>>;

    /// Add an empty worksheet.
    async fn create_worksheet(&self, spreadsheet_id: &str, title: &str) -> SheetResult<()>;

    /// Delete a worksheet by title.
    async fn delete_worksheet(&self, spreadsheet_id: &str, title: &str) -> SheetResult<()>;

    /// Resolve a worksheet title to its numeric grid id.
    async fn worksheet_grid_id(&self, spreadsheet_id: &str, title: &str) -> SheetResult<i64>;

    /// Install a basic filter over the given grid bounds of one worksheet.
    async fn create_basic_filter(
        &self,
        spreadsheet_id: &str,
        worksheet_id: i64,
        bounds: GridBounds,
    ) -> SheetResult<()>;

    /// Write all ranges in one batched call.
    async fn write_ranges(&self, spreadsheet_id: &str, ranges: Vec<ValueRange>) -> SheetResult<()>;

    /// Clear all ranges in one batched call.
    async fn clear_ranges(&self, spreadsheet_id: &str, ranges: Vec<String>) -> SheetResult<()>;

    /// Delete an entire spreadsheet.
    async fn delete_spreadsheet(&self, spreadsheet_id: &str) -> SheetResult<()>;
}

/// Grants write access on a spreadsheet to a set of notification addresses.
#[async_trait]
pub trait PermissionService: Send + Sync {
    async fn grant_write(&self, spreadsheet_id: &str, emails: &[String]) -> SheetResult<()>;
}
