//! Error types for sheetbridge core operations

use thiserror::Error;

/// Result alias used throughout the core.
pub type SheetResult<T> = Result<T, SheetError>;

/// Errors produced by the cache, the orchestrators, and remote-service
/// implementations.
///
/// A cache miss during upsert is never surfaced as an error (it selects the
/// creation branch instead); the `*NotFound`/`*NotTracked` variants exist for
/// teardown, where there is nothing sensible to tear down.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SheetError {
    #[error("No spreadsheet is tracked for fiat '{fiat}'")]
    SpreadsheetNotFound { fiat: String },

    #[error("Worksheet '{worksheet}' is not tracked for fiat '{fiat}'")]
    WorksheetNotTracked { fiat: String, worksheet: String },

    #[error("Remote spreadsheet service failed while {context}: {message}")]
    Remote { context: String, message: String },

    #[error("Invalid payload: {reason}")]
    Validation { reason: String },
}

impl SheetError {
    /// Create a SpreadsheetNotFound error.
    pub fn spreadsheet_not_found(fiat: impl Into<String>) -> Self {
        Self::SpreadsheetNotFound { fiat: fiat.into() }
    }

    /// Create a WorksheetNotTracked error.
    pub fn worksheet_not_tracked(fiat: impl Into<String>, worksheet: impl Into<String>) -> Self {
        Self::WorksheetNotTracked {
            fiat: fiat.into(),
            worksheet: worksheet.into(),
        }
    }

    /// Create a Remote error. `context` names the operation that was in
    /// flight (e.g. "creating worksheet 'RAW'").
    pub fn remote(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a Validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}
