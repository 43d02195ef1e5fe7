//! Shared application state for the API server.

use sheetbridge_core::SheetControl;
use std::sync::Arc;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator over the identity cache and the remote spreadsheet service.
    pub control: Arc<SheetControl>,
}

impl AppState {
    pub fn new(control: Arc<SheetControl>) -> Self {
        Self { control }
    }
}
