//! sheetbridge core - cache-and-reconciliation layer
//!
//! This crate holds the part of sheetbridge with real invariants: the
//! in-memory identity cache (fiat -> spreadsheet identifier -> known
//! worksheets), the startup reconciler that rebuilds it from remote truth,
//! and the upsert/teardown orchestrators that drive idempotent
//! create-or-update decisions against the remote spreadsheet service.
//!
//! The remote service itself is abstracted behind the traits in [`remote`];
//! the Google-backed implementation lives in `sheetbridge-google` and the
//! HTTP surface in `sheetbridge-api`.

pub mod cache;
pub mod control;
pub mod error;
pub mod layout;
pub mod model;
pub mod remote;

// Re-export commonly used types
pub use cache::SheetCache;
pub use control::SheetControl;
pub use error::{SheetError, SheetResult};
pub use model::{InfoFilter, RawData, SheetPayload, Soup};
pub use remote::{GridBounds, PermissionService, SpreadsheetService, ValueRange};
