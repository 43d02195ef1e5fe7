//! Control layer: startup reconciliation plus the upsert and teardown
//! orchestrators.
//!
//! [`SheetControl`] sits between the HTTP surface and the remote spreadsheet
//! service. It reads the identity cache to decide what already exists,
//! performs the necessary remote calls outside any cache lock, and records
//! successful outcomes back into the cache. Repeated calls never duplicate
//! spreadsheets or worksheets; the clear-then-write staging keeps re-submitted
//! payloads from accumulating stale rows.
//!
//! There are no retries and no rollback: a call that provisions a spreadsheet
//! and then fails leaves the spreadsheet in place for the next attempt to
//! find via the cache.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::SheetCache;
use crate::error::{SheetError, SheetResult};
use crate::layout;
use crate::model::SheetPayload;
use crate::remote::{PermissionService, SpreadsheetService, ValueRange};

/// Orchestrates cache-aware operations against the remote services.
pub struct SheetControl {
    sheets: Arc<dyn SpreadsheetService>,
    permissions: Arc<dyn PermissionService>,
    cache: Arc<SheetCache>,
    /// Addresses granted write access when a spreadsheet is provisioned.
    notify_emails: Vec<String>,
}

impl SheetControl {
    pub fn new(
        sheets: Arc<dyn SpreadsheetService>,
        permissions: Arc<dyn PermissionService>,
        cache: Arc<SheetCache>,
        notify_emails: Vec<String>,
    ) -> Self {
        Self {
            sheets,
            permissions,
            cache,
            notify_emails,
        }
    }

    /// Rebuild the cache from remote truth.
    ///
    /// Must complete before any upsert or teardown call is accepted: an
    /// unseeded cache would send every upsert down the "create new
    /// spreadsheet" branch and spawn duplicates per fiat.
    ///
    /// The top-level enumeration is fatal. Per-spreadsheet worksheet
    /// enumeration failures are logged and skipped; the affected fiat keeps
    /// an empty worksheet set and later upserts recreate what they need.
    pub async fn reconcile(&self) -> SheetResult<()> {
        let identifiers: HashMap<String, String> =
            self.sheets.list_all().await?.into_iter().collect();
        self.cache.bulk_seed(identifiers.clone()).await;

        for (fiat, spreadsheet_id) in &identifiers {
            let worksheets = match self.sheets.list_worksheets(spreadsheet_id).await {
                Ok(worksheets) => worksheets,
                Err(err) => {
                    tracing::warn!(%fiat, %spreadsheet_id, %err, "worksheet enumeration failed, skipping");
                    continue;
                }
            };
            let count = worksheets.len();
            for worksheet in worksheets {
                self.cache.mark_worksheet_present(fiat, &worksheet).await;
            }
            tracing::debug!(%fiat, worksheets = count, "seeded worksheet set");
        }

        tracing::info!(spreadsheets = identifiers.len(), "cache reconciled against remote state");
        Ok(())
    }

    /// Upsert one currency-scoped payload.
    ///
    /// Ensures the backing spreadsheet and every referenced worksheet exist
    /// (creating lazily on first use), then clears the superseded ranges and
    /// writes the fresh values as two batched remote calls.
    pub async fn upsert(&self, payload: &SheetPayload) -> SheetResult<()> {
        validate(payload)?;
        let fiat = payload.fiat.as_str();

        let spreadsheet_id = match self.cache.spreadsheet_id(fiat).await {
            Some(id) => id,
            None => self.provision_spreadsheet(fiat).await?,
        };

        let mut writes: Vec<ValueRange> = Vec::new();
        let mut clears: Vec<String> = Vec::new();

        for soup in &payload.soup_list {
            if !self.cache.has_worksheet(fiat, &soup.name).await {
                self.create_worksheet_with_header(fiat, &spreadsheet_id, &soup.name)
                    .await?;
            }
            writes.extend(layout::soup_ranges(soup));
            clears.push(layout::soup_clear_range(&soup.name));
        }

        if !self.cache.has_worksheet(fiat, layout::RAW_WORKSHEET).await {
            self.provision_raw_pair(fiat, &spreadsheet_id).await?;
            writes.push(layout::raw_filter_formula());
        }
        writes.extend(layout::raw_data_ranges(&payload.raw_data));
        clears.push(layout::RAW_DATA_RANGE.to_string());

        self.sheets
            .clear_ranges(&spreadsheet_id, clears)
            .await
            .inspect_err(|err| tracing::error!(%fiat, %err, "clearing superseded ranges failed"))?;
        self.sheets
            .write_ranges(&spreadsheet_id, writes)
            .await
            .inspect_err(|err| tracing::error!(%fiat, %err, "writing staged ranges failed"))?;

        tracing::info!(%fiat, soups = payload.soup_list.len(), "sheet data upserted");
        Ok(())
    }

    /// Delete one worksheet for a fiat key.
    ///
    /// Refuses names the cache never tracked, so a stale or mistyped name
    /// cannot delete an unrelated remote worksheet.
    pub async fn delete_worksheet(&self, fiat: &str, worksheet: &str) -> SheetResult<()> {
        let spreadsheet_id = self
            .cache
            .spreadsheet_id(fiat)
            .await
            .ok_or_else(|| SheetError::spreadsheet_not_found(fiat))?;

        if !self.cache.has_worksheet(fiat, worksheet).await {
            return Err(SheetError::worksheet_not_tracked(fiat, worksheet));
        }

        self.sheets
            .delete_worksheet(&spreadsheet_id, worksheet)
            .await
            .inspect_err(|err| tracing::error!(%fiat, %worksheet, %err, "remote worksheet deletion failed"))?;

        // Remote state already changed; a bookkeeping failure here must not
        // fail the call.
        if let Err(err) = self.cache.remove_worksheet(fiat, worksheet).await {
            tracing::warn!(%fiat, %worksheet, %err, "worksheet deleted remotely but cache update failed");
        }

        tracing::info!(%fiat, %worksheet, "worksheet deleted");
        Ok(())
    }

    /// Delete a fiat's entire spreadsheet and forget the fiat.
    pub async fn delete_spreadsheet(&self, fiat: &str) -> SheetResult<()> {
        let spreadsheet_id = self
            .cache
            .spreadsheet_id(fiat)
            .await
            .ok_or_else(|| SheetError::spreadsheet_not_found(fiat))?;

        self.sheets
            .delete_spreadsheet(&spreadsheet_id)
            .await
            .inspect_err(|err| tracing::error!(%fiat, %spreadsheet_id, %err, "remote spreadsheet deletion failed"))?;

        self.cache.remove_currency(fiat).await;
        tracing::info!(%fiat, %spreadsheet_id, "spreadsheet deleted");
        Ok(())
    }

    /// Create a spreadsheet named after the fiat, grant write access to the
    /// configured addresses, and register the identifier in the cache.
    async fn provision_spreadsheet(&self, fiat: &str) -> SheetResult<String> {
        let spreadsheet_id = self
            .sheets
            .create_spreadsheet(fiat)
            .await
            .inspect_err(|err| tracing::error!(%fiat, %err, "spreadsheet creation failed"))?;
        self.permissions
            .grant_write(&spreadsheet_id, &self.notify_emails)
            .await
            .inspect_err(|err| tracing::error!(%fiat, %spreadsheet_id, %err, "permission grant failed"))?;
        self.cache.set_spreadsheet_id(fiat, &spreadsheet_id).await;
        tracing::info!(%fiat, %spreadsheet_id, "spreadsheet provisioned");
        Ok(spreadsheet_id)
    }

    /// Create one worksheet, record it, and stamp its timestamp header.
    async fn create_worksheet_with_header(
        &self,
        fiat: &str,
        spreadsheet_id: &str,
        worksheet: &str,
    ) -> SheetResult<()> {
        self.sheets
            .create_worksheet(spreadsheet_id, worksheet)
            .await
            .inspect_err(|err| tracing::error!(%fiat, %worksheet, %err, "worksheet creation failed"))?;
        self.cache.mark_worksheet_present(fiat, worksheet).await;
        self.sheets
            .write_ranges(spreadsheet_id, layout::timestamp_header(worksheet))
            .await
            .inspect_err(|err| tracing::error!(%fiat, %worksheet, %err, "timestamp header write failed"))?;
        Ok(())
    }

    /// Create the RAW worksheet together with its filtered view.
    ///
    /// The pair always exists together; only RAW's presence is ever checked,
    /// but both names are recorded once their creations succeed.
    async fn provision_raw_pair(&self, fiat: &str, spreadsheet_id: &str) -> SheetResult<()> {
        self.create_worksheet_with_header(fiat, spreadsheet_id, layout::RAW_WORKSHEET)
            .await?;
        self.sheets
            .create_worksheet(spreadsheet_id, layout::RAW_FILTER_WORKSHEET)
            .await
            .inspect_err(|err| tracing::error!(%fiat, %err, "RAW_filter creation failed"))?;
        self.cache
            .mark_worksheet_present(fiat, layout::RAW_FILTER_WORKSHEET)
            .await;

        let grid_id = self
            .sheets
            .worksheet_grid_id(spreadsheet_id, layout::RAW_FILTER_WORKSHEET)
            .await
            .inspect_err(|err| tracing::error!(%fiat, %err, "RAW_filter grid id lookup failed"))?;
        self.sheets
            .create_basic_filter(spreadsheet_id, grid_id, layout::RAW_FILTER_BOUNDS)
            .await
            .inspect_err(|err| tracing::error!(%fiat, %err, "basic filter creation failed"))?;
        Ok(())
    }
}

fn validate(payload: &SheetPayload) -> SheetResult<()> {
    if payload.fiat.trim().is_empty() {
        return Err(SheetError::validation("fiat must not be empty"));
    }
    for soup in &payload.soup_list {
        if soup.name.trim().is_empty() {
            return Err(SheetError::validation("soup name must not be empty"));
        }
    }
    Ok(())
}
