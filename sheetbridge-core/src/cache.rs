//! In-memory identity cache.
//!
//! Tracks which spreadsheet identifier backs each fiat key and which
//! worksheets are already known to exist inside it, so the orchestrators can
//! make create-or-update decisions without a remote round trip per call.
//!
//! The cache is an optimization layer, never the system of record: it has no
//! persistence and is rebuilt from remote truth on every process start by
//! [`SheetControl::reconcile`](crate::control::SheetControl::reconcile).
//! A worksheet name is only marked present after its remote creation has
//! returned success or it was discovered during reconciliation.
//!
//! Both maps live behind a single reader/writer lock: worksheet-set mutations
//! for different fiats do not strictly need to block each other, but one
//! coarse lock keeps the identifier mapping and the worksheet set removable
//! in a single atomic step, and write volume is low. The lock is never held
//! across network I/O.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use crate::error::{SheetError, SheetResult};

#[derive(Debug, Default)]
struct CacheInner {
    /// fiat key -> spreadsheet identifier
    spreadsheet_ids: HashMap<String, String>,
    /// fiat key -> worksheet titles known to exist
    worksheets: HashMap<String, HashSet<String>>,
}

/// Shared cache of spreadsheet identities and known worksheet sets.
#[derive(Debug, Default)]
pub struct SheetCache {
    inner: RwLock<CacheInner>,
}

impl SheetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the spreadsheet identifier for a fiat key.
    ///
    /// Returns `None` on a miss so callers branch directly instead of
    /// matching on an error: upsert takes the creation path, teardown
    /// surfaces [`SheetError::SpreadsheetNotFound`].
    pub async fn spreadsheet_id(&self, fiat: &str) -> Option<String> {
        self.inner.read().await.spreadsheet_ids.get(fiat).cloned()
    }

    /// Unconditionally record the spreadsheet identifier for a fiat key,
    /// ensuring an (initially empty) worksheet set exists for it.
    ///
    /// Last write wins: two concurrent first-upserts for the same fiat may
    /// both create a spreadsheet remotely, and whichever registers second is
    /// the one the cache considers authoritative afterwards.
    pub async fn set_spreadsheet_id(&self, fiat: &str, spreadsheet_id: &str) {
        let mut inner = self.inner.write().await;
        inner
            .spreadsheet_ids
            .insert(fiat.to_string(), spreadsheet_id.to_string());
        inner.worksheets.entry(fiat.to_string()).or_default();
    }

    /// Whether `worksheet` is known to exist for `fiat`.
    ///
    /// An unknown fiat key answers `false`, not an error: "no spreadsheet
    /// yet" and "no such worksheet yet" both mean "must create".
    pub async fn has_worksheet(&self, fiat: &str, worksheet: &str) -> bool {
        self.inner
            .read()
            .await
            .worksheets
            .get(fiat)
            .is_some_and(|set| set.contains(worksheet))
    }

    /// Record that `worksheet` exists for `fiat`, lazily creating the set.
    pub async fn mark_worksheet_present(&self, fiat: &str, worksheet: &str) {
        self.inner
            .write()
            .await
            .worksheets
            .entry(fiat.to_string())
            .or_default()
            .insert(worksheet.to_string());
    }

    /// Remove `worksheet` from the fiat's known set.
    ///
    /// Fails if the fiat key itself is unknown (nothing to remove from);
    /// removing a name that was never present is a no-op.
    pub async fn remove_worksheet(&self, fiat: &str, worksheet: &str) -> SheetResult<()> {
        let mut inner = self.inner.write().await;
        match inner.worksheets.get_mut(fiat) {
            Some(set) => {
                set.remove(worksheet);
                Ok(())
            }
            None => Err(SheetError::spreadsheet_not_found(fiat)),
        }
    }

    /// Remove the fiat's identifier mapping and its entire worksheet set in
    /// one atomic step. Idempotent: unknown keys succeed silently.
    pub async fn remove_currency(&self, fiat: &str) {
        let mut inner = self.inner.write().await;
        inner.spreadsheet_ids.remove(fiat);
        inner.worksheets.remove(fiat);
    }

    /// Merge a fiat -> identifier mapping into the cache, initializing empty
    /// worksheet sets for new keys. Entries for fiats not present in the
    /// input are left untouched. Used only by reconciliation.
    pub async fn bulk_seed(&self, identifiers: HashMap<String, String>) {
        let mut inner = self.inner.write().await;
        for (fiat, spreadsheet_id) in identifiers {
            inner.worksheets.entry(fiat.clone()).or_default();
            inner.spreadsheet_ids.insert(fiat, spreadsheet_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn miss_returns_none() {
        let cache = SheetCache::new();
        assert_eq!(cache.spreadsheet_id("USD").await, None);
        assert!(!cache.has_worksheet("USD", "RAW").await);
    }

    #[tokio::test]
    async fn set_then_get() {
        let cache = SheetCache::new();
        cache.set_spreadsheet_id("USD", "id-1").await;
        assert_eq!(cache.spreadsheet_id("USD").await, Some("id-1".into()));
        // Worksheet set exists but is empty.
        assert!(!cache.has_worksheet("USD", "RAW").await);
    }

    #[tokio::test]
    async fn set_spreadsheet_id_is_last_write_wins() {
        let cache = SheetCache::new();
        cache.set_spreadsheet_id("USD", "id-1").await;
        cache.set_spreadsheet_id("USD", "id-2").await;
        assert_eq!(cache.spreadsheet_id("USD").await, Some("id-2".into()));
    }

    #[tokio::test]
    async fn mark_and_remove_worksheet() {
        let cache = SheetCache::new();
        cache.set_spreadsheet_id("USD", "id-1").await;
        cache.mark_worksheet_present("USD", "BankA").await;
        cache.mark_worksheet_present("USD", "BankB").await;
        assert!(cache.has_worksheet("USD", "BankA").await);

        cache.remove_worksheet("USD", "BankA").await.unwrap();
        assert!(!cache.has_worksheet("USD", "BankA").await);
        // Siblings are left intact.
        assert!(cache.has_worksheet("USD", "BankB").await);
    }

    #[tokio::test]
    async fn remove_worksheet_is_idempotent_per_name() {
        let cache = SheetCache::new();
        cache.set_spreadsheet_id("USD", "id-1").await;
        // Name never present: still Ok.
        cache.remove_worksheet("USD", "nope").await.unwrap();
    }

    #[tokio::test]
    async fn remove_worksheet_unknown_fiat_fails() {
        let cache = SheetCache::new();
        let err = cache.remove_worksheet("EUR", "RAW").await.unwrap_err();
        assert_eq!(err, SheetError::spreadsheet_not_found("EUR"));
    }

    #[tokio::test]
    async fn mark_worksheet_without_prior_spreadsheet_entry() {
        // Reconciliation may mark worksheets for fiats seeded via bulk_seed;
        // marking must lazily create the set either way.
        let cache = SheetCache::new();
        cache.mark_worksheet_present("USD", "RAW").await;
        assert!(cache.has_worksheet("USD", "RAW").await);
    }

    #[tokio::test]
    async fn remove_currency_drops_both_maps() {
        let cache = SheetCache::new();
        cache.set_spreadsheet_id("USD", "id-1").await;
        cache.mark_worksheet_present("USD", "RAW").await;

        cache.remove_currency("USD").await;
        assert_eq!(cache.spreadsheet_id("USD").await, None);
        assert!(!cache.has_worksheet("USD", "RAW").await);
        // Unknown key: still fine.
        cache.remove_currency("USD").await;
    }

    #[tokio::test]
    async fn bulk_seed_merges_without_disturbing_existing_keys() {
        let cache = SheetCache::new();
        cache.set_spreadsheet_id("USD", "id-usd").await;
        cache.mark_worksheet_present("USD", "RAW").await;

        let seed: HashMap<String, String> =
            [("EUR".to_string(), "id-eur".to_string())].into_iter().collect();
        cache.bulk_seed(seed).await;

        assert_eq!(cache.spreadsheet_id("USD").await, Some("id-usd".into()));
        assert!(cache.has_worksheet("USD", "RAW").await);
        assert_eq!(cache.spreadsheet_id("EUR").await, Some("id-eur".into()));
        assert!(!cache.has_worksheet("EUR", "RAW").await);
    }
}
