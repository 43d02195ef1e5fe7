//! Incoming payload model.
//!
//! A [`SheetPayload`] is the unit of work for one upsert call: the fiat key
//! that selects the backing spreadsheet, zero or more named datasets
//! ("soups") that each render to their own worksheet, and the always-present
//! raw table. Payloads are immutable once submitted and consumed entirely
//! within a single upsert.

use serde::{Deserialize, Serialize};

/// Filter metadata describing how one soup's rows were selected upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InfoFilter {
    pub exchange: String,
    pub banks_name: Vec<String>,
    pub month_order: i64,
    pub month_finish_rate: f64,
    pub max_low_single_trans_amount: f64,
    pub min_high_single_trans_amount: f64,
    pub average_size: i64,
}

/// One named dataset within a payload, rendered to its own worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Soup {
    /// Worksheet name. Must be non-empty.
    pub name: String,
    pub fixed_price: f64,
    pub best_price: f64,
    pub best_price_link: String,
    pub date: String,
    pub money_supply: f64,
    pub average_size: i64,
    #[serde(default)]
    pub info_filters: Vec<InfoFilter>,
    /// 2-D table of cell text, written below the soup's metadata block.
    #[serde(default)]
    pub data: Vec<Vec<String>>,
}

/// The raw table written to the `RAW` worksheet on every upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RawData {
    pub date: String,
    #[serde(rename = "raw_data", default)]
    pub data: Vec<Vec<String>>,
}

/// The full currency-scoped payload submitted for one upsert call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SheetPayload {
    /// Currency key; doubles as the spreadsheet title.
    pub fiat: String,
    #[serde(default)]
    pub soup_list: Vec<Soup>,
    pub raw_data: RawData,
}
