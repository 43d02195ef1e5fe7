//! Fixed cell layouts and range constants.
//!
//! Pure builders that turn payload pieces into the value ranges and
//! supersede-clear ranges the upsert orchestrator stages. Ranges are written
//! with `USER_ENTERED` semantics remotely, so numbers and `=`-formulas are
//! passed as cell text.

use crate::model::{RawData, Soup};
use crate::remote::{GridBounds, ValueRange};

/// Worksheet holding the raw table; created in lockstep with its filter view.
pub const RAW_WORKSHEET: &str = "RAW";
/// Derived filtered view over [`RAW_WORKSHEET`].
pub const RAW_FILTER_WORKSHEET: &str = "RAW_filter";

/// Range written and cleared for the raw table on every upsert.
pub const RAW_DATA_RANGE: &str = "RAW!A4:Q4500";

/// Grid bounds for the basic filter installed on `RAW_filter` at creation.
pub const RAW_FILTER_BOUNDS: GridBounds = GridBounds {
    row_start: 0,
    row_end: 14,
    col_start: 5,
    col_end: 4500,
};

/// Column header row shared by every soup table.
const SOUP_TABLE_HEADER: [&str; 15] = [
    "Exchange:",
    "Fiat",
    "Asset",
    "TradeType",
    "NickName",
    "Price",
    "MonthOrderCount",
    "MonthFinishRate",
    "UserType",
    "MaxSingleTransAmount",
    "MinSingleTransAmount",
    "LastQuantity",
    "Link",
    "PaymentMethod",
    "monthFinishRate",
];

fn num(value: f64) -> String {
    format!("{}", value)
}

/// Three-cell header block stamped on every newly created worksheet: a write
/// timestamp slot and a minutes-elapsed formula over it.
pub fn timestamp_header(worksheet: &str) -> Vec<ValueRange> {
    vec![
        ValueRange::new(
            format!("'{}'!A1", worksheet),
            vec![vec!["Recorded at:".to_string()]],
        ),
        ValueRange::new(
            format!("'{}'!A2:B2", worksheet),
            vec![vec![
                "Current time".to_string(),
                "=NOW()- TIME(0, 0, 0)".to_string(),
            ]],
        ),
        ValueRange::new(
            format!("'{}'!A3:B3", worksheet),
            vec![vec![
                "Minutes elapsed".to_string(),
                "=IF(B1=\"\", \"\", ROUND((B2 - B1) * 1440,2))".to_string(),
            ]],
        ),
    ]
}

/// Value ranges for one soup: date cell, metadata block, then the filter
/// blocks, header row, and data table starting at A10.
pub fn soup_ranges(soup: &Soup) -> Vec<ValueRange> {
    let mut table: Vec<Vec<String>> = Vec::new();
    for filter in &soup.info_filters {
        table.push(vec!["Exchange:".into(), filter.exchange.clone()]);
        table.push(vec!["Banks:".into(), filter.banks_name.join(", ")]);
        table.push(vec!["Completed orders".into(), filter.month_order.to_string()]);
        table.push(vec![
            "Completed order rate".into(),
            num(filter.month_finish_rate),
        ]);
        table.push(vec![
            "Max lower transaction bound".into(),
            num(filter.max_low_single_trans_amount),
        ]);
        table.push(vec![
            "Min upper transaction bound".into(),
            num(filter.min_high_single_trans_amount),
        ]);
        table.push(vec!["Sample size".into(), filter.average_size.to_string()]);
        table.push(vec!["_______________".into(), "________________".into()]);
    }
    table.push(SOUP_TABLE_HEADER.iter().map(|s| s.to_string()).collect());
    table.extend(soup.data.iter().cloned());

    vec![
        ValueRange::new(
            format!("'{}'!A5", soup.name),
            vec![
                vec!["Fixed Price:".into(), num(soup.fixed_price)],
                vec!["Best Price:".into(), num(soup.best_price)],
                vec!["Best Price Link".into(), soup.best_price_link.clone()],
                vec!["Money Supply:".into(), num(soup.money_supply)],
                vec!["Sample size:".into(), soup.average_size.to_string()],
            ],
        ),
        ValueRange::new(format!("'{}'!B1", soup.name), vec![vec![soup.date.clone()]]),
        ValueRange::new(format!("'{}'!A10", soup.name), table),
    ]
}

/// Clear range that supersedes any previous soup table, wide enough to cover
/// the maximum expected extent so shorter resubmissions leave no stale rows.
pub fn soup_clear_range(worksheet: &str) -> String {
    format!("'{}'!A10:O100", worksheet)
}

/// Value ranges for the raw table, staged on every upsert.
pub fn raw_data_ranges(raw: &RawData) -> Vec<ValueRange> {
    vec![
        ValueRange::new("RAW!B1", vec![vec![raw.date.clone()]]),
        ValueRange::new(RAW_DATA_RANGE, raw.data.clone()),
    ]
}

/// QUERY formula projecting the raw table into the filter view, staged once
/// when the RAW pair is first created.
pub fn raw_filter_formula() -> ValueRange {
    ValueRange::new(
        "RAW_filter!A6",
        vec![vec![
            "=QUERY(RAW!$A4:O,\"select A,B,C,D,E,F,G,H,I,J,K,L,M,N,O\")".to_string(),
        ]],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InfoFilter;

    fn sample_soup() -> Soup {
        Soup {
            name: "BankA".into(),
            fixed_price: 81.5,
            best_price: 80.0,
            best_price_link: "https://example.com/offer".into(),
            date: "2024-01-01".into(),
            money_supply: 1000.0,
            average_size: 20,
            info_filters: vec![InfoFilter {
                exchange: "binance".into(),
                banks_name: vec!["Alpha".into(), "Beta".into()],
                month_order: 120,
                month_finish_rate: 0.97,
                max_low_single_trans_amount: 500.0,
                min_high_single_trans_amount: 10000.0,
                average_size: 20,
            }],
            data: vec![vec!["row1col1".into(), "row1col2".into()]],
        }
    }

    #[test]
    fn timestamp_header_targets_the_named_worksheet() {
        let ranges = timestamp_header("BankA");
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0].range, "'BankA'!A1");
        assert_eq!(ranges[1].range, "'BankA'!A2:B2");
        assert_eq!(ranges[2].range, "'BankA'!A3:B3");
        assert!(ranges[2].values[0][1].starts_with("=IF"));
    }

    #[test]
    fn soup_ranges_cover_metadata_date_and_table() {
        let ranges = soup_ranges(&sample_soup());
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0].range, "'BankA'!A5");
        assert_eq!(ranges[0].values.len(), 5);
        assert_eq!(ranges[1].range, "'BankA'!B1");
        assert_eq!(ranges[1].values, vec![vec!["2024-01-01".to_string()]]);

        // 8 filter rows + header row + 1 data row.
        let table = &ranges[2];
        assert_eq!(table.range, "'BankA'!A10");
        assert_eq!(table.values.len(), 10);
        assert_eq!(table.values[1], vec!["Banks:", "Alpha, Beta"]);
        assert_eq!(table.values[8].len(), 15);
        assert_eq!(table.values[9], vec!["row1col1", "row1col2"]);
    }

    #[test]
    fn soup_without_filters_starts_with_header_row() {
        let mut soup = sample_soup();
        soup.info_filters.clear();
        let ranges = soup_ranges(&soup);
        assert_eq!(ranges[2].values[0].len(), 15);
    }

    #[test]
    fn clear_range_is_quoted_and_wide() {
        assert_eq!(soup_clear_range("BankA"), "'BankA'!A10:O100");
    }

    #[test]
    fn raw_ranges_use_fixed_cells() {
        let raw = RawData {
            date: "2024-01-01".into(),
            data: vec![vec!["x".into()]],
        };
        let ranges = raw_data_ranges(&raw);
        assert_eq!(ranges[0].range, "RAW!B1");
        assert_eq!(ranges[1].range, RAW_DATA_RANGE);
    }
}
