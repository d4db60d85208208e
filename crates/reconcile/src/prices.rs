//! Price updates for offers already listed on the marketplace.

use std::collections::HashSet;

use marketsync_core::{DataFormatResult, OfferId, PriceUpdate};
use marketsync_inventory::InventoryRecord;

/// Build one price update per record whose code the marketplace knows.
///
/// Unlike stock reconciliation nothing is synthesized for offers missing from
/// the feed, and records unknown to the marketplace are skipped. Output
/// follows record order.
pub fn build_prices(records: &[InventoryRecord], offer_ids: &[OfferId]) -> DataFormatResult<Vec<PriceUpdate>> {
    let known: HashSet<&str> = offer_ids.iter().map(OfferId::as_str).collect();

    records
        .iter()
        .filter(|record| known.contains(record.code.as_str()))
        .map(|record| {
            record
                .price_value()
                .map(|value| PriceUpdate::rur(record.code.clone(), value))
        })
        .collect()
}
