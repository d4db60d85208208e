//! Stock reconciliation.
//!
//! Every offer id the marketplace knows gets exactly one stock update: the
//! mapped local count when the feed has a record with that code, zero
//! otherwise. Offers missing from the feed are thereby reported as sold out
//! instead of keeping a stale count.

use std::collections::HashSet;

use chrono::{DateTime, SubsecRound, Utc};

use marketsync_core::{DataFormatResult, OfferId, StockUpdate, WarehouseId};
use marketsync_inventory::InventoryRecord;

/// Timestamp shared by all updates of one reconciliation pass (second precision).
pub fn pass_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Build the stock update list for one channel.
///
/// - Result length equals the number of distinct ids in `offer_ids`.
/// - Matched updates come first in `records` order, then unmatched ones in
///   `offer_ids` order.
/// - When the feed repeats a code, the first record wins.
/// - Only matched records have their quantity evaluated; an unparsable one
///   fails the whole pass.
pub fn reconcile_stocks(
    records: &[InventoryRecord],
    offer_ids: &[OfferId],
    warehouse_id: &WarehouseId,
    updated_at: DateTime<Utc>,
) -> DataFormatResult<Vec<StockUpdate>> {
    let remote: HashSet<&str> = offer_ids.iter().map(OfferId::as_str).collect();
    let mut emitted: HashSet<&str> = HashSet::with_capacity(remote.len());
    let mut stocks = Vec::with_capacity(remote.len());

    for record in records {
        let code = record.code.as_str();
        if remote.contains(code) && emitted.insert(code) {
            stocks.push(StockUpdate::fit(
                record.code.clone(),
                warehouse_id.clone(),
                record.stock_count()?,
                updated_at,
            ));
        }
    }

    for offer_id in offer_ids {
        if emitted.insert(offer_id.as_str()) {
            stocks.push(StockUpdate::fit(
                offer_id.clone(),
                warehouse_id.clone(),
                0,
                updated_at,
            ));
        }
    }

    Ok(stocks)
}

/// Updates reporting stock on hand (first item count ≠ 0).
pub fn non_empty_stocks(stocks: &[StockUpdate]) -> Vec<&StockUpdate> {
    stocks.iter().filter(|stock| stock.is_non_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    use marketsync_core::DataFormatError;

    use crate::test_support::{inventory, remote_ids};

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn warehouse() -> WarehouseId {
        WarehouseId::new("wh-fbs")
    }

    fn ids(raw: &[&str]) -> Vec<OfferId> {
        raw.iter().map(|id| OfferId::new(*id)).collect()
    }

    fn sku_counts(stocks: &[StockUpdate]) -> Vec<(&str, u32)> {
        stocks
            .iter()
            .map(|s| (s.sku.as_str(), s.count().unwrap()))
            .collect()
    }

    #[test]
    fn matched_record_and_missing_offer() {
        let records = vec![InventoryRecord::new("A1", ">10", "1 990.00 руб.")];

        let stocks = reconcile_stocks(&records, &ids(&["A1", "B2"]), &warehouse(), test_time()).unwrap();

        assert_eq!(sku_counts(&stocks), vec![("A1", 100), ("B2", 0)]);
        assert!(stocks.iter().all(|s| s.warehouse_id == warehouse()));
        assert!(stocks.iter().all(|s| s.items[0].updated_at == test_time()));
        assert!(stocks.iter().all(|s| s.items[0].kind == "FIT"));
    }

    #[test]
    fn quantity_rules_apply_to_matched_records() {
        let records = vec![
            InventoryRecord::new("one", "1", "10"),
            InventoryRecord::new("seven", "7", "10"),
            InventoryRecord::new("many", ">10", "10"),
        ];

        let stocks =
            reconcile_stocks(&records, &ids(&["many", "one", "seven"]), &warehouse(), test_time()).unwrap();

        assert_eq!(sku_counts(&stocks), vec![("one", 0), ("seven", 7), ("many", 100)]);
    }

    #[test]
    fn matched_follow_feed_order_and_precede_unmatched() {
        let records = vec![
            InventoryRecord::new("C", "3", "10"),
            InventoryRecord::new("A", "2", "10"),
        ];

        let stocks = reconcile_stocks(&records, &ids(&["X", "A", "Y", "C"]), &warehouse(), test_time()).unwrap();

        assert_eq!(sku_counts(&stocks), vec![("C", 3), ("A", 2), ("X", 0), ("Y", 0)]);
    }

    #[test]
    fn local_only_records_are_ignored_even_when_malformed() {
        let records = vec![
            InventoryRecord::new("A", "5", "10"),
            InventoryRecord::new("local-only", "n/a", "n/a"),
        ];

        let stocks = reconcile_stocks(&records, &ids(&["A"]), &warehouse(), test_time()).unwrap();

        assert_eq!(sku_counts(&stocks), vec![("A", 5)]);
    }

    #[test]
    fn malformed_matched_quantity_fails_the_pass() {
        let records = vec![InventoryRecord::new("A", "several", "10")];

        let err = reconcile_stocks(&records, &ids(&["A"]), &warehouse(), test_time()).unwrap_err();

        assert_eq!(err, DataFormatError::invalid_quantity("A", "several"));
    }

    #[test]
    fn first_record_wins_for_repeated_codes() {
        let records = vec![
            InventoryRecord::new("A", "4", "10"),
            InventoryRecord::new("A", "9", "10"),
        ];

        let stocks = reconcile_stocks(&records, &ids(&["A"]), &warehouse(), test_time()).unwrap();

        assert_eq!(sku_counts(&stocks), vec![("A", 4)]);
    }

    #[test]
    fn repeated_remote_ids_yield_one_update() {
        let stocks = reconcile_stocks(&[], &ids(&["A", "B", "A"]), &warehouse(), test_time()).unwrap();

        assert_eq!(sku_counts(&stocks), vec![("A", 0), ("B", 0)]);
    }

    #[test]
    fn empty_remote_set_yields_no_updates() {
        let records = vec![InventoryRecord::new("A", "5", "10")];

        let stocks = reconcile_stocks(&records, &[], &warehouse(), test_time()).unwrap();

        assert!(stocks.is_empty());
    }

    #[test]
    fn non_empty_view_keeps_only_positive_counts() {
        let records = vec![
            InventoryRecord::new("A", ">10", "10"),
            InventoryRecord::new("B", "1", "10"),
            InventoryRecord::new("C", "0", "10"),
        ];
        let stocks = reconcile_stocks(&records, &ids(&["A", "B", "C", "D"]), &warehouse(), test_time()).unwrap();

        let non_empty = non_empty_stocks(&stocks);

        assert_eq!(stocks.len(), 4);
        assert_eq!(non_empty.len(), 1);
        assert_eq!(non_empty[0].sku.as_str(), "A");
    }

    #[test]
    fn pass_timestamp_has_no_subsecond_part() {
        assert_eq!(pass_timestamp().timestamp_subsec_nanos(), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every remote id receives exactly one update.
        #[test]
        fn one_update_per_remote_id(records in inventory(), remote in remote_ids()) {
            let stocks = reconcile_stocks(&records, &remote, &warehouse(), test_time()).unwrap();

            prop_assert_eq!(stocks.len(), remote.len());

            let mut skus: Vec<&OfferId> = stocks.iter().map(|s| &s.sku).collect();
            let mut expected: Vec<&OfferId> = remote.iter().collect();
            skus.sort();
            expected.sort();
            prop_assert_eq!(skus, expected);
        }

        /// Property: counts are 100, 0 or the literal integer of the matched record.
        #[test]
        fn counts_follow_the_quantity_rules(records in inventory(), remote in remote_ids()) {
            let stocks = reconcile_stocks(&records, &remote, &warehouse(), test_time()).unwrap();

            for stock in &stocks {
                let count = stock.count().unwrap();
                match records.iter().find(|r| r.code == stock.sku) {
                    None => prop_assert_eq!(count, 0),
                    Some(record) => match record.quantity.as_text().as_str() {
                        ">10" => prop_assert_eq!(count, 100),
                        "1" => prop_assert_eq!(count, 0),
                        other => prop_assert_eq!(Some(count), other.parse::<u32>().ok()),
                    },
                }
            }
        }

        /// Property: the matched prefix is followed only by zero-count fallbacks.
        #[test]
        fn unmatched_updates_form_the_suffix(records in inventory(), remote in remote_ids()) {
            let stocks = reconcile_stocks(&records, &remote, &warehouse(), test_time()).unwrap();
            let is_local = |sku: &OfferId| records.iter().any(|r| &r.code == sku);

            let first_unmatched = stocks.iter().position(|s| !is_local(&s.sku)).unwrap_or(stocks.len());
            let (head, tail) = stocks.split_at(first_unmatched);
            prop_assert!(head.iter().all(|s| is_local(&s.sku)));
            prop_assert!(tail.iter().all(|s| !is_local(&s.sku) && s.count() == Some(0)));
        }

        /// Property: the matched prefix lists codes in the order the feed first names them.
        #[test]
        fn matched_prefix_follows_feed_order(records in inventory(), remote in remote_ids()) {
            let stocks = reconcile_stocks(&records, &remote, &warehouse(), test_time()).unwrap();

            let mut expected: Vec<&OfferId> = Vec::new();
            for record in &records {
                if remote.contains(&record.code) && !expected.contains(&&record.code) {
                    expected.push(&record.code);
                }
            }
            let matched: Vec<&OfferId> = stocks.iter().take(expected.len()).map(|s| &s.sku).collect();
            prop_assert_eq!(matched, expected);
        }

        /// Property: reconciliation neither consumes its inputs nor depends on
        /// anything but them and the timestamp.
        #[test]
        fn rerunning_is_idempotent(records in inventory(), remote in remote_ids()) {
            let first = reconcile_stocks(&records, &remote, &warehouse(), test_time()).unwrap();
            let second = reconcile_stocks(&records, &remote, &warehouse(), pass_timestamp()).unwrap();

            let strip = |stocks: &[StockUpdate]| -> Vec<(OfferId, Option<u32>)> {
                stocks.iter().map(|s| (s.sku.clone(), s.count())).collect()
            };
            prop_assert_eq!(strip(&first), strip(&second));
        }
    }
}
