//! `marketsync-reconcile` — local snapshot vs. remote catalog.
//!
//! Pure, deterministic logic (no IO): turns inventory records and the set of
//! offer ids the marketplace knows into stock and price update lists, and
//! chunks those lists to the API's payload limits.

pub mod batch;
pub mod prices;
pub mod stocks;

pub use batch::{Batches, PRICE_BATCH_SIZE, STOCK_BATCH_SIZE, batches};
pub use prices::build_prices;
pub use stocks::{non_empty_stocks, pass_timestamp, reconcile_stocks};
