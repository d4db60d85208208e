//! `marketsync-core` — shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no IO): identifiers, the
//! data-format error, and the update payloads pushed to the marketplace.

pub mod error;
pub mod id;
pub mod update;

pub use error::{DataFormatError, DataFormatResult};
pub use id::{CampaignId, OfferId, WarehouseId};
pub use update::{
    CURRENCY_RUR, PriceUpdate, PriceValue, STOCK_TYPE_FIT, StockItem, StockUpdate,
};
