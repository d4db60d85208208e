//! Inventory snapshot module.
//!
//! This crate contains the local side of a sync run: the records of the
//! supplier's stock feed and the fixed business rules that turn their
//! quantity and price columns into marketplace values. Loading the feed is
//! the only IO here.

pub mod feed;
pub mod price;
pub mod quantity;
pub mod record;

pub use feed::{FeedError, load_feed, parse_feed};
pub use price::convert_price;
pub use quantity::QuantityDescriptor;
pub use record::InventoryRecord;
