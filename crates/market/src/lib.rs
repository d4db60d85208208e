//! `marketsync-market` — marketplace partner API access.
//!
//! The rest of the workspace talks to the marketplace through [`MarketApi`].
//! [`HttpMarketClient`] is the production implementation; [`InMemoryMarket`]
//! serves tests and dry local runs.

pub mod api;
pub mod client;
pub mod error;
pub mod in_memory;
pub mod pagination;
pub mod wire;

pub use api::{MarketApi, OfferMappingPage};
pub use client::{DEFAULT_BASE_URL, HttpMarketClient, MarketClientConfig};
pub use error::{FailureKind, MarketError, MarketResult};
pub use in_memory::{Endpoint, InMemoryMarket};
pub use pagination::{DEFAULT_MAX_PAGES, OfferIdPages, PAGE_SIZE, fetch_offer_ids};
