//! `marketsync-pipeline` — one sync run over the configured sales channels.
//!
//! For each channel, sequentially: fetch offer ids → reconcile stocks →
//! submit stock batches → re-fetch offer ids → build prices → submit price
//! batches. Channels are independent: a failed channel is reported and the
//! next one still runs.

pub mod channel;
pub mod error;
pub mod orchestrator;
pub mod report;

pub use channel::ChannelConfig;
pub use error::{ChannelError, Stage};
pub use orchestrator::{PriceSync, StockSync, SyncOptions, SyncOrchestrator};
pub use report::{ChannelOutcome, ChannelReport, RunReport};
