//! Run reporting.

use serde::Serialize;

use marketsync_core::{CampaignId, WarehouseId};

use crate::error::ChannelError;

/// What one successful channel pass did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelReport {
    pub channel: String,
    pub campaign_id: CampaignId,
    pub warehouse_id: WarehouseId,
    /// Offer ids listed before stock reconciliation.
    pub offers_fetched: usize,
    pub stock_updates: usize,
    /// Stock updates reporting a non-zero count.
    pub non_empty_stocks: usize,
    pub stock_batches: usize,
    pub price_updates: usize,
    pub price_batches: usize,
    /// Submissions were skipped.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOutcome {
    pub channel: String,
    pub result: Result<ChannelReport, ChannelError>,
}

/// Outcome of every channel, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<ChannelOutcome>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    pub fn reports(&self) -> impl Iterator<Item = &ChannelReport> {
        self.outcomes.iter().filter_map(|outcome| outcome.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &ChannelError)> {
        self.outcomes.iter().filter_map(|outcome| {
            outcome
                .result
                .as_ref()
                .err()
                .map(|err| (outcome.channel.as_str(), err))
        })
    }
}
