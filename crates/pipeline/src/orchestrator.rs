//! Sync orchestration.

use marketsync_core::{OfferId, PriceUpdate, StockUpdate};
use marketsync_inventory::InventoryRecord;
use marketsync_market::{DEFAULT_MAX_PAGES, MarketApi, fetch_offer_ids};
use marketsync_reconcile::{
    PRICE_BATCH_SIZE, STOCK_BATCH_SIZE, batches, build_prices, non_empty_stocks, pass_timestamp,
    reconcile_stocks,
};

use crate::channel::ChannelConfig;
use crate::error::{ChannelError, Stage};
use crate::report::{ChannelOutcome, ChannelReport, RunReport};

/// Orchestrator configuration.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Cap on listing pages per offer id walk.
    pub max_pages: usize,
    /// Build everything but skip the stock and price submissions.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            dry_run: false,
        }
    }
}

impl SyncOptions {
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of the stock half of a channel pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockSync {
    pub offers_fetched: usize,
    /// The full payload, as submitted.
    pub stocks: Vec<StockUpdate>,
    pub batches: usize,
}

impl StockSync {
    /// Updates reporting stock on hand; the submitted payload is untouched.
    pub fn non_empty(&self) -> Vec<&StockUpdate> {
        non_empty_stocks(&self.stocks)
    }
}

/// Result of the price half of a channel pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSync {
    pub offers_fetched: usize,
    pub prices: Vec<PriceUpdate>,
    pub batches: usize,
}

/// Runs the per-channel pipeline against a [`MarketApi`].
#[derive(Debug)]
pub struct SyncOrchestrator<A> {
    api: A,
    options: SyncOptions,
}

impl<A: MarketApi> SyncOrchestrator<A> {
    pub fn new(api: A, options: SyncOptions) -> Self {
        Self { api, options }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Sync every channel in order. A failed channel does not stop the others.
    pub fn run(&self, records: &[InventoryRecord], channels: &[ChannelConfig]) -> RunReport {
        tracing::info!(
            records = records.len(),
            channels = channels.len(),
            dry_run = self.options.dry_run,
            "starting sync run"
        );

        let mut report = RunReport::default();

        for channel in channels {
            let result = self.sync_channel(records, channel);

            match &result {
                Ok(summary) => tracing::info!(
                    channel = %channel.name,
                    stock_updates = summary.stock_updates,
                    non_empty_stocks = summary.non_empty_stocks,
                    price_updates = summary.price_updates,
                    "channel synced"
                ),
                Err(err) => tracing::error!(
                    channel = %channel.name,
                    kind = %err.kind(),
                    "{}",
                    err.operator_message()
                ),
            }

            report.outcomes.push(ChannelOutcome {
                channel: channel.name.clone(),
                result,
            });
        }

        report
    }

    /// Full pass for one channel: stocks first, then prices.
    pub fn sync_channel(
        &self,
        records: &[InventoryRecord],
        channel: &ChannelConfig,
    ) -> Result<ChannelReport, ChannelError> {
        let stocks = self.upload_stocks(records, channel)?;
        let prices = self.upload_prices(records, channel)?;

        Ok(ChannelReport {
            channel: channel.name.clone(),
            campaign_id: channel.campaign_id.clone(),
            warehouse_id: channel.warehouse_id.clone(),
            offers_fetched: stocks.offers_fetched,
            stock_updates: stocks.stocks.len(),
            non_empty_stocks: stocks.non_empty().len(),
            stock_batches: stocks.batches,
            price_updates: prices.prices.len(),
            price_batches: prices.batches,
            dry_run: self.options.dry_run,
        })
    }

    /// Fetch offer ids, reconcile stocks and submit them in batches.
    pub fn upload_stocks(
        &self,
        records: &[InventoryRecord],
        channel: &ChannelConfig,
    ) -> Result<StockSync, ChannelError> {
        let offer_ids = self.fetch_offer_ids(channel)?;
        let stocks = reconcile_stocks(records, &offer_ids, &channel.warehouse_id, pass_timestamp())?;

        let mut sent = 0;
        for batch in batches(&stocks, STOCK_BATCH_SIZE) {
            if self.options.dry_run {
                tracing::info!(channel = %channel.name, size = batch.len(), "dry run: skipping stock batch");
            } else {
                self.api
                    .update_stocks(&channel.campaign_id, batch)
                    .map_err(ChannelError::market(Stage::SubmitStocks))?;
                tracing::debug!(channel = %channel.name, size = batch.len(), "submitted stock batch");
            }
            sent += 1;
        }

        tracing::info!(
            channel = %channel.name,
            offers = offer_ids.len(),
            stock_updates = stocks.len(),
            batches = sent,
            "stocks uploaded"
        );

        Ok(StockSync {
            offers_fetched: offer_ids.len(),
            stocks,
            batches: sent,
        })
    }

    /// Re-fetch offer ids, build prices for listed offers and submit them in batches.
    pub fn upload_prices(
        &self,
        records: &[InventoryRecord],
        channel: &ChannelConfig,
    ) -> Result<PriceSync, ChannelError> {
        let offer_ids = self.fetch_offer_ids(channel)?;
        let prices = build_prices(records, &offer_ids)?;

        let mut sent = 0;
        for batch in batches(&prices, PRICE_BATCH_SIZE) {
            if self.options.dry_run {
                tracing::info!(channel = %channel.name, size = batch.len(), "dry run: skipping price batch");
            } else {
                self.api
                    .update_prices(&channel.campaign_id, batch)
                    .map_err(ChannelError::market(Stage::SubmitPrices))?;
                tracing::debug!(channel = %channel.name, size = batch.len(), "submitted price batch");
            }
            sent += 1;
        }

        tracing::info!(
            channel = %channel.name,
            offers = offer_ids.len(),
            price_updates = prices.len(),
            batches = sent,
            "prices uploaded"
        );

        Ok(PriceSync {
            offers_fetched: offer_ids.len(),
            prices,
            batches: sent,
        })
    }

    fn fetch_offer_ids(&self, channel: &ChannelConfig) -> Result<Vec<OfferId>, ChannelError> {
        fetch_offer_ids(&self.api, &channel.campaign_id, self.options.max_pages)
            .map_err(ChannelError::market(Stage::FetchOffers))
    }
}
