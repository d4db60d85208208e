//! `marketsync` binary support: configuration and the run entry point.

pub mod config;

use anyhow::Context;

use marketsync_inventory::load_feed;
use marketsync_market::HttpMarketClient;
use marketsync_pipeline::{RunReport, SyncOrchestrator};

pub use config::{ConfigError, SyncConfig};

/// Load the feed, sync every configured channel and print one JSON summary
/// line per synced channel to stdout.
pub fn run(config: &SyncConfig) -> anyhow::Result<RunReport> {
    let records = load_feed(&config.inventory_feed).context("loading inventory feed")?;

    let client = HttpMarketClient::new(config.client_config()).context("building marketplace client")?;
    let orchestrator = SyncOrchestrator::new(client, config.sync_options());

    let report = orchestrator.run(&records, &config.channels);

    for summary in report.reports() {
        println!("{}", serde_json::to_string(summary)?);
    }

    Ok(report)
}
