//! Configuration loading from the environment.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `MARKET_TOKEN` | partner API bearer token | required |
//! | `FBS_ID` / `WAREHOUSE_FBS_ID` | FBS campaign / warehouse | required |
//! | `DBS_ID` / `WAREHOUSE_DBS_ID` | DBS campaign / warehouse | required |
//! | `INVENTORY_FEED` | path of the feed JSON | required |
//! | `MARKET_API_URL` | API base URL | production endpoint |
//! | `MARKET_TIMEOUT_SECS` | request timeout | 30 |
//! | `MARKET_MAX_PAGES` | listing page cap | 1000 |
//! | `MARKETSYNC_DRY_RUN` | skip submissions | false |
//! | `MARKETSYNC_LOG_FORMAT` | `json` / `pretty` | json |

use std::path::PathBuf;
use std::time::Duration;

use marketsync_core::{CampaignId, WarehouseId};
use marketsync_market::{DEFAULT_BASE_URL, DEFAULT_MAX_PAGES, MarketClientConfig};
use marketsync_observability::LogFormat;
use marketsync_pipeline::{ChannelConfig, SyncOptions};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Everything one sync run needs.
#[derive(Clone)]
pub struct SyncConfig {
    pub market_token: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_pages: usize,
    pub dry_run: bool,
    pub inventory_feed: PathBuf,
    pub log_format: LogFormat,
    /// FBS first, then DBS.
    pub channels: Vec<ChannelConfig>,
}

impl core::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("market_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_pages", &self.max_pages)
            .field("dry_run", &self.dry_run)
            .field("inventory_feed", &self.inventory_feed)
            .field("log_format", &self.log_format)
            .field("channels", &self.channels)
            .finish()
    }
}

impl SyncConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let channel = |name: &str, campaign_key: &'static str, warehouse_key: &'static str| {
            let campaign_id: CampaignId = required(campaign_key)?
                .parse()
                .map_err(|e| ConfigError::invalid(campaign_key, format!("{e}")))?;
            let warehouse_id: WarehouseId = required(warehouse_key)?
                .parse()
                .map_err(|e| ConfigError::invalid(warehouse_key, format!("{e}")))?;
            Ok::<_, ConfigError>(ChannelConfig::new(name, campaign_id, warehouse_id))
        };

        let channels = vec![
            channel("FBS", "FBS_ID", "WAREHOUSE_FBS_ID")?,
            channel("DBS", "DBS_ID", "WAREHOUSE_DBS_ID")?,
        ];

        let timeout_secs = match get("MARKET_TIMEOUT_SECS") {
            Some(raw) => parse_positive("MARKET_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let max_pages = match get("MARKET_MAX_PAGES") {
            Some(raw) => parse_positive("MARKET_MAX_PAGES", &raw)? as usize,
            None => DEFAULT_MAX_PAGES,
        };
        let dry_run = match get("MARKETSYNC_DRY_RUN") {
            Some(raw) => parse_bool("MARKETSYNC_DRY_RUN", &raw)?,
            None => false,
        };

        Ok(Self {
            market_token: required("MARKET_TOKEN")?,
            base_url: get("MARKET_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            max_pages,
            dry_run,
            inventory_feed: PathBuf::from(required("INVENTORY_FEED")?),
            log_format: log_format_from_lookup(&lookup)?,
            channels,
        })
    }

    pub fn client_config(&self) -> MarketClientConfig {
        MarketClientConfig::new(self.market_token.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout)
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions::default()
            .with_max_pages(self.max_pages)
            .with_dry_run(self.dry_run)
    }
}

/// `MARKETSYNC_LOG_FORMAT`, read on its own so logging can start before the
/// rest of the configuration is validated.
pub fn log_format_from_env() -> Result<LogFormat, ConfigError> {
    log_format_from_lookup(|key| std::env::var(key).ok())
}

fn log_format_from_lookup<F>(lookup: F) -> Result<LogFormat, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("MARKETSYNC_LOG_FORMAT").filter(|value| !value.trim().is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|reason: String| ConfigError::invalid("MARKETSYNC_LOG_FORMAT", reason)),
        None => Ok(LogFormat::default()),
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid(key, "must be greater than zero")),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::invalid(key, e.to_string())),
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid(key, format!("expected a boolean, got {other:?}"))),
    }
}
