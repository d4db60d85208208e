//! Blocking HTTP client for the marketplace partner API.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use marketsync_core::{CampaignId, PriceUpdate, StockUpdate};

use crate::api::{MarketApi, OfferMappingPage};
use crate::error::{MarketError, MarketResult};
use crate::wire::{PricesBody, StocksBody, parse_listing};

/// Production endpoint of the partner API.
pub const DEFAULT_BASE_URL: &str = "https://api.partner.market.yandex.ru/";

/// Longest response body kept in a [`MarketError::Transport`].
const MAX_ERROR_BODY: usize = 1024;

#[derive(Debug, Clone)]
pub struct MarketClientConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
    /// Honour `HTTP(S)_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl MarketClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            timeout: Duration::from_secs(30),
            use_system_proxy: true,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn without_system_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }
}

/// [`MarketApi`] over HTTPS.
///
/// The bearer token and JSON headers are installed once as default headers.
#[derive(Debug, Clone)]
pub struct HttpMarketClient {
    http: Client,
    base_url: String,
}

impl HttpMarketClient {
    pub fn new(config: MarketClientConfig) -> MarketResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| MarketError::Request("token contains characters not allowed in a header".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, campaign_id: &CampaignId, path: &str) -> String {
        format!("{}/campaigns/{}/{}", self.base_url, campaign_id, path)
    }

    /// Send a request and return the body of a 2xx response.
    fn send(&self, method: &'static str, url: &str, request: RequestBuilder) -> MarketResult<String> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        tracing::debug!(method, url, status = status.as_u16(), "market api response");

        if !status.is_success() {
            return Err(MarketError::Transport {
                method,
                url: url.to_string(),
                status: status.as_u16(),
                body: truncate(body, MAX_ERROR_BODY),
            });
        }

        Ok(body)
    }
}

impl MarketApi for HttpMarketClient {
    fn offer_mapping_page(
        &self,
        campaign_id: &CampaignId,
        page_token: &str,
        limit: u32,
    ) -> MarketResult<OfferMappingPage> {
        let url = self.url(campaign_id, "offer-mapping-entries");
        let limit = limit.to_string();
        let request = self
            .http
            .get(&url)
            .query(&[("page_token", page_token), ("limit", limit.as_str())]);

        let body = self.send("GET", &url, request)?;
        parse_listing(&body)
    }

    fn update_stocks(&self, campaign_id: &CampaignId, skus: &[StockUpdate]) -> MarketResult<()> {
        let url = self.url(campaign_id, "offers/stocks");
        let request = self.http.put(&url).json(&StocksBody { skus });

        self.send("PUT", &url, request)?;
        Ok(())
    }

    fn update_prices(&self, campaign_id: &CampaignId, offers: &[PriceUpdate]) -> MarketResult<()> {
        let url = self.url(campaign_id, "offer-prices/updates");
        let request = self.http.post(&url).json(&PricesBody { offers });

        self.send("POST", &url, request)?;
        Ok(())
    }
}

fn truncate(mut body: String, max: usize) -> String {
    if body.len() > max {
        let mut cut = max;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }
    body
}
