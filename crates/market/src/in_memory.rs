//! In-memory marketplace for tests/dev.

use std::cell::RefCell;
use std::collections::HashMap;

use marketsync_core::{CampaignId, OfferId, PriceUpdate, StockUpdate};

use crate::api::{MarketApi, OfferMappingPage};
use crate::error::{MarketError, MarketResult};
use crate::pagination::PAGE_SIZE;

/// Endpoint selector for failure injection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Listing,
    Stocks,
    Prices,
}

/// In-memory [`MarketApi`].
///
/// - Catalogs are fixed per campaign; unknown campaigns answer 404
/// - Cursors are `offset:<n>` tokens
/// - Accepted submissions are recorded for inspection
/// - Single-threaded (interior mutability via `RefCell`)
#[derive(Debug)]
pub struct InMemoryMarket {
    catalogs: HashMap<CampaignId, Vec<OfferId>>,
    page_size: usize,
    endless_paging: bool,
    failures: HashMap<(CampaignId, Endpoint), MarketError>,
    listing_calls: RefCell<Vec<(CampaignId, String)>>,
    stock_batches: RefCell<Vec<(CampaignId, Vec<StockUpdate>)>>,
    price_batches: RefCell<Vec<(CampaignId, Vec<PriceUpdate>)>>,
}

impl Default for InMemoryMarket {
    fn default() -> Self {
        Self {
            catalogs: HashMap::new(),
            page_size: PAGE_SIZE as usize,
            endless_paging: false,
            failures: HashMap::new(),
            listing_calls: RefCell::new(Vec::new()),
            stock_batches: RefCell::new(Vec::new()),
            price_batches: RefCell::new(Vec::new()),
        }
    }
}

impl InMemoryMarket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, campaign_id: CampaignId, offer_ids: Vec<OfferId>) -> Self {
        self.catalogs.insert(campaign_id, offer_ids);
        self
    }

    /// Upper bound on entries per page, below the requested limit.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Always hand out a next-page token, like a misbehaving server.
    pub fn with_endless_paging(mut self) -> Self {
        self.endless_paging = true;
        self
    }

    /// Answer every call to `endpoint` of `campaign_id` with `error`.
    pub fn failing(mut self, campaign_id: CampaignId, endpoint: Endpoint, error: MarketError) -> Self {
        self.failures.insert((campaign_id, endpoint), error);
        self
    }

    /// Page tokens requested for a campaign, in call order.
    pub fn listing_tokens(&self, campaign_id: &CampaignId) -> Vec<String> {
        self.listing_calls
            .borrow()
            .iter()
            .filter(|(id, _)| id == campaign_id)
            .map(|(_, token)| token.clone())
            .collect()
    }

    /// Accepted stock batches for a campaign.
    pub fn stock_batches(&self, campaign_id: &CampaignId) -> Vec<Vec<StockUpdate>> {
        self.stock_batches
            .borrow()
            .iter()
            .filter(|(id, _)| id == campaign_id)
            .map(|(_, batch)| batch.clone())
            .collect()
    }

    /// Accepted price batches for a campaign.
    pub fn price_batches(&self, campaign_id: &CampaignId) -> Vec<Vec<PriceUpdate>> {
        self.price_batches
            .borrow()
            .iter()
            .filter(|(id, _)| id == campaign_id)
            .map(|(_, batch)| batch.clone())
            .collect()
    }

    fn check(&self, campaign_id: &CampaignId, endpoint: Endpoint, method: &'static str) -> MarketResult<&[OfferId]> {
        if let Some(err) = self.failures.get(&(campaign_id.clone(), endpoint)) {
            return Err(err.clone());
        }

        self.catalogs
            .get(campaign_id)
            .map(Vec::as_slice)
            .ok_or_else(|| MarketError::Transport {
                method,
                url: format!("campaigns/{campaign_id}"),
                status: 404,
                body: "campaign not found".to_string(),
            })
    }
}

impl MarketApi for InMemoryMarket {
    fn offer_mapping_page(
        &self,
        campaign_id: &CampaignId,
        page_token: &str,
        limit: u32,
    ) -> MarketResult<OfferMappingPage> {
        self.listing_calls
            .borrow_mut()
            .push((campaign_id.clone(), page_token.to_string()));

        let catalog = self.check(campaign_id, Endpoint::Listing, "GET")?;

        let start = if page_token.is_empty() {
            0
        } else {
            page_token
                .strip_prefix("offset:")
                .and_then(|offset| offset.parse::<usize>().ok())
                .ok_or_else(|| MarketError::Transport {
                    method: "GET",
                    url: format!("campaigns/{campaign_id}/offer-mapping-entries"),
                    status: 400,
                    body: format!("invalid page_token {page_token:?}"),
                })?
        };

        let start = start.min(catalog.len());
        let end = (start + self.page_size.min(limit as usize)).min(catalog.len());

        let next_page_token = (end < catalog.len() || self.endless_paging).then(|| format!("offset:{end}"));

        Ok(OfferMappingPage {
            offer_ids: catalog[start..end].to_vec(),
            next_page_token,
        })
    }

    fn update_stocks(&self, campaign_id: &CampaignId, skus: &[StockUpdate]) -> MarketResult<()> {
        self.check(campaign_id, Endpoint::Stocks, "PUT")?;
        self.stock_batches
            .borrow_mut()
            .push((campaign_id.clone(), skus.to_vec()));
        Ok(())
    }

    fn update_prices(&self, campaign_id: &CampaignId, offers: &[PriceUpdate]) -> MarketResult<()> {
        self.check(campaign_id, Endpoint::Prices, "POST")?;
        self.price_batches
            .borrow_mut()
            .push((campaign_id.clone(), offers.to_vec()));
        Ok(())
    }
}
