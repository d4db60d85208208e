use marketsync_core::{CampaignId, OfferId, PriceUpdate, StockUpdate};

use crate::error::MarketResult;

/// One page of the offer-mapping listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OfferMappingPage {
    pub offer_ids: Vec<OfferId>,
    /// Cursor of the next page; `None` on the last page.
    pub next_page_token: Option<String>,
}

/// The three partner API endpoints a sync run needs.
///
/// Calls are blocking request/response; any non-2xx status is an error.
pub trait MarketApi {
    /// `GET campaigns/{id}/offer-mapping-entries`. The first page is requested
    /// with an empty token.
    fn offer_mapping_page(
        &self,
        campaign_id: &CampaignId,
        page_token: &str,
        limit: u32,
    ) -> MarketResult<OfferMappingPage>;

    /// `PUT campaigns/{id}/offers/stocks`.
    fn update_stocks(&self, campaign_id: &CampaignId, skus: &[StockUpdate]) -> MarketResult<()>;

    /// `POST campaigns/{id}/offer-prices/updates`.
    fn update_prices(&self, campaign_id: &CampaignId, offers: &[PriceUpdate]) -> MarketResult<()>;
}

impl<T: MarketApi + ?Sized> MarketApi for &T {
    fn offer_mapping_page(
        &self,
        campaign_id: &CampaignId,
        page_token: &str,
        limit: u32,
    ) -> MarketResult<OfferMappingPage> {
        (**self).offer_mapping_page(campaign_id, page_token, limit)
    }

    fn update_stocks(&self, campaign_id: &CampaignId, skus: &[StockUpdate]) -> MarketResult<()> {
        (**self).update_stocks(campaign_id, skus)
    }

    fn update_prices(&self, campaign_id: &CampaignId, offers: &[PriceUpdate]) -> MarketResult<()> {
        (**self).update_prices(campaign_id, offers)
    }
}
