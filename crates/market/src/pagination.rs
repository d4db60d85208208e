//! Cursor-paginated offer listing.

use marketsync_core::{CampaignId, OfferId};

use crate::api::MarketApi;
use crate::error::{MarketError, MarketResult};

/// Entries requested per listing page.
pub const PAGE_SIZE: u32 = 200;

/// Default cap on listing pages per walk (200 000 offers at [`PAGE_SIZE`]).
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Iterator over the listing pages of one campaign.
///
/// Starts from an empty cursor and follows `nextPageToken` until the server
/// omits it. Yields the offer ids of each page in API order. After an error,
/// or once the page cap is hit, it yields that error once and then ends. A
/// fresh walk is just a new `OfferIdPages`.
#[derive(Debug)]
pub struct OfferIdPages<'a, A: ?Sized> {
    api: &'a A,
    campaign_id: &'a CampaignId,
    cursor: String,
    pages_fetched: usize,
    max_pages: usize,
    done: bool,
}

impl<'a, A: MarketApi + ?Sized> OfferIdPages<'a, A> {
    pub fn new(api: &'a A, campaign_id: &'a CampaignId, max_pages: usize) -> Self {
        Self {
            api,
            campaign_id,
            cursor: String::new(),
            pages_fetched: 0,
            max_pages,
            done: false,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

impl<A: MarketApi + ?Sized> Iterator for OfferIdPages<'_, A> {
    type Item = MarketResult<Vec<OfferId>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.pages_fetched >= self.max_pages {
            self.done = true;
            return Some(Err(MarketError::PageLimitExceeded {
                pages: self.max_pages,
            }));
        }

        match self
            .api
            .offer_mapping_page(self.campaign_id, &self.cursor, PAGE_SIZE)
        {
            Ok(page) => {
                self.pages_fetched += 1;
                match page.next_page_token {
                    Some(token) if !token.is_empty() => self.cursor = token,
                    _ => self.done = true,
                }
                tracing::debug!(
                    campaign_id = %self.campaign_id,
                    page = self.pages_fetched,
                    entries = page.offer_ids.len(),
                    "fetched offer listing page"
                );
                Some(Ok(page.offer_ids))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<A: MarketApi + ?Sized> std::iter::FusedIterator for OfferIdPages<'_, A> {}

/// Every offer id registered for `campaign_id`, in listing order.
///
/// Duplicates returned by the API are kept. Any failed page fails the whole
/// walk; no partial list is returned.
pub fn fetch_offer_ids<A: MarketApi + ?Sized>(
    api: &A,
    campaign_id: &CampaignId,
    max_pages: usize,
) -> MarketResult<Vec<OfferId>> {
    let mut offer_ids = Vec::new();
    for page in OfferIdPages::new(api, campaign_id, max_pages) {
        offer_ids.extend(page?);
    }

    tracing::info!(campaign_id = %campaign_id, offers = offer_ids.len(), "fetched remote offer ids");
    Ok(offer_ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::in_memory::{Endpoint, InMemoryMarket};

    fn campaign() -> CampaignId {
        CampaignId::new("fbs")
    }

    fn catalog(n: usize) -> Vec<OfferId> {
        (0..n).map(|i| OfferId::new(format!("SKU-{i}"))).collect()
    }

    #[test]
    fn walks_every_page_in_order() {
        let market = InMemoryMarket::new()
            .with_page_size(3)
            .with_catalog(campaign(), catalog(8));

        let ids = fetch_offer_ids(&market, &campaign(), DEFAULT_MAX_PAGES).unwrap();

        assert_eq!(ids, catalog(8));
        let tokens = market.listing_tokens(&campaign());
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], "");
        assert!(tokens[1..].iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn empty_catalog_is_one_empty_page() {
        let campaign = campaign();
        let market = InMemoryMarket::new().with_catalog(campaign.clone(), Vec::new());

        let mut pages = OfferIdPages::new(&market, &campaign, DEFAULT_MAX_PAGES);

        assert_eq!(pages.next(), Some(Ok(Vec::new())));
        assert_eq!(pages.next(), None);
        assert_eq!(pages.pages_fetched(), 1);
    }

    #[test]
    fn duplicates_from_the_api_are_kept() {
        let ids = vec![OfferId::new("A"), OfferId::new("A")];
        let market = InMemoryMarket::new()
            .with_page_size(1)
            .with_catalog(campaign(), ids.clone());

        assert_eq!(fetch_offer_ids(&market, &campaign(), DEFAULT_MAX_PAGES).unwrap(), ids);
    }

    #[test]
    fn failed_page_fails_the_walk() {
        let market = InMemoryMarket::new()
            .with_catalog(campaign(), catalog(5))
            .failing(campaign(), Endpoint::Listing, MarketError::Timeout("read".into()));

        let err = fetch_offer_ids(&market, &campaign(), DEFAULT_MAX_PAGES).unwrap_err();

        assert_eq!(err, MarketError::Timeout("read".into()));
    }

    #[test]
    fn unknown_campaign_is_a_transport_error() {
        let market = InMemoryMarket::new();

        let err = fetch_offer_ids(&market, &campaign(), DEFAULT_MAX_PAGES).unwrap_err();

        assert!(matches!(err, MarketError::Transport { status: 404, .. }));
    }

    #[test]
    fn endless_cursor_hits_the_page_cap() {
        let campaign = campaign();
        let market = InMemoryMarket::new()
            .with_catalog(campaign.clone(), catalog(1))
            .with_endless_paging();

        let mut pages = OfferIdPages::new(&market, &campaign, 4);
        let results: Vec<_> = pages.by_ref().collect();

        assert_eq!(results.len(), 5);
        assert!(results[..4].iter().all(Result::is_ok));
        assert_eq!(results[4], Err(MarketError::PageLimitExceeded { pages: 4 }));
        assert_eq!(pages.next(), None);
        assert_eq!(market.listing_tokens(&campaign).len(), 4);
    }

    #[test]
    fn restarting_walks_from_the_first_page_again() {
        let market = InMemoryMarket::new()
            .with_page_size(2)
            .with_catalog(campaign(), catalog(3));

        let first = fetch_offer_ids(&market, &campaign(), DEFAULT_MAX_PAGES).unwrap();
        let second = fetch_offer_ids(&market, &campaign(), DEFAULT_MAX_PAGES).unwrap();

        assert_eq!(first, second);
        let tokens = market.listing_tokens(&campaign());
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[2], "");
    }
}
