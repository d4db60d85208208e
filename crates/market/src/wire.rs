//! Request/response bodies of the partner API.

use serde::{Deserialize, Serialize};

use marketsync_core::{OfferId, PriceUpdate, StockUpdate};

use crate::api::OfferMappingPage;
use crate::error::{MarketError, MarketResult};

#[derive(Debug, Serialize)]
pub struct StocksBody<'a> {
    pub skus: &'a [StockUpdate],
}

#[derive(Debug, Serialize)]
pub struct PricesBody<'a> {
    pub offers: &'a [PriceUpdate],
}

#[derive(Debug, Deserialize)]
struct ListingEnvelope {
    result: Option<ListingResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingResult {
    offer_mapping_entries: Option<Vec<OfferMappingEntry>>,
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct OfferMappingEntry {
    offer: Option<Offer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Offer {
    shop_sku: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paging {
    next_page_token: Option<String>,
}

/// Decode an offer-mapping listing body.
///
/// `result`, `result.paging`, `result.offerMappingEntries` and every entry's
/// `offer.shopSku` are required. An empty `nextPageToken` means "last page".
pub fn parse_listing(body: &str) -> MarketResult<OfferMappingPage> {
    let envelope: ListingEnvelope =
        serde_json::from_str(body).map_err(|e| MarketError::malformed(format!("listing body: {e}")))?;

    let result = envelope
        .result
        .ok_or_else(|| MarketError::malformed("listing response has no `result`"))?;
    let paging = result
        .paging
        .ok_or_else(|| MarketError::malformed("listing response has no `result.paging`"))?;
    let entries = result
        .offer_mapping_entries
        .ok_or_else(|| MarketError::malformed("listing response has no `result.offerMappingEntries`"))?;

    let offer_ids = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .offer
                .and_then(|offer| offer.shop_sku)
                .map(OfferId::new)
                .ok_or_else(|| MarketError::malformed(format!("offer mapping entry {index} has no `offer.shopSku`")))
        })
        .collect::<MarketResult<Vec<_>>>()?;

    let next_page_token = paging.next_page_token.filter(|token| !token.is_empty());

    Ok(OfferMappingPage {
        offer_ids,
        next_page_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use marketsync_core::WarehouseId;

    #[test]
    fn parses_entries_and_cursor() {
        let body = json!({
            "status": "OK",
            "result": {
                "paging": { "nextPageToken": "eyJvcCI6Ij4iLCJrZXkiOiIxMjMifQ" },
                "offerMappingEntries": [
                    { "offer": { "shopSku": "A1", "name": "Часы" }, "mapping": { "marketSku": 1 } },
                    { "offer": { "shopSku": "B2" } }
                ]
            }
        })
        .to_string();

        let page = parse_listing(&body).unwrap();

        assert_eq!(page.offer_ids, vec![OfferId::new("A1"), OfferId::new("B2")]);
        assert_eq!(page.next_page_token.as_deref(), Some("eyJvcCI6Ij4iLCJrZXkiOiIxMjMifQ"));
    }

    #[test]
    fn missing_or_empty_cursor_marks_last_page() {
        let without = json!({ "result": { "paging": {}, "offerMappingEntries": [] } }).to_string();
        assert_eq!(parse_listing(&without).unwrap().next_page_token, None);

        let empty = json!({ "result": { "paging": { "nextPageToken": "" }, "offerMappingEntries": [] } })
            .to_string();
        assert_eq!(parse_listing(&empty).unwrap().next_page_token, None);
    }

    #[test]
    fn missing_required_fields_are_malformed() {
        let cases = [
            json!({ "status": "OK" }),
            json!({ "result": { "offerMappingEntries": [] } }),
            json!({ "result": { "paging": {} } }),
            json!({ "result": { "paging": {}, "offerMappingEntries": [{ "offer": {} }] } }),
            json!({ "result": { "paging": {}, "offerMappingEntries": [{ "mapping": {} }] } }),
        ];

        for body in cases {
            let err = parse_listing(&body.to_string()).unwrap_err();
            assert!(matches!(err, MarketError::MalformedResponse(_)), "{body}: {err:?}");
        }

        assert!(matches!(
            parse_listing("<html>").unwrap_err(),
            MarketError::MalformedResponse(_)
        ));
    }

    #[test]
    fn submission_bodies_wrap_updates() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let stocks = [StockUpdate::fit(OfferId::new("A1"), WarehouseId::new("7"), 2, at)];
        let prices = [PriceUpdate::rur(OfferId::new("A1"), 990)];

        let stocks_json = serde_json::to_value(StocksBody { skus: &stocks }).unwrap();
        let prices_json = serde_json::to_value(PricesBody { offers: &prices }).unwrap();

        assert_eq!(stocks_json["skus"][0]["items"][0]["updatedAt"], "2024-01-02T03:04:05Z");
        assert_eq!(stocks_json["skus"][0]["warehouseId"], "7");
        assert_eq!(prices_json["offers"][0]["price"]["value"], 990);
    }
}
