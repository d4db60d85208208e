//! Update payloads pushed to the marketplace.
//!
//! Field names follow the partner API wire format (camelCase).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::id::{OfferId, WarehouseId};

/// Stock item type accepted by the stocks endpoint ("available for sale").
pub const STOCK_TYPE_FIT: &str = "FIT";

/// Currency tag used for every price update.
pub const CURRENCY_RUR: &str = "RUR";

/// Stock level of one offer in one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdate {
    pub sku: OfferId,
    pub warehouse_id: WarehouseId,
    pub items: Vec<StockItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub count: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(serialize_with = "serialize_utc_seconds", deserialize_with = "deserialize_utc")]
    pub updated_at: DateTime<Utc>,
}

impl StockUpdate {
    /// Single-item `FIT` stock update.
    pub fn fit(sku: OfferId, warehouse_id: WarehouseId, count: u32, updated_at: DateTime<Utc>) -> Self {
        Self {
            sku,
            warehouse_id,
            items: vec![StockItem {
                count,
                kind: STOCK_TYPE_FIT.to_string(),
                updated_at,
            }],
        }
    }

    /// Count of the first item, `None` for an update without items.
    pub fn count(&self) -> Option<u32> {
        self.items.first().map(|item| item.count)
    }

    /// Whether the first item reports a non-zero count.
    pub fn is_non_empty(&self) -> bool {
        self.count().is_some_and(|count| count != 0)
    }
}

/// New price of one offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdate {
    pub id: OfferId,
    pub price: PriceValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceValue {
    pub value: u64,
    pub currency_id: String,
}

impl PriceUpdate {
    pub fn rur(id: OfferId, value: u64) -> Self {
        Self {
            id,
            price: PriceValue {
                value,
                currency_id: CURRENCY_RUR.to_string(),
            },
        }
    }
}

fn serialize_utc_seconds<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn deserialize_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
