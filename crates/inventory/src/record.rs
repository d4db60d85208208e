use serde::{Deserialize, Deserializer, Serialize};

use marketsync_core::{DataFormatResult, OfferId};

use crate::price::convert_price;
use crate::quantity::QuantityDescriptor;

/// One row of the supplier's stock feed.
///
/// Column names are the feed's own spreadsheet headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "Код", deserialize_with = "code_from_string_or_int")]
    pub code: OfferId,
    #[serde(rename = "Количество")]
    pub quantity: QuantityDescriptor,
    #[serde(rename = "Цена")]
    pub price: String,
}

impl InventoryRecord {
    pub fn new(code: impl Into<String>, quantity: impl Into<QuantityDescriptor>, price: impl Into<String>) -> Self {
        Self {
            code: OfferId::new(code),
            quantity: quantity.into(),
            price: price.into(),
        }
    }

    /// Stock count to report for this record.
    pub fn stock_count(&self) -> DataFormatResult<u32> {
        self.quantity.to_stock_count(self.code.as_str())
    }

    /// Price in whole currency units.
    pub fn price_value(&self) -> DataFormatResult<u64> {
        convert_price(self.code.as_str(), &self.price)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Text(String),
    Number(u64),
}

fn code_from_string_or_int<'de, D>(deserializer: D) -> Result<OfferId, D::Error>
where
    D: Deserializer<'de>,
{
    let code = match RawCode::deserialize(deserializer)? {
        RawCode::Text(s) => s,
        RawCode::Number(n) => n.to_string(),
    };
    Ok(OfferId::new(code))
}
