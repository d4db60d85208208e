//! Quantity descriptor → stock count mapping.
//!
//! The feed does not carry exact counts for every item. The mapping below is a
//! business approximation owned by the merchant and is applied verbatim:
//!
//! | descriptor | count |
//! |---|---|
//! | `">10"` | 100 |
//! | `"1"` | 0 |
//! | any other non-negative integer `n` | `n` |
//!
//! Note that `1` maps to 0 while `2` maps to 2. The two textual rules match
//! the descriptor exactly; surrounding whitespace is only tolerated by the
//! integer fallback, so `" 1 "` maps to 1.

use serde::{Deserialize, Serialize};

use marketsync_core::{DataFormatError, DataFormatResult};

/// Descriptor reported for "more than ten in stock".
pub const MORE_THAN_TEN: &str = ">10";

/// Count reported for [`MORE_THAN_TEN`].
pub const MORE_THAN_TEN_COUNT: u32 = 100;

/// Raw quantity column: either text (`">10"`, `"7"`) or a bare number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityDescriptor {
    Count(i64),
    Text(String),
}

impl QuantityDescriptor {
    /// Textual form the mapping rules are evaluated on.
    pub fn as_text(&self) -> String {
        match self {
            QuantityDescriptor::Count(n) => n.to_string(),
            QuantityDescriptor::Text(s) => s.clone(),
        }
    }

    /// Apply the fixed mapping. `code` is only used for error reporting.
    pub fn to_stock_count(&self, code: &str) -> DataFormatResult<u32> {
        let text = self.as_text();
        match text.as_str() {
            MORE_THAN_TEN => Ok(MORE_THAN_TEN_COUNT),
            "1" => Ok(0),
            other => other
                .trim()
                .parse::<u32>()
                .map_err(|_| DataFormatError::invalid_quantity(code, other)),
        }
    }
}

impl From<&str> for QuantityDescriptor {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QuantityDescriptor {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for QuantityDescriptor {
    fn from(value: i64) -> Self {
        Self::Count(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn count(descriptor: impl Into<QuantityDescriptor>) -> DataFormatResult<u32> {
        descriptor.into().to_stock_count("A1")
    }

    #[test]
    fn more_than_ten_maps_to_one_hundred() {
        assert_eq!(count(">10"), Ok(100));
    }

    #[test]
    fn padded_more_than_ten_is_not_the_textual_rule() {
        let err = count(" >10 ").unwrap_err();
        assert_eq!(err, DataFormatError::invalid_quantity("A1", " >10 "));
    }

    #[test]
    fn one_maps_to_zero() {
        assert_eq!(count("1"), Ok(0));
        assert_eq!(count(1i64), Ok(0));
    }

    #[test]
    fn padded_one_falls_through_to_integer_parse() {
        assert_eq!(count(" 1 "), Ok(1));
        assert_eq!(count("1\n"), Ok(1));
    }

    #[test]
    fn other_integers_are_taken_literally() {
        assert_eq!(count("7"), Ok(7));
        assert_eq!(count("0"), Ok(0));
        assert_eq!(count(10i64), Ok(10));
        assert_eq!(count(" 2 "), Ok(2));
    }

    #[test]
    fn unparsable_descriptor_is_a_data_format_error() {
        for raw in ["", "много", ">5", "3.5", "-2"] {
            let err = count(raw).unwrap_err();
            assert!(
                matches!(err, DataFormatError::InvalidQuantity { ref code, .. } if code == "A1"),
                "expected InvalidQuantity for {raw:?}, got {err:?}"
            );
        }
        assert!(count(-4i64).is_err());
    }

    #[test]
    fn descriptor_deserializes_from_text_or_number() {
        let text: QuantityDescriptor = serde_json::from_str("\">10\"").unwrap();
        assert_eq!(text, QuantityDescriptor::Text(">10".to_string()));

        let number: QuantityDescriptor = serde_json::from_str("4").unwrap();
        assert_eq!(number, QuantityDescriptor::Count(4));
    }

    proptest! {
        /// Property: every integer other than 1 maps to itself, whether given
        /// as text or as a number.
        #[test]
        fn integers_other_than_one_map_to_themselves(n in 0u32..1_000_000u32) {
            prop_assume!(n != 1);
            prop_assert_eq!(count(n.to_string()), Ok(n));
            prop_assert_eq!(count(i64::from(n)), Ok(n));
        }
    }
}
