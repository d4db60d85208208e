//! Locale-formatted price → integer conversion.

use marketsync_core::{DataFormatError, DataFormatResult};

/// Convert a feed price such as `"5'990.00 руб."` to whole units (`5990`).
///
/// Everything from the first `.` onward is discarded, then every non-digit
/// character (grouping spaces, apostrophes, currency suffix) is dropped.
pub fn convert_price(code: &str, raw: &str) -> DataFormatResult<u64> {
    let whole = raw.split('.').next().unwrap_or_default();
    let digits: String = whole.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return Err(DataFormatError::invalid_price(code, raw));
    }

    digits
        .parse::<u64>()
        .map_err(|_| DataFormatError::invalid_price(code, raw))
}
