//! Price parsing and display text.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Display text for a price that could not be parsed.
pub const PRICE_NOT_AVAILABLE: &str = "N/A";

/// Currency prefix used when rendering prices.
pub const CURRENCY_SYMBOL: &str = "$";

/// Parses a merchant price string such as `"1,299.00"` or `" 8.99 "`.
///
/// Thousands separators are ignored. Returns `None` for anything that is not a
/// plain decimal number.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}

/// Renders a parsed price as display text, e.g. `$8.99`. Half cents round away from zero.
pub fn price_text(price: Option<Decimal>) -> String {
    match price {
        Some(value) => {
            let cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{}{:.2}", CURRENCY_SYMBOL, cents)
        }
        None => PRICE_NOT_AVAILABLE.to_string(),
    }
}
