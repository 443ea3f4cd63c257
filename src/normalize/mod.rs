//! Text normalization for merchant-supplied product fields.

pub mod price;
pub mod units;

pub use price::{parse_price, price_text, PRICE_NOT_AVAILABLE};
pub use units::{extract, tidy_unit, UnitExtraction};
