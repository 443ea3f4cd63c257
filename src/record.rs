//! Normalized product records and the builder that produces them.

use crate::catalog::models::{product_url, RawVariant};
use crate::classify::{Classifier, Keyword};
use crate::normalize::{self, units};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// Variant title the storefront uses for single-option products.
pub const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// Column names, in field order, shared by the CSV export and the database.
pub const RECORD_COLUMNS: [&str; 8] = [
    "store",
    "keyword",
    "product_name",
    "unit_size",
    "price_text",
    "price",
    "url",
    "scrape_date",
];

/// One normalized variant, as persisted.
///
/// Field order matches [`RECORD_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    /// Source merchant label
    pub store: String,
    /// Category from the vocabulary
    pub keyword: Keyword,
    /// Descriptive name without the unit token
    pub product_name: String,
    /// Package size such as `500g`; empty when none was found
    pub unit_size: String,
    /// Display price such as `$8.99`, or `N/A`
    pub price_text: String,
    /// Parsed price
    pub price: Option<Decimal>,
    /// Product page address
    pub url: String,
    /// Day of the run
    pub scrape_date: NaiveDate,
}

impl NormalizedRecord {
    /// Returns true if a package size was resolved.
    pub fn has_unit_size(&self) -> bool {
        !self.unit_size.trim().is_empty()
    }

    /// Returns the identity used for duplicate suppression in the store.
    pub fn identity(&self) -> (&str, &str, NaiveDate) {
        (&self.url, &self.unit_size, self.scrape_date)
    }
}

/// Turns raw API variants into [`NormalizedRecord`]s for one run.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    store: String,
    base_url: String,
    scrape_date: NaiveDate,
    classifier: Classifier,
}

impl RecordBuilder {
    /// Creates a builder for a run of `store` on `scrape_date`.
    pub fn new(
        store: impl Into<String>,
        base_url: impl Into<String>,
        scrape_date: NaiveDate,
        classifier: Classifier,
    ) -> Self {
        Self { store: store.into(), base_url: base_url.into(), scrape_date, classifier }
    }

    /// Builds a record from one variant. Never fails: unparseable fields fall
    /// back to the empty unit, `Uncategorized` and `N/A` sentinels.
    pub fn build(&self, raw: &RawVariant) -> NormalizedRecord {
        let variant = raw.variant_title.trim();

        // A real variant title is the package size; the title only supplies the name.
        let (name, unit_size) = if is_real_variant(variant) {
            let full_name = format!("{} - {}", raw.product_title, variant);
            (units::extract(&full_name).name, units::tidy_unit(variant))
        } else {
            let extracted = units::extract(&raw.product_title);
            (extracted.name, units::tidy_unit(&extracted.unit))
        };

        let product_name = trim_separators(&name);
        let keyword = self.classifier.classify(&product_name);
        let price = normalize::parse_price(&raw.price_raw);

        let record = NormalizedRecord {
            store: self.store.clone(),
            keyword,
            product_name,
            unit_size,
            price_text: normalize::price_text(price),
            price,
            url: product_url(&self.base_url, &raw.product_handle),
            scrape_date: self.scrape_date,
        };

        debug!(
            "{} | {} | {} | {}",
            record.product_name, record.keyword, record.unit_size, record.price_text
        );

        record
    }
}

fn is_real_variant(variant_title: &str) -> bool {
    !variant_title.is_empty() && !variant_title.eq_ignore_ascii_case(DEFAULT_VARIANT_TITLE)
}

/// Trims whitespace and dangling separators left behind by unit removal.
fn trim_separators(name: &str) -> String {
    name.trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ',' | '|' | '/'))
        .to_string()
}
