//! Keyword-based record filtering.

use super::Filter;
use crate::record::NormalizedRecord;

/// Rejects records whose name matched no vocabulary phrase.
pub struct CategorizedFilter;

impl CategorizedFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CategorizedFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for CategorizedFilter {
    fn matches(&self, record: &NormalizedRecord) -> bool {
        record.keyword.is_categorized()
    }

    fn description(&self) -> String {
        "Exclude Uncategorized".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Keyword;
    use chrono::NaiveDate;

    fn make_record(keyword: Keyword) -> NormalizedRecord {
        NormalizedRecord {
            store: "Test".to_string(),
            keyword,
            product_name: "Test".to_string(),
            unit_size: "1kg".to_string(),
            price_text: "$1.00".to_string(),
            price: None,
            url: "https://shop.test/products/test".to_string(),
            scrape_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_categorized_passes() {
        let filter = CategorizedFilter::new();
        assert!(filter.matches(&make_record(Keyword::Category("Sugar".to_string()))));
    }

    #[test]
    fn test_uncategorized_rejected() {
        let filter = CategorizedFilter::default();
        assert!(!filter.matches(&make_record(Keyword::Uncategorized)));
    }

    #[test]
    fn test_description() {
        assert_eq!(CategorizedFilter::new().description(), "Exclude Uncategorized");
    }
}
