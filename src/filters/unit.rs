//! Package-size presence filter.

use super::Filter;
use crate::record::NormalizedRecord;

/// Rejects records with an empty unit size.
pub struct UnitSizeFilter;

impl UnitSizeFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnitSizeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for UnitSizeFilter {
    fn matches(&self, record: &NormalizedRecord) -> bool {
        record.has_unit_size()
    }

    fn description(&self) -> String {
        "Require unit size".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Keyword;
    use chrono::NaiveDate;

    fn make_record(unit_size: &str) -> NormalizedRecord {
        NormalizedRecord {
            store: "Test".to_string(),
            keyword: Keyword::Uncategorized,
            product_name: "Test".to_string(),
            unit_size: unit_size.to_string(),
            price_text: "N/A".to_string(),
            price: None,
            url: "https://shop.test/products/test".to_string(),
            scrape_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_unit_size_filter() {
        let filter = UnitSizeFilter::new();
        assert!(filter.matches(&make_record("500g")));
        assert!(!filter.matches(&make_record("")));
        assert!(!filter.matches(&make_record("   ")));
    }

    #[test]
    fn test_description() {
        assert_eq!(UnitSizeFilter::default().description(), "Require unit size");
    }
}
