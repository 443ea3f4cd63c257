//! Offline normalization of a single title, for vocabulary tuning.

use crate::catalog::RawVariant;
use crate::config::Config;
use crate::format::Formatter;
use crate::record::{NormalizedRecord, RecordBuilder, DEFAULT_VARIANT_TITLE};
use chrono::NaiveDate;
use tracing::info;

/// Runs the record builder over command-line input without touching the network.
pub struct ExtractCommand {
    config: Config,
    builder: RecordBuilder,
}

impl ExtractCommand {
    /// Creates an extract command using the configured store, vocabulary and policy.
    pub fn new(config: Config, scrape_date: NaiveDate) -> Self {
        let builder = RecordBuilder::new(
            &config.store,
            &config.base_url,
            scrape_date,
            config.classifier(),
        );
        Self { config, builder }
    }

    /// Builds the record a catalog variant with these fields would produce.
    pub fn build(
        &self,
        title: &str,
        variant: Option<&str>,
        price: Option<&str>,
        handle: Option<&str>,
    ) -> NormalizedRecord {
        let handle = handle.map(str::to_string).unwrap_or_else(|| slugify(title));
        let raw = RawVariant::new(
            title,
            variant.unwrap_or(DEFAULT_VARIANT_TITLE),
            price.unwrap_or_default(),
            handle,
        );

        info!("Normalizing: {}", title);
        self.builder.build(&raw)
    }

    /// Builds the record and returns formatted output.
    pub fn execute(
        &self,
        title: &str,
        variant: Option<&str>,
        price: Option<&str>,
        handle: Option<&str>,
    ) -> String {
        let record = self.build(title, variant, price, handle);
        Formatter::new(self.config.format).format_record(&record)
    }
}

/// Lowercase, hyphen-separated handle derived from a title.
fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::MatchPolicy;
    use crate::config::OutputFormat;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn make_command(format: OutputFormat) -> ExtractCommand {
        ExtractCommand::new(Config { format, ..Config::default() }, date())
    }

    #[test]
    fn test_extract_default_variant() {
        let cmd = make_command(OutputFormat::Table);
        let record = cmd.build("Turmeric Powder 500g", None, Some("8.99"), None);

        assert_eq!(record.product_name, "Turmeric Powder");
        assert_eq!(record.unit_size, "500g");
        assert_eq!(record.keyword.as_str(), "Turmeric Powder");
        assert_eq!(record.price, Some(dec!(8.99)));
        assert_eq!(record.price_text, "$8.99");
        assert_eq!(record.url, "https://spicedivine.ca/products/turmeric-powder-500g");
        assert_eq!(record.scrape_date, date());
    }

    #[test]
    fn test_extract_with_variant_and_handle() {
        let cmd = make_command(OutputFormat::Table);
        let record =
            cmd.build("Chilli Whole Kashmiri", Some("1kg"), Some("15"), Some("chilli-kashmiri"));

        assert_eq!(record.product_name, "Chilli Whole Kashmiri");
        assert_eq!(record.unit_size, "1kg");
        assert_eq!(record.price_text, "$15.00");
        assert_eq!(record.url, "https://spicedivine.ca/products/chilli-kashmiri");
    }

    #[test]
    fn test_extract_without_price() {
        let cmd = make_command(OutputFormat::Table);
        let record = cmd.build("Assorted Snack Mix", None, None, None);

        assert_eq!(record.unit_size, "");
        assert!(record.price.is_none());
        assert_eq!(record.price_text, "N/A");
    }

    #[test]
    fn test_extract_uses_configured_policy() {
        let config = Config {
            keywords: vec!["Kashmiri Chilli".to_string()],
            match_policy: MatchPolicy::AllWords,
            ..Config::default()
        };
        let cmd = ExtractCommand::new(config, date());

        let record = cmd.build("Chilli Whole Kashmiri 200g", None, None, None);
        assert_eq!(record.keyword.as_str(), "Kashmiri Chilli");
    }

    #[test]
    fn test_execute_formats_output() {
        let output = make_command(OutputFormat::Table).execute(
            "Turmeric Powder 500g",
            None,
            Some("8.99"),
            None,
        );
        assert!(output.contains("Unit:    500g"));
        assert!(output.contains("Price:   $8.99"));

        let output = make_command(OutputFormat::Json).execute(
            "Turmeric Powder 500g",
            None,
            Some("8.99"),
            None,
        );
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["unit_size"], "500g");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Turmeric Powder 500g"), "turmeric-powder-500g");
        assert_eq!(slugify("  Garam Masala (Premium) - 1kg "), "garam-masala-premium-1kg");
        assert_eq!(slugify(""), "");
    }
}
