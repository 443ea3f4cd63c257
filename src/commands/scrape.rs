//! Scrape command: walk the catalog, normalize, filter, persist.

use crate::catalog::{CatalogApi, CatalogWalker, ShopifyClient, StopReason};
use crate::config::Config;
use crate::filters::FilterChainBuilder;
use crate::format::Formatter;
use crate::record::{NormalizedRecord, RecordBuilder};
use crate::sink::{CsvSink, RecordSink, SinkReport, SqliteStore};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// At least one record was built and handed to the sinks.
    Completed,
    /// No record was built, so nothing was written.
    NothingCollected,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::NothingCollected => write!(f, "nothing collected"),
        }
    }
}

/// Report of one scrape run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub store: String,
    pub scrape_date: NaiveDate,
    pub status: RunStatus,
    pub pages_fetched: u32,
    pub products_seen: usize,
    pub duplicates_skipped: usize,
    /// Records before cleaning
    pub records_built: usize,
    /// Records after cleaning
    pub records_kept: usize,
    pub stop_reason: Option<StopReason>,
    pub sinks: Vec<SinkReport>,
    /// Sinks that could not be opened or written
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sink_errors: Vec<String>,
    pub records: Vec<NormalizedRecord>,
}

impl RunSummary {
    /// Returns true if the walk ended on a failed page.
    pub fn stopped_early(&self) -> bool {
        self.stop_reason.as_ref().is_some_and(StopReason::is_failure)
    }
}

/// Executes a full catalog scrape.
pub struct ScrapeCommand {
    config: Config,
    scrape_date: NaiveDate,
}

impl ScrapeCommand {
    /// Creates a scrape command; `scrape_date` is stamped on every record of the run.
    pub fn new(config: Config, scrape_date: NaiveDate) -> Self {
        Self { config, scrape_date }
    }

    /// Runs the scrape against the configured store and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client = ShopifyClient::new(&self.config).context("Failed to create HTTP client")?;
        let summary = self.execute_with_client(&client).await?;

        Ok(Formatter::new(self.config.format).format_summary(&summary))
    }

    /// Runs the scrape with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl CatalogApi) -> Result<RunSummary> {
        info!("Scraping {} from {}", self.config.store, client.base_url());

        let builder = RecordBuilder::new(
            &self.config.store,
            client.base_url(),
            self.scrape_date,
            self.config.classifier(),
        );

        let mut walker = CatalogWalker::new(client, self.config.page_size)
            .with_max_pages(self.config.max_pages);

        let mut records: Vec<NormalizedRecord> = Vec::new();
        while let Some(batch) = walker.next_page().await {
            records.extend(batch.iter().map(|raw| builder.build(raw)));
        }

        let stop_reason = walker.stop_reason().cloned();
        if let Some(reason) = &stop_reason {
            if reason.is_failure() {
                warn!("Pagination stopped early ({}); keeping {} records", reason, records.len());
            }
        }

        let mut summary = RunSummary {
            store: self.config.store.clone(),
            scrape_date: self.scrape_date,
            status: RunStatus::NothingCollected,
            pages_fetched: walker.pages_fetched(),
            products_seen: walker.products_seen(),
            duplicates_skipped: walker.duplicates_skipped(),
            records_built: records.len(),
            records_kept: 0,
            stop_reason,
            sinks: Vec::new(),
            sink_errors: Vec::new(),
            records: Vec::new(),
        };

        if records.is_empty() {
            warn!("No products were collected");
            return Ok(summary);
        }

        let filters = FilterChainBuilder::new()
            .require_unit_size(true)
            .drop_uncategorized(self.config.drop_uncategorized)
            .build();
        debug!("Active filters: {}", filters.descriptions().join(", "));

        let kept = filters.apply(records);
        info!("Records before cleaning: {}, after cleaning: {}", summary.records_built, kept.len());

        for mut sink in self.open_sinks(&mut summary.sink_errors) {
            match sink.write(&kept) {
                Ok(report) => summary.sinks.push(report),
                Err(e) => {
                    warn!("Failed to write {} output: {:#}", sink.name(), e);
                    summary.sink_errors.push(format!("{}: {:#}", sink.name(), e));
                }
            }
        }

        summary.status = RunStatus::Completed;
        summary.records_kept = kept.len();
        summary.records = kept;

        Ok(summary)
    }

    fn open_sinks(&self, errors: &mut Vec<String>) -> Vec<Box<dyn RecordSink>> {
        let mut sinks: Vec<Box<dyn RecordSink>> = Vec::new();

        if self.config.write_csv {
            sinks.push(Box::new(CsvSink::new(
                &self.config.output_dir,
                &self.config.csv_prefix,
                self.scrape_date,
            )));
        }

        if let Some(path) = &self.config.database {
            match SqliteStore::open(path, &self.config.table) {
                Ok(store) => sinks.push(Box::new(store)),
                Err(e) => {
                    warn!("Failed to open database: {:#}", e);
                    errors.push(format!("sqlite: {:#}", e));
                }
            }
        }

        sinks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ApiProduct, ApiVariant, PageError, ProductsPage};
    use crate::config::OutputFormat;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tempfile::TempDir;

    /// Mock catalog serving canned pages, empty past the end.
    struct MockCatalog {
        pages: Vec<ProductsPage>,
        fail_on: Option<u32>,
        calls: AtomicU32,
    }

    impl MockCatalog {
        fn new(pages: Vec<ProductsPage>) -> Self {
            Self { pages, fail_on: None, calls: AtomicU32::new(0) }
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogApi for MockCatalog {
        async fn fetch_page(&self, page: u32, _limit: u32) -> Result<ProductsPage, PageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(page) {
                return Err(PageError::Status(500));
            }
            Ok(self.pages.get((page - 1) as usize).cloned().unwrap_or_default())
        }

        fn base_url(&self) -> &str {
            "https://spicedivine.ca"
        }
    }

    fn product(handle: &str, title: &str, variants: &[(&str, &str)]) -> ApiProduct {
        ApiProduct {
            handle: handle.to_string(),
            title: title.to_string(),
            variants: variants
                .iter()
                .map(|(t, p)| ApiVariant {
                    title: t.to_string(),
                    price: Some(Value::String(p.to_string())),
                })
                .collect(),
        }
    }

    fn first_page() -> ProductsPage {
        ProductsPage {
            products: vec![
                product("turmeric-powder", "Turmeric Powder 500g", &[("Default Title", "8.99")]),
                product("chilli-whole", "Chilli Whole Kashmiri", &[("1kg", "15"), ("200g", "4")]),
                product("snack-mix", "Assorted Snack Mix", &[("Default Title", "3.5")]),
                product("lunch-box", "Steel Lunch Box 2pcs", &[("Default Title", "N/A")]),
            ],
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn make_test_config() -> Config {
        Config {
            delay_ms: 0,
            delay_jitter_ms: 0,
            write_csv: false,
            database: None,
            format: OutputFormat::Table,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_scrape_builds_and_filters() {
        let catalog = MockCatalog::new(vec![first_page()]);
        let cmd = ScrapeCommand::new(make_test_config(), date());

        let summary = cmd.execute_with_client(&catalog).await.unwrap();

        assert_eq!(catalog.call_count(), 2);
        assert_eq!(summary.status, RunStatus::Completed);
        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(summary.products_seen, 4);
        assert_eq!(summary.records_built, 5);
        assert_eq!(summary.stop_reason, Some(StopReason::Exhausted));

        // Snack mix has no unit, the lunch box matches no keyword
        let names: Vec<&str> = summary.records.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, vec!["Turmeric Powder", "Chilli Whole Kashmiri", "Chilli Whole Kashmiri"]);
        assert_eq!(summary.records_kept, 3);

        let turmeric = &summary.records[0];
        assert_eq!(turmeric.unit_size, "500g");
        assert_eq!(turmeric.price_text, "$8.99");
        assert_eq!(turmeric.url, "https://spicedivine.ca/products/turmeric-powder");
        assert_eq!(turmeric.scrape_date, date());

        assert_eq!(summary.records[1].unit_size, "1kg");
        assert_eq!(summary.records[2].unit_size, "200g");
        assert!(summary.sinks.is_empty());
    }

    #[tokio::test]
    async fn test_scrape_keeps_uncategorized_when_configured() {
        let catalog = MockCatalog::new(vec![first_page()]);
        let config = Config { drop_uncategorized: false, ..make_test_config() };
        let cmd = ScrapeCommand::new(config, date());

        let summary = cmd.execute_with_client(&catalog).await.unwrap();

        assert_eq!(summary.records_kept, 4);
        let lunch_box = summary.records.iter().find(|r| r.product_name == "Steel Lunch Box").unwrap();
        assert!(!lunch_box.keyword.is_categorized());
        assert_eq!(lunch_box.unit_size, "2pcs");
        assert_eq!(lunch_box.price_text, "N/A");
        assert!(lunch_box.price.is_none());
    }

    #[tokio::test]
    async fn test_scrape_nothing_collected() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            write_csv: true,
            output_dir: dir.path().to_path_buf(),
            database: Some(dir.path().join("catalog.sqlite")),
            ..make_test_config()
        };
        let catalog = MockCatalog::new(Vec::new());
        let cmd = ScrapeCommand::new(config, date());

        let summary = cmd.execute_with_client(&catalog).await.unwrap();

        assert_eq!(summary.status, RunStatus::NothingCollected);
        assert_eq!(catalog.call_count(), 1);
        assert!(summary.sinks.is_empty());
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_scrape_failure_keeps_collected_records() {
        let mut catalog = MockCatalog::new(vec![first_page(), first_page()]);
        catalog.fail_on = Some(2);
        let cmd = ScrapeCommand::new(make_test_config(), date());

        let summary = cmd.execute_with_client(&catalog).await.unwrap();

        assert!(summary.stopped_early());
        assert_eq!(summary.status, RunStatus::Completed);
        assert_eq!(summary.records_kept, 3);
        assert_eq!(catalog.call_count(), 2);
    }

    #[tokio::test]
    async fn test_scrape_repeated_products_across_pages() {
        let second = ProductsPage {
            products: vec![
                product("turmeric-powder", "Turmeric Powder 500g", &[("Default Title", "8.99")]),
                product("cumin-seeds", "Cumin Seeds 100g", &[("Default Title", "2.49")]),
            ],
        };
        let catalog = MockCatalog::new(vec![first_page(), second]);
        let cmd = ScrapeCommand::new(make_test_config(), date());

        let summary = cmd.execute_with_client(&catalog).await.unwrap();

        assert_eq!(summary.duplicates_skipped, 1);
        assert_eq!(summary.products_seen, 5);
        assert_eq!(summary.records_kept, 4);
        assert_eq!(catalog.call_count(), 3);
    }

    #[tokio::test]
    async fn test_scrape_page_limit() {
        let catalog = MockCatalog::new(vec![first_page(), first_page(), first_page()]);
        let config = Config { max_pages: Some(1), ..make_test_config() };
        let cmd = ScrapeCommand::new(config, date());

        let summary = cmd.execute_with_client(&catalog).await.unwrap();

        assert_eq!(catalog.call_count(), 1);
        assert_eq!(summary.stop_reason, Some(StopReason::PageLimit { pages: 1 }));
    }

    #[tokio::test]
    async fn test_scrape_writes_sinks() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("catalog.sqlite");
        let config = Config {
            write_csv: true,
            output_dir: dir.path().join("out"),
            csv_prefix: "shop".to_string(),
            database: Some(db_path.clone()),
            table: "shop_products".to_string(),
            ..make_test_config()
        };
        let cmd = ScrapeCommand::new(config, date());

        let catalog = MockCatalog::new(vec![first_page()]);
        let summary = cmd.execute_with_client(&catalog).await.unwrap();

        assert_eq!(summary.sinks.len(), 2);
        assert_eq!(summary.sinks[0].sink, "csv");
        assert_eq!(summary.sinks[0].written, 3);
        assert_eq!(summary.sinks[1].sink, "sqlite");
        assert_eq!(summary.sinks[1].written, 3);

        let csv = std::fs::read_to_string(dir.path().join("out").join("shop_2026-10-16.csv")).unwrap();
        assert_eq!(csv.lines().count(), 4);

        // Same day again: the store keeps one row per identity
        let catalog = MockCatalog::new(vec![first_page()]);
        let summary = cmd.execute_with_client(&catalog).await.unwrap();
        assert_eq!(summary.sinks[1].written, 0);
        assert_eq!(summary.sinks[1].skipped, 3);

        let store = SqliteStore::open(&db_path, "shop_products").unwrap();
        assert_eq!(store.count().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_scrape_bad_table_reported() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            database: Some(dir.path().join("catalog.sqlite")),
            table: "bad name".to_string(),
            ..make_test_config()
        };
        let cmd = ScrapeCommand::new(config, date());

        let catalog = MockCatalog::new(vec![first_page()]);
        let summary = cmd.execute_with_client(&catalog).await.unwrap();

        assert_eq!(summary.status, RunStatus::Completed);
        assert!(summary.sinks.is_empty());
        assert_eq!(summary.sink_errors.len(), 1);
        assert!(summary.sink_errors[0].contains("Invalid table name"));
    }

    #[tokio::test]
    async fn test_scrape_formatted_output() {
        let catalog = MockCatalog::new(vec![first_page()]);
        let config = Config { format: OutputFormat::Json, ..make_test_config() };
        let cmd = ScrapeCommand::new(config.clone(), date());

        let summary = cmd.execute_with_client(&catalog).await.unwrap();
        let output = Formatter::new(config.format).format_summary(&summary);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["records_built"], 5);
        assert_eq!(value["records_kept"], 3);
        assert!(value.get("sink_errors").is_none());
    }
}
