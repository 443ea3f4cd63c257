//! Per-run CSV snapshot.

use super::{RecordSink, SinkReport};
use crate::record::{NormalizedRecord, RECORD_COLUMNS};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes one CSV file per run, named after the scrape date.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Creates a sink writing `{prefix}_{YYYY-MM-DD}.csv` inside `dir`.
    pub fn new(dir: impl AsRef<Path>, prefix: &str, scrape_date: NaiveDate) -> Self {
        let path = dir.as_ref().join(Self::file_name(prefix, scrape_date));
        Self { path }
    }

    /// File name for a run.
    pub fn file_name(prefix: &str, scrape_date: NaiveDate) -> String {
        format!("{}_{}.csv", prefix, scrape_date.format("%Y-%m-%d"))
    }

    /// Returns the output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvSink {
    fn write(&mut self, records: &[NormalizedRecord]) -> Result<SinkReport> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let mut writer = ::csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create CSV file: {}", self.path.display()))?;

        // serialize() only emits the header alongside the first row
        if records.is_empty() {
            writer.write_record(RECORD_COLUMNS)?;
        }

        for record in records {
            writer.serialize(record).context("Failed to write CSV row")?;
        }
        writer.flush().context("Failed to flush CSV file")?;

        info!("CSV saved: {} ({} rows)", self.path.display(), records.len());

        Ok(SinkReport {
            sink: self.name().to_string(),
            location: self.path.display().to_string(),
            written: records.len(),
            skipped: 0,
        })
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Keyword;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn make_record(name: &str, unit: &str) -> NormalizedRecord {
        NormalizedRecord {
            store: "Spice Divine".to_string(),
            keyword: Keyword::Category("Turmeric Powder".to_string()),
            product_name: name.to_string(),
            unit_size: unit.to_string(),
            price_text: "$8.99".to_string(),
            price: Some(dec!(8.99)),
            url: "https://spicedivine.ca/products/turmeric".to_string(),
            scrape_date: date(),
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(CsvSink::file_name("spicedivine_products", date()), "spicedivine_products_2026-10-16.csv");
    }

    #[test]
    fn test_write_records() {
        let dir = TempDir::new().unwrap();
        let mut sink = CsvSink::new(dir.path(), "shop", date());

        let records = vec![make_record("Turmeric Powder", "500g"), make_record("Turmeric, Ground", "1kg")];
        let report = sink.write(&records).unwrap();
        assert_eq!(report.written, 2);
        assert_eq!(report.sink, "csv");

        let content = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "store,keyword,product_name,unit_size,price_text,price,url,scrape_date");
        assert_eq!(
            lines[1],
            "Spice Divine,Turmeric Powder,Turmeric Powder,500g,$8.99,8.99,https://spicedivine.ca/products/turmeric,2026-10-16"
        );
        assert!(lines[2].contains("\"Turmeric, Ground\""));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_missing_price_is_empty_field() {
        let dir = TempDir::new().unwrap();
        let mut sink = CsvSink::new(dir.path(), "shop", date());

        let mut record = make_record("Sugar", "1kg");
        record.price = None;
        record.price_text = "N/A".to_string();
        record.keyword = Keyword::Uncategorized;
        sink.write(&[record]).unwrap();

        let content = std::fs::read_to_string(sink.path()).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.contains("Uncategorized,Sugar,1kg,N/A,,https://"));
    }

    #[test]
    fn test_empty_batch_writes_header() {
        let dir = TempDir::new().unwrap();
        let mut sink = CsvSink::new(dir.path().join("nested"), "shop", date());

        let report = sink.write(&[]).unwrap();
        assert_eq!(report.written, 0);

        let content = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content.trim_end(), RECORD_COLUMNS.join(","));
    }
}
