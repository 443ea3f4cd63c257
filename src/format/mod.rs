//! Output formatting for records and run reports (table, JSON, markdown, CSV).

use crate::classify::Classifier;
use crate::commands::scrape::{RunStatus, RunSummary};
use crate::config::OutputFormat;
use crate::record::{NormalizedRecord, RECORD_COLUMNS};

/// Formats records and reports for stdout.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single record.
    pub fn format_record(&self, record: &NormalizedRecord) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(record),
            OutputFormat::Table => self.table_single(record),
            OutputFormat::Markdown => self.markdown_single(record),
            OutputFormat::Csv => self.csv_records(std::slice::from_ref(record)),
        }
    }

    /// Formats multiple records.
    pub fn format_records(&self, records: &[NormalizedRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_header(),
                _ => "No records.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Markdown => self.markdown_records(records),
            OutputFormat::Csv => self.csv_records(records),
        }
    }

    /// Formats the report of a scrape run.
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => {
                let mut out = self.table_summary(summary);
                if !summary.records.is_empty() {
                    out.push_str("\n\n");
                    out.push_str(&self.table_records(&summary.records));
                }
                out
            }
            OutputFormat::Markdown => {
                let mut out = self.markdown_summary(summary);
                if !summary.records.is_empty() {
                    out.push_str("\n\n");
                    out.push_str(&self.markdown_records(&summary.records));
                }
                out
            }
            OutputFormat::Csv => self.format_records(&summary.records),
        }
    }

    /// Formats the active vocabulary in match order.
    pub fn format_keywords(&self, classifier: &Classifier) -> String {
        let labels: Vec<&str> = classifier.labels().collect();

        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "match_policy": classifier.policy(),
                "keywords": labels,
            }))
            .unwrap_or_else(|_| "{}".to_string()),
            OutputFormat::Table => {
                let mut lines = vec![format!(
                    "Match policy: {} ({} keywords)",
                    classifier.policy(),
                    labels.len()
                )];
                lines.push(String::new());
                for (i, label) in labels.iter().enumerate() {
                    lines.push(format!("{:>4}  {}", i + 1, label));
                }
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines = vec![format!("**Match policy:** {}", classifier.policy())];
                lines.push(String::new());
                for (i, label) in labels.iter().enumerate() {
                    lines.push(format!("{}. {}", i + 1, label));
                }
                lines.join("\n")
            }
            OutputFormat::Csv => Self::csv_keywords(&labels),
        }
    }

    // JSON formatting

    fn json_single(&self, record: &NormalizedRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    // Table formatting

    fn table_single(&self, record: &NormalizedRecord) -> String {
        let unit = if record.has_unit_size() { record.unit_size.as_str() } else { "(none)" };

        [
            format!("Name:    {}", record.product_name),
            format!("Keyword: {}", record.keyword),
            format!("Unit:    {}", unit),
            format!("Price:   {}", record.price_text),
            format!("URL:     {}", record.url),
            format!("Store:   {}", record.store),
            format!("Date:    {}", record.scrape_date),
        ]
        .join("\n")
    }

    fn table_records(&self, records: &[NormalizedRecord]) -> String {
        let keyword_width = 24;
        let unit_width = 8;
        let price_width = 10;
        let name_width = 50;

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<keyword_width$}  {:<unit_width$}  {:>price_width$}  {}",
            "Keyword", "Unit", "Price", "Name"
        ));
        lines.push(format!(
            "{:-<keyword_width$}  {:-<unit_width$}  {:-<price_width$}  {:-<name_width$}",
            "", "", "", ""
        ));

        // Rows
        for record in records {
            lines.push(format!(
                "{:<keyword_width$}  {:<unit_width$}  {:>price_width$}  {}",
                truncate(record.keyword.as_str(), keyword_width),
                record.unit_size,
                record.price_text,
                truncate(&record.product_name, name_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} records", records.len()));

        lines.join("\n")
    }

    fn table_summary(&self, summary: &RunSummary) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Store:      {} ({})", summary.store, summary.scrape_date));
        lines.push(format!("Status:     {}", summary.status));
        if let Some(reason) = &summary.stop_reason {
            lines.push(format!("Stopped:    {}", reason));
        }
        lines.push(format!("Pages:      {}", summary.pages_fetched));
        lines.push(format!(
            "Products:   {} ({} repeated skipped)",
            summary.products_seen, summary.duplicates_skipped
        ));
        lines.push(format!(
            "Records:    {} built, {} kept",
            summary.records_built, summary.records_kept
        ));

        for sink in &summary.sinks {
            lines.push(format!(
                "Saved:      {} -> {} ({} new, {} existing)",
                sink.sink, sink.location, sink.written, sink.skipped
            ));
        }

        for error in &summary.sink_errors {
            lines.push(format!("Failed:     {}", error));
        }

        if summary.status == RunStatus::NothingCollected {
            lines.push("Nothing was collected; no files were written.".to_string());
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, record: &NormalizedRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", record.product_name));
        lines.push(String::new());
        lines.push(format!("- **Keyword:** {}", record.keyword));
        if record.has_unit_size() {
            lines.push(format!("- **Unit:** {}", record.unit_size));
        }
        lines.push(format!("- **Price:** {}", record.price_text));
        lines.push(format!("- **URL:** [View product]({})", record.url));

        lines.join("\n")
    }

    fn markdown_records(&self, records: &[NormalizedRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Keyword | Unit | Price | Name |".to_string());
        lines.push("|---------|------|-------|------|".to_string());

        for record in records {
            lines.push(format!(
                "| {} | {} | {} | [{}]({}) |",
                record.keyword,
                record.unit_size,
                record.price_text,
                truncate(&record.product_name, 40),
                record.url
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} records*", records.len()));

        lines.join("\n")
    }

    fn markdown_summary(&self, summary: &RunSummary) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {} ({})", summary.store, summary.scrape_date));
        lines.push(String::new());
        lines.push(format!("- **Status:** {}", summary.status));
        if let Some(reason) = &summary.stop_reason {
            lines.push(format!("- **Stopped:** {}", reason));
        }
        lines.push(format!("- **Pages:** {}", summary.pages_fetched));
        lines.push(format!("- **Products:** {}", summary.products_seen));
        lines.push(format!(
            "- **Records:** {} built, {} kept",
            summary.records_built, summary.records_kept
        ));
        for sink in &summary.sinks {
            lines.push(format!(
                "- **{}:** `{}` ({} new, {} existing)",
                sink.sink, sink.location, sink.written, sink.skipped
            ));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header() -> String {
        RECORD_COLUMNS.join(",")
    }

    fn csv_records(&self, records: &[NormalizedRecord]) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in records {
            if writer.serialize(record).is_err() {
                return Self::csv_header();
            }
        }

        writer
            .into_inner()
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(Self::csv_header)
    }

    fn csv_keywords(labels: &[&str]) -> String {
        const HEADER: &str = "position,keyword";

        let mut writer = csv::Writer::from_writer(Vec::new());
        if writer.write_record(HEADER.split(',')).is_err() {
            return HEADER.to_string();
        }
        for (i, label) in labels.iter().enumerate() {
            if writer.write_record([(i + 1).to_string().as_str(), *label]).is_err() {
                return HEADER.to_string();
            }
        }

        writer
            .into_inner()
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|| HEADER.to_string())
    }
}

/// Shortens `s` to at most `width` characters, marking the cut with `...`.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}
