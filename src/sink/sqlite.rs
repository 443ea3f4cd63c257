//! SQLite store with identity-triple duplicate suppression.

use super::{RecordSink, SinkReport};
use crate::record::NormalizedRecord;
use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

/// Persistent record table keyed by (url, unit_size, scrape_date).
pub struct SqliteStore {
    conn: Connection,
    table: String,
    location: String,
}

impl SqliteStore {
    /// Opens (or creates) the database file and ensures the table exists.
    pub fn open(path: impl AsRef<Path>, table: &str) -> Result<Self> {
        let path = path.as_ref();
        validate_table_name(table)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        Self::with_connection(conn, table, path.display().to_string())
    }

    /// Opens a throwaway in-memory database.
    pub fn in_memory(table: &str) -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::with_connection(conn, table, ":memory:".to_string())
    }

    fn with_connection(conn: Connection, table: &str, location: String) -> Result<Self> {
        validate_table_name(table)?;
        let store = Self { conn, table: table.to_string(), location };
        store.create_table()?;
        Ok(store)
    }

    fn create_table(&self) -> Result<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                store TEXT NOT NULL,
                keyword TEXT NOT NULL,
                product_name TEXT NOT NULL,
                unit_size TEXT NOT NULL,
                price_text TEXT NOT NULL,
                price NUMERIC,
                url TEXT NOT NULL,
                scrape_date DATE NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT (datetime('now')),
                UNIQUE (url, unit_size, scrape_date)
            )",
            self.table
        );
        self.conn
            .execute(&sql, [])
            .with_context(|| format!("Failed to create table {}", self.table))?;
        Ok(())
    }

    /// Inserts records in one transaction. Returns the number of new rows;
    /// rows whose identity triple already exists are left untouched.
    pub fn insert_records(&mut self, records: &[NormalizedRecord]) -> Result<usize> {
        let sql = format!(
            "INSERT INTO {} (store, keyword, product_name, unit_size, price_text, price, url, scrape_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT (url, unit_size, scrape_date) DO NOTHING",
            self.table
        );

        let tx = self.conn.transaction().context("Failed to start transaction")?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(&sql)?;
            for record in records {
                let changed = stmt.execute(params![
                    record.store,
                    record.keyword.as_str(),
                    record.product_name,
                    record.unit_size,
                    record.price_text,
                    record.price.map(|p| p.to_string()),
                    record.url,
                    record.scrape_date,
                ])?;
                if changed == 1 {
                    inserted += 1;
                } else {
                    let (url, unit_size, scrape_date) = record.identity();
                    debug!("Already stored: {} [{}] {}", url, unit_size, scrape_date);
                }
            }
        }
        tx.commit().context("Failed to commit records")?;

        Ok(inserted)
    }

    /// Returns the number of stored rows.
    pub fn count(&self) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

}

impl RecordSink for SqliteStore {
    fn write(&mut self, records: &[NormalizedRecord]) -> Result<SinkReport> {
        let written = self.insert_records(records)?;
        let skipped = records.len() - written;

        info!("Inserted {} new rows into {} ({} already present)", written, self.table, skipped);

        Ok(SinkReport {
            sink: self.name().to_string(),
            location: format!("{}#{}", self.location, self.table),
            written,
            skipped,
        })
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
fn validate_table_name(table: &str) -> Result<()> {
    let valid = table.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        bail!("Invalid table name: {:?}", table);
    }
    Ok(())
}
