//! Persistence targets for accepted records.

pub mod csv;
pub mod sqlite;

use crate::record::NormalizedRecord;
use anyhow::Result;
use serde::Serialize;

pub use self::csv::CsvSink;
pub use self::sqlite::SqliteStore;

/// Outcome of handing a batch to one sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkReport {
    /// Sink name
    pub sink: String,
    /// File or database the records went to
    pub location: String,
    /// Records newly written
    pub written: usize,
    /// Records already present and left untouched
    pub skipped: usize,
}

/// A destination for the records of a run.
pub trait RecordSink {
    /// Writes the batch and reports what happened.
    fn write(&mut self, records: &[NormalizedRecord]) -> Result<SinkReport>;

    /// Returns a short name for logs and reports.
    fn name(&self) -> &'static str;
}
