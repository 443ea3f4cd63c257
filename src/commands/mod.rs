//! CLI command implementations.

pub mod extract;
pub mod scrape;

pub use extract::ExtractCommand;
pub use scrape::{RunStatus, RunSummary, ScrapeCommand};
