//! catalog-scraper - storefront catalog scraper with product normalization
//!
//! Walks a merchant's paginated `products.json` catalog, splits titles into a
//! clean name and package size, tags each product with a category keyword and
//! persists the records to CSV and SQLite.

pub mod catalog;
pub mod classify;
pub mod commands;
pub mod config;
pub mod filters;
pub mod format;
pub mod normalize;
pub mod record;
pub mod sink;

pub use catalog::{CatalogApi, CatalogWalker, RawVariant, ShopifyClient, StopReason};
pub use classify::{Classifier, Keyword, MatchPolicy};
pub use config::Config;
pub use normalize::{extract, UnitExtraction};
pub use record::{NormalizedRecord, RecordBuilder};
