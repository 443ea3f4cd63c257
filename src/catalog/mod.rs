//! Storefront catalog access: HTTP client, API models and the page walker.

pub mod client;
pub mod models;
pub mod walker;

pub use client::{CatalogApi, PageError, ShopifyClient};
pub use models::{product_url, ApiProduct, ApiVariant, ProductsPage, RawVariant};
pub use walker::{CatalogWalker, StopReason};
