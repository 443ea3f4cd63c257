//! Page-by-page traversal of the catalog with product de-duplication.

use crate::catalog::client::CatalogApi;
use crate::catalog::models::{product_url, RawVariant};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

/// Why the walk ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// The API returned an empty page.
    Exhausted,
    /// The configured page limit was reached.
    PageLimit { pages: u32 },
    /// A page could not be fetched or decoded.
    Failed { page: u32, error: String },
}

impl StopReason {
    /// Returns true if the walk stopped because of a fetch failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, StopReason::Failed { .. })
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "catalog exhausted"),
            StopReason::PageLimit { pages } => write!(f, "page limit reached ({} pages)", pages),
            StopReason::Failed { page, error } => write!(f, "page {} failed: {}", page, error),
        }
    }
}

/// Walks catalog pages in order, yielding each product's variants once.
///
/// Products repeated across pages (the live catalog can shift while we page)
/// are yielded only the first time their URL is seen. The walk ends on an
/// empty page, the page limit, or the first failed page; a failure is recorded
/// in [`stop_reason`](Self::stop_reason) rather than returned.
pub struct CatalogWalker<'a, C: CatalogApi + ?Sized> {
    client: &'a C,
    page_size: u32,
    max_pages: Option<u32>,
    next_page: u32,
    pages_fetched: u32,
    products_seen: usize,
    duplicates_skipped: usize,
    visited: HashSet<String>,
    stop: Option<StopReason>,
}

impl<'a, C: CatalogApi + ?Sized> CatalogWalker<'a, C> {
    /// Creates a walker starting at page 1.
    pub fn new(client: &'a C, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            max_pages: None,
            next_page: 1,
            pages_fetched: 0,
            products_seen: 0,
            duplicates_skipped: 0,
            visited: HashSet::new(),
            stop: None,
        }
    }

    /// Stops after `max_pages` page fetches.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetches the next page and returns its not-yet-seen variants.
    ///
    /// Returns `None` once the walk has ended. A page whose products were all
    /// duplicates yields an empty vector, not `None`.
    pub async fn next_page(&mut self) -> Option<Vec<RawVariant>> {
        if self.stop.is_some() {
            return None;
        }

        if let Some(max) = self.max_pages {
            if self.pages_fetched >= max {
                info!("Reached page limit of {}", max);
                self.stop = Some(StopReason::PageLimit { pages: max });
                return None;
            }
        }

        let page = self.next_page;
        self.pages_fetched += 1;

        let products = match self.client.fetch_page(page, self.page_size).await {
            Ok(result) => result.products,
            Err(e) => {
                warn!("Failed to fetch page {}: {}", page, e);
                self.stop = Some(StopReason::Failed { page, error: e.to_string() });
                return None;
            }
        };

        if products.is_empty() {
            info!("Page {} is empty, no more products", page);
            self.stop = Some(StopReason::Exhausted);
            return None;
        }

        info!("Page {}: {} products", page, products.len());
        self.next_page += 1;

        let mut variants = Vec::new();
        for product in &products {
            let url = product_url(self.client.base_url(), &product.handle);
            if !self.visited.insert(url) {
                debug!("Skipping repeated product: {}", product.handle);
                self.duplicates_skipped += 1;
                continue;
            }
            self.products_seen += 1;
            variants.extend(product.raw_variants());
        }

        Some(variants)
    }

    /// Number of page requests made so far, including the terminal one.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Number of distinct products yielded.
    pub fn products_seen(&self) -> usize {
        self.products_seen
    }

    /// Number of repeated products skipped.
    pub fn duplicates_skipped(&self) -> usize {
        self.duplicates_skipped
    }

    /// Why the walk ended, once it has.
    pub fn stop_reason(&self) -> Option<&StopReason> {
        self.stop.as_ref()
    }
}
