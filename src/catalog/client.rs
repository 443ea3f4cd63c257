//! HTTP client for the storefront `products.json` API using wreq.

use crate::catalog::models::ProductsPage;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Why a catalog page could not be retrieved.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("request failed: {0}")]
    Transport(#[from] wreq::Error),

    #[error("catalog returned status {0}")]
    Status(u16),

    #[error("invalid catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Trait for paginated catalog access - enables mocking for tests.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches one page (numbered from 1) of at most `limit` products.
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ProductsPage, PageError>;

    /// Returns the catalog base address that product URLs are built on.
    fn base_url(&self) -> &str;
}

/// Storefront client with browser emulation and a politeness delay.
pub struct ShopifyClient {
    client: Client,
    base_url: String,
    collection: String,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl ShopifyClient {
    /// Creates a client for the configured store.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a client with an optional custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;
        let base_url = base_url.unwrap_or_else(|| config.base_url.clone());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// Address of one listing page.
    fn page_url(&self, page: u32, limit: u32) -> String {
        format!(
            "{}/collections/{}/products.json?page={}&limit={}",
            self.base_url, self.collection, page, limit
        )
    }

    async fn get(&self, url: &str) -> Result<String, PageError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "application/json")
            .header("Accept-Language", "en-CA,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(PageError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Sleeps between pages; the first page is fetched immediately.
    async fn delay(&self, page: u32) {
        if page <= 1 || self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl CatalogApi for ShopifyClient {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ProductsPage, PageError> {
        self.delay(page).await;

        info!("Fetching catalog page {}", page);
        let body = self.get(&self.page_url(page, limit)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
