//! Data models for the storefront `products.json` API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of the `products.json` listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductsPage {
    /// Products on this page; empty once pagination is exhausted
    #[serde(default)]
    pub products: Vec<ApiProduct>,
}

impl ProductsPage {
    /// Returns true if this page marks the end of the catalog.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// A catalog product as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiProduct {
    /// URL slug
    #[serde(default)]
    pub handle: String,
    /// Merchant title
    #[serde(default)]
    pub title: String,
    /// Purchasable options
    #[serde(default)]
    pub variants: Vec<ApiVariant>,
}

/// A purchasable option of a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiVariant {
    /// Option title, `"Default Title"` when the product has a single option
    #[serde(default)]
    pub title: String,
    /// Price as sent by the API: usually a string, sometimes a number
    #[serde(default)]
    pub price: Option<Value>,
}

impl ApiVariant {
    /// Returns the price as raw text; missing or non-scalar prices become empty.
    pub fn price_text(&self) -> String {
        match &self.price {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

/// A single variant flattened with its product fields, ready for normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVariant {
    pub product_title: String,
    pub variant_title: String,
    pub price_raw: String,
    pub product_handle: String,
}

impl RawVariant {
    /// Creates a raw variant from borrowed fields.
    pub fn new(
        product_title: impl Into<String>,
        variant_title: impl Into<String>,
        price_raw: impl Into<String>,
        product_handle: impl Into<String>,
    ) -> Self {
        Self {
            product_title: product_title.into(),
            variant_title: variant_title.into(),
            price_raw: price_raw.into(),
            product_handle: product_handle.into(),
        }
    }
}

impl ApiProduct {
    /// Flattens this product into one raw variant per API variant.
    pub fn raw_variants(&self) -> Vec<RawVariant> {
        self.variants
            .iter()
            .map(|v| RawVariant::new(&self.title, &v.title, v.price_text(), &self.handle))
            .collect()
    }
}

/// Product page address for a handle under the catalog base address.
pub fn product_url(base_url: &str, handle: &str) -> String {
    format!("{}/products/{}", base_url.trim_end_matches('/'), handle)
}
