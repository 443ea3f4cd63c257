//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::classify::{vocabulary::DEFAULT_VOCABULARY, Classifier, MatchPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Merchant label stamped on every record
    #[serde(default = "default_store")]
    pub store: String,

    /// Storefront root, e.g. https://spicedivine.ca
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection handle to walk
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Products requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Stop after this many pages even if the catalog continues
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// Base delay between page requests in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Ordered category vocabulary, most specific phrases first
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// How a vocabulary phrase is matched against a name
    #[serde(default)]
    pub match_policy: MatchPolicy,

    /// Drop records that matched no vocabulary phrase before persisting
    #[serde(default = "default_true")]
    pub drop_uncategorized: bool,

    /// Directory for the per-run CSV file
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// CSV file name prefix; the scrape date is appended
    #[serde(default = "default_csv_prefix")]
    pub csv_prefix: String,

    /// Write the CSV snapshot
    #[serde(default = "default_true")]
    pub write_csv: bool,

    /// SQLite database path; None disables the database
    #[serde(default = "default_database")]
    pub database: Option<PathBuf>,

    /// Database table name
    #[serde(default = "default_table")]
    pub table: String,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_store() -> String {
    "Spice Divine".to_string()
}

fn default_base_url() -> String {
    "https://spicedivine.ca".to_string()
}

fn default_collection() -> String {
    "all".to_string()
}

fn default_page_size() -> u32 {
    250
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_keywords() -> Vec<String> {
    DEFAULT_VOCABULARY.iter().map(|k| k.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_csv_prefix() -> String {
    "spicedivine_products".to_string()
}

fn default_database() -> Option<PathBuf> {
    Some(PathBuf::from("catalog.sqlite"))
}

fn default_table() -> String {
    "spicedivine_products".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: default_store(),
            base_url: default_base_url(),
            collection: default_collection(),
            page_size: default_page_size(),
            max_pages: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: 0,
            proxy: None,
            keywords: default_keywords(),
            match_policy: MatchPolicy::default(),
            drop_uncategorized: true,
            output_dir: default_output_dir(),
            csv_prefix: default_csv_prefix(),
            write_csv: true,
            database: default_database(),
            table: default_table(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("catalog-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("CATALOG_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.base_url = base_url;
            }
        }

        if let Ok(proxy) = std::env::var("CATALOG_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("CATALOG_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(database) = std::env::var("CATALOG_DATABASE") {
            self.database = Some(PathBuf::from(database));
        }

        if let Ok(policy) = std::env::var("CATALOG_MATCH_POLICY") {
            if let Ok(p) = policy.parse() {
                self.match_policy = p;
            }
        }

        self
    }

    /// Builds the classifier for the configured vocabulary and policy.
    pub fn classifier(&self) -> Classifier {
        Classifier::new(&self.keywords, self.match_policy)
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
