//! catalog-scraper - storefront catalog scraper with product normalization
//!
//! A single-pass batch job: walk the catalog, normalize, classify, persist.

use anyhow::Result;
use catalog_scraper::classify::MatchPolicy;
use catalog_scraper::commands::{ExtractCommand, ScrapeCommand};
use catalog_scraper::config::{Config, OutputFormat};
use catalog_scraper::format::Formatter;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "catalog-scraper",
    version,
    about = "Storefront catalog scraper with unit extraction and keyword tagging",
    long_about = "Walks a store's products.json catalog, normalizes titles into name and package size, tags each product with a category keyword and saves the results to CSV and SQLite."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "CATALOG_PROXY")]
    proxy: Option<String>,

    /// Delay between page requests in milliseconds
    #[arg(long, global = true, env = "CATALOG_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Keyword match policy (substring, all_words)
    #[arg(long, global = true)]
    match_policy: Option<MatchPolicy>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the whole catalog and save the records
    #[command(alias = "s")]
    Scrape {
        /// Store root URL
        #[arg(long)]
        base_url: Option<String>,

        /// Collection handle to walk
        #[arg(long)]
        collection: Option<String>,

        /// Scrape date stamped on records (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u32>,

        /// Keep products that match no keyword
        #[arg(long)]
        keep_uncategorized: bool,

        /// Directory for the CSV file
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Skip the CSV file
        #[arg(long)]
        no_csv: bool,

        /// SQLite database path
        #[arg(long)]
        database: Option<PathBuf>,

        /// Skip the database
        #[arg(long, conflicts_with = "database")]
        no_db: bool,
    },

    /// Normalize a single title without fetching anything
    #[command(alias = "x")]
    Extract {
        /// Product title
        title: String,

        /// Variant title (defaults to "Default Title")
        #[arg(long)]
        variant: Option<String>,

        /// Raw price text
        #[arg(long)]
        price: Option<String>,

        /// Product handle for the URL (defaults to a slug of the title)
        #[arg(long)]
        handle: Option<String>,
    },

    /// List the active keyword vocabulary
    Keywords,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(policy) = cli.match_policy {
        config.match_policy = policy;
    }

    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Scrape {
            base_url,
            collection,
            date,
            max_pages,
            keep_uncategorized,
            output_dir,
            no_csv,
            database,
            no_db,
        } => {
            if let Some(url) = base_url {
                config.base_url = url;
            }
            if let Some(c) = collection {
                config.collection = c;
            }
            if max_pages.is_some() {
                config.max_pages = max_pages;
            }
            if keep_uncategorized {
                config.drop_uncategorized = false;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if no_csv {
                config.write_csv = false;
            }
            if database.is_some() {
                config.database = database;
            }
            if no_db {
                config.database = None;
            }

            let cmd = ScrapeCommand::new(config, date.unwrap_or(today));
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Extract { title, variant, price, handle } => {
            let cmd = ExtractCommand::new(config, today);
            let output =
                cmd.execute(&title, variant.as_deref(), price.as_deref(), handle.as_deref());
            println!("{}", output);
        }

        Commands::Keywords => {
            let formatter = Formatter::new(config.format);
            println!("{}", formatter.format_keywords(&config.classifier()));
        }
    }

    Ok(())
}
