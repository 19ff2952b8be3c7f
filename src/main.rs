//! pricewatch - Concurrent multi-retailer product scraper CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use pricewatch::commands::{ListCommand, ScrapeCommand, ShowCommand, SourcesCommand};
use pricewatch::config::{Config, OutputFormat, SavePolicy};
use pricewatch::models::Category;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pricewatch",
    version,
    about = "Scrape Amazon, Best Buy and Newegg and track prices",
    long_about = "Searches three retailers concurrently for laptops, headphones or monitors, \
                  falls back to a built-in catalog when a retailer cannot be scraped, \
                  and keeps products with their price history in a local JSON store."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json, markdown, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Product store file
    #[arg(long, global = true, env = "PRICEWATCH_STORE")]
    store: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long, global = true, env = "PRICEWATCH_TIMEOUT_MS")]
    timeout: Option<u64>,

    /// Skip the network and serve the built-in catalog
    #[arg(long, global = true)]
    offline: bool,

    /// Reuse existing products with the same name and brand
    #[arg(long, global = true)]
    upsert: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape all retailers for a category and save the results
    #[command(alias = "s")]
    Scrape {
        /// Product category (laptop, headphone, monitor)
        category: Category,

        /// Search query (defaults to the category name)
        query: Option<String>,

        /// Maximum products kept per retailer
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// List saved products, newest first
    #[command(alias = "ls")]
    List {
        /// Only list this category
        #[arg(long)]
        category: Option<Category>,
    },

    /// Show one product with its prices and history
    Show {
        /// Product id
        id: String,
    },

    /// List the retailers and the searches they run
    Sources {
        /// Category whose default query to show
        #[arg(long)]
        category: Option<Category>,
    },
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

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(store) = cli.store {
        config.store_path = Some(store);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_ms = timeout;
    }
    if cli.offline {
        config.offline = true;
    }
    if cli.upsert {
        config.save_policy = SavePolicy::Upsert;
    }
    if let Commands::Scrape { max: Some(max), .. } = &cli.command {
        config.max_per_source = *max;
    }
    let config = config.validate()?;

    let output = match cli.command {
        Commands::Scrape { category, query, .. } => {
            ScrapeCommand::new(config).execute(category, query.as_deref()).await?
        }
        Commands::List { category } => ListCommand::new(config).execute(category).await?,
        Commands::Show { id } => ShowCommand::new(config).execute(&id).await?,
        Commands::Sources { category } => SourcesCommand::new(config).execute(category),
    };

    println!("{}", output);
    Ok(())
}
