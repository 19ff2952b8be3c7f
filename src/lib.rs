//! pricewatch - Concurrent multi-retailer product scraper
//!
//! Searches Amazon, Best Buy and Newegg in parallel, falls back to a fixed
//! catalog when a retailer cannot be scraped, and saves normalized products
//! with their price quotes and price history.

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod mock;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod service;
pub mod sources;
pub mod store;

pub use config::{Config, OutputFormat, SavePolicy};
pub use models::{Category, Origin, PriceHistoryPoint, PriceQuote, Product, ProductSpecs, Retailer, ScrapedRecord};
pub use orchestrator::{Orchestrator, ScrapeBatch};
pub use service::PriceWatch;
pub use store::{JsonFileStore, MemoryStore, ProductStore};
