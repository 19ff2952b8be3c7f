//! Data models for scraped records, typed specs, and persisted products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Product category. Always supplied by the caller, never inferred from markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Laptop,
    Headphone,
    Monitor,
}

impl Category {
    /// Query used when the caller leaves the search box empty.
    pub fn default_query(&self) -> &'static str {
        match self {
            Category::Laptop => "laptop",
            Category::Headphone => "headphones",
            Category::Monitor => "monitor",
        }
    }

    /// Returns all categories.
    pub fn all() -> &'static [Category] {
        &[Category::Laptop, Category::Headphone, Category::Monitor]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Category::Laptop => "LAPTOP",
            Category::Headphone => "HEADPHONE",
            Category::Monitor => "MONITOR",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "laptop" | "laptops" => Ok(Category::Laptop),
            "headphone" | "headphones" => Ok(Category::Headphone),
            "monitor" | "monitors" => Ok(Category::Monitor),
            _ => Err(format!("Unknown category: {}. Use: laptop, headphone, monitor", s)),
        }
    }
}

/// A scraped retailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Retailer {
    Amazon,
    BestBuy,
    Newegg,
}

impl Retailer {
    /// Origin used to qualify relative links.
    pub fn origin(&self) -> &'static str {
        match self {
            Retailer::Amazon => "https://www.amazon.com",
            Retailer::BestBuy => "https://www.bestbuy.com",
            Retailer::Newegg => "https://www.newegg.com",
        }
    }

    /// Human-readable retailer name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Retailer::Amazon => "Amazon",
            Retailer::BestBuy => "Best Buy",
            Retailer::Newegg => "Newegg",
        }
    }

    /// Order in which scraped batches are saved.
    pub fn save_order() -> &'static [Retailer] {
        &[Retailer::BestBuy, Retailer::Amazon, Retailer::Newegg]
    }
}

impl fmt::Display for Retailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Retailer::Amazon => "AMAZON",
            Retailer::BestBuy => "BESTBUY",
            Retailer::Newegg => "NEWEGG",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Retailer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "amazon" => Ok(Retailer::Amazon),
            "bestbuy" => Ok(Retailer::BestBuy),
            "newegg" => Ok(Retailer::Newegg),
            _ => Err(format!("Unknown retailer: {}. Use: amazon, bestbuy, newegg", s)),
        }
    }
}

/// Where a scraped record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    #[default]
    Live,
    Mock,
}

/// Spec key holding the extraction timestamp.
pub const SCRAPED_AT: &str = "scraped_at";

/// One product listing extracted from a retailer page (or the fallback catalog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedRecord {
    pub name: String,
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub price: f64,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub in_stock: bool,
    pub category: Category,
    #[serde(default)]
    pub specs: Map<String, Value>,
    /// Set by the orchestrator, never by an adapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Retailer>,
    #[serde(default)]
    pub origin: Origin,
}

impl ScrapedRecord {
    /// Creates a live record; brand is derived from the name.
    pub fn new(name: impl Into<String>, price: f64, url: impl Into<String>, category: Category) -> Self {
        let name = name.into();
        Self {
            brand: brand_from_name(&name),
            name,
            model: None,
            price,
            url: url.into(),
            image_url: None,
            in_stock: true,
            category,
            specs: Map::new(),
            source: None,
            origin: Origin::Live,
        }
    }

    /// A record is valid iff it has a name and a positive price.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.price.is_finite() && self.price > 0.0
    }

    /// Returns the extraction timestamp if one was stamped.
    pub fn scraped_at(&self) -> Option<DateTime<Utc>> {
        self.specs
            .get(SCRAPED_AT)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&Utc))
    }

    /// Stamps the extraction timestamp into specs.
    pub fn stamp(&mut self, at: DateTime<Utc>) {
        self.specs.insert(SCRAPED_AT.to_string(), Value::String(at.to_rfc3339()));
    }
}

/// First whitespace-delimited token of a product name.
pub fn brand_from_name(name: &str) -> String {
    name.split_whitespace().next().unwrap_or_default().to_string()
}

/// Laptop attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaptopSpecs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, rename = "scraped_at", skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Headphone attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadphoneSpecs {
    /// `over-ear`, `on-ear` or `in-ear`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wireless: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_cancellation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_life: Option<String>,
    #[serde(default, rename = "scraped_at", skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Monitor attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSpecs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    #[serde(default, rename = "scraped_at", skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Specs tagged by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSpecs {
    Laptop(LaptopSpecs),
    Headphone(HeadphoneSpecs),
    Monitor(MonitorSpecs),
}

impl ProductSpecs {
    /// The category these specs belong to.
    pub fn category(&self) -> Category {
        match self {
            ProductSpecs::Laptop(_) => Category::Laptop,
            ProductSpecs::Headphone(_) => Category::Headphone,
            ProductSpecs::Monitor(_) => Category::Monitor,
        }
    }

    pub fn scraped_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ProductSpecs::Laptop(s) => s.scraped_at,
            ProductSpecs::Headphone(s) => s.scraped_at,
            ProductSpecs::Monitor(s) => s.scraped_at,
        }
    }

    /// Short human summary, e.g. `16GB, 512GB SSD`.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = match self {
            ProductSpecs::Laptop(s) => {
                [&s.processor, &s.ram, &s.storage, &s.gpu].into_iter().flatten().cloned().collect()
            }
            ProductSpecs::Headphone(s) => {
                let mut parts: Vec<String> = s.form_factor.iter().cloned().collect();
                if s.wireless == Some(true) {
                    parts.push("wireless".to_string());
                }
                if s.noise_cancellation == Some(true) {
                    parts.push("ANC".to_string());
                }
                parts
            }
            ProductSpecs::Monitor(s) => {
                [&s.screen_size, &s.resolution, &s.refresh_rate].into_iter().flatten().cloned().collect()
            }
        };
        parts.join(", ")
    }
}

/// Current price snapshot for one retailer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub retailer: Retailer,
    pub price: f64,
    pub url: String,
    pub in_stock: bool,
    pub updated_at: DateTime<Utc>,
}

/// Immutable price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistoryPoint {
    pub retailer: Retailer,
    pub price: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Normalized product ready to be created by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub model: Option<String>,
    pub category: Category,
    pub specs: ProductSpecs,
    pub image_url: Option<String>,
    pub quote: PriceQuote,
    pub history: PriceHistoryPoint,
}

/// Persisted product with its retailer quotes and price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub category: Category,
    pub specs: ProductSpecs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub prices: Vec<PriceQuote>,
    #[serde(default)]
    pub price_history: Vec<PriceHistoryPoint>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Builds a product from normalizer output.
    pub fn from_new(new: NewProduct, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            brand: new.brand,
            model: new.model,
            category: new.category,
            specs: new.specs,
            image_url: new.image_url,
            prices: vec![new.quote],
            price_history: vec![new.history],
            created_at,
        }
    }

    /// Cheapest quote across retailers.
    pub fn lowest_price(&self) -> Option<f64> {
        self.prices.iter().map(|p| p.price).reduce(f64::min)
    }

    /// Most expensive quote across retailers.
    pub fn highest_price(&self) -> Option<f64> {
        self.prices.iter().map(|p| p.price).reduce(f64::max)
    }

    /// Price of the first quote, as shown in scrape responses.
    pub fn current_price(&self) -> f64 {
        self.prices.first().map(|p| p.price).unwrap_or(0.0)
    }

    /// Quote for a given retailer, if any.
    pub fn quote(&self, retailer: Retailer) -> Option<&PriceQuote> {
        self.prices.iter().find(|p| p.retailer == retailer)
    }
}
