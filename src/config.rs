//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Desktop Chrome user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum records kept per retailer
    #[serde(default = "default_max_per_source")]
    pub max_per_source: usize,

    /// User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Additional request headers
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,

    /// What a rescrape of an existing product does
    #[serde(default)]
    pub save_policy: SavePolicy,

    /// JSON store location (defaults to the user data directory)
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Skip the network and serve fallback catalogs
    #[serde(default)]
    pub offline: bool,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_per_source() -> usize {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_per_source: default_max_per_source(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            extra_headers: BTreeMap::new(),
            save_policy: SavePolicy::Create,
            store_path: None,
            format: OutputFormat::Table,
            offline: false,
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

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate().with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("pricewatch.toml");
        if local_config.exists() {
            debug!("Found pricewatch.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("pricewatch").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(timeout) = std::env::var("PRICEWATCH_TIMEOUT_MS") {
            if let Ok(t) = timeout.parse() {
                self.timeout_ms = t;
            }
        }

        if let Ok(max) = std::env::var("PRICEWATCH_MAX_PER_SOURCE") {
            if let Ok(m) = max.parse() {
                self.max_per_source = m;
            }
        }

        if let Ok(path) = std::env::var("PRICEWATCH_STORE") {
            self.store_path = Some(PathBuf::from(path));
        }

        if let Ok(policy) = std::env::var("PRICEWATCH_SAVE_POLICY") {
            if let Ok(p) = policy.parse() {
                self.save_policy = p;
            }
        }

        self
    }

    /// Rejects settings under which no scrape can return live records.
    pub fn validate(self) -> Result<Self> {
        if self.max_per_source == 0 {
            anyhow::bail!("max_per_source must be at least 1");
        }
        if self.timeout_ms == 0 {
            anyhow::bail!("timeout_ms must be at least 1");
        }
        Ok(self)
    }

    /// Resolved store location.
    pub fn store_path(&self) -> PathBuf {
        if let Some(path) = &self.store_path {
            return path.clone();
        }

        dirs::data_dir()
            .map(|dir| dir.join("pricewatch").join("products.json"))
            .unwrap_or_else(|| PathBuf::from("pricewatch-products.json"))
    }
}

/// How saving treats a product that was already scraped before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavePolicy {
    /// Every scraped record becomes a new product row.
    #[default]
    Create,
    /// Reuse the product with the same category, name and brand.
    Upsert,
}

impl std::str::FromStr for SavePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(SavePolicy::Create),
            "upsert" => Ok(SavePolicy::Upsert),
            _ => Err(format!("Unknown save policy: {}. Use: create, upsert", s)),
        }
    }
}

impl std::fmt::Display for SavePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SavePolicy::Create => write!(f, "create"),
            SavePolicy::Upsert => write!(f, "upsert"),
        }
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
