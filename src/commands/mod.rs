//! CLI command implementations.

pub mod list;
pub mod scrape;
pub mod show;
pub mod sources;

pub use list::ListCommand;
pub use scrape::ScrapeCommand;
pub use show::ShowCommand;
pub use sources::SourcesCommand;

use crate::config::Config;
use crate::error::ServiceError;
use crate::orchestrator::Orchestrator;
use crate::service::PriceWatch;
use crate::store::JsonFileStore;
use anyhow::{Context, Result};
use tracing::debug;

/// Wires the configured orchestrator and on-disk store together.
pub async fn open_service(config: &Config) -> Result<PriceWatch<JsonFileStore>> {
    let orchestrator = Orchestrator::from_config(config).context("Failed to create HTTP client")?;

    let path = config.store_path();
    debug!("Using store at {}", path.display());
    let store = JsonFileStore::open(&path)
        .await
        .with_context(|| format!("Failed to open product store: {}", path.display()))?;

    Ok(PriceWatch::new(orchestrator, store, config.save_policy))
}

/// Renders a service failure the way the boundary reports it.
pub(crate) fn describe(err: ServiceError) -> anyhow::Error {
    let response = err.to_response();
    match response.details {
        Some(details) => anyhow::anyhow!("{}: {}", response.error, details),
        None => anyhow::anyhow!(response.error),
    }
}
