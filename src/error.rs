//! Error types for the scraping pipeline.
//!
//! Fetch and extraction errors never leave a source adapter; they only decide
//! whether the adapter falls back to its mock catalog. Orchestration and
//! persistence errors are the only failures a caller ever sees.

use crate::models::Retailer;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Failure to retrieve a page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request failed with status: {0}")]
    Status(u16),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Live fetching is disabled")]
    Disabled,
}

/// Failure while extracting a single listing.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Malformed price text: {0:?}")]
    Price(String),

    #[error("Malformed link: {0:?}")]
    Link(String),
}

/// A scraped record that cannot become a product.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("Record has an empty name")]
    EmptyName,

    #[error("Record price must be positive, got {0}")]
    InvalidPrice(f64),

    #[error("Record URL is not absolute: {0}")]
    RelativeUrl(String),

    #[error("Record has no source retailer")]
    MissingSource,

    #[error("Invalid specs: {0}")]
    Specs(String),
}

/// Failure while fanning out to the source adapters.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("{retailer} adapter task failed: {reason}")]
    Join { retailer: Retailer, reason: String },
}

/// Persistence gateway failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors surfaced at the service boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Orchestration(#[from] OrchestratorError),

    #[error("Failed to save products: {0}")]
    Save(#[source] StoreError),

    #[error("Failed to fetch products: {0}")]
    Read(#[source] StoreError),
}

impl ServiceError {
    /// Converts the error into the response body the presentation layer renders.
    pub fn to_response(&self) -> ErrorResponse {
        let (error, details) = match self {
            ServiceError::Orchestration(e) => ("Failed to scrape products", e.to_string()),
            ServiceError::Save(e) => ("Failed to save products", e.to_string()),
            ServiceError::Read(e) => ("Failed to fetch products", e.to_string()),
        };
        ErrorResponse { error: error.to_string(), details: Some(details) }
    }
}

/// Generic failure body with a separate detail field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
