//! Catalog
//!
//! Contract of the remote product API plus its HTTP and fixture-backed
//! implementations.

use async_trait::async_trait;
use mockall::automock;
use serde::Deserialize;
use thiserror::Error;

use crate::products::{Product, ProductPage};

pub mod auth;
pub mod fixture;
pub mod http;

pub use fixture::{FixtureCatalog, FixtureError};
pub use http::{HttpCatalog, HttpCatalogConfig};

/// Products per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Message used when an error body carries none.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a response
    #[error("Network error. Please check your connection. ({0})")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("{message} (status {status})")]
    Status {
        /// HTTP status code
        status: u16,
        /// First error message reported by the API
        message: String,
        /// Every error message reported by the API
        errors: Vec<String>,
    },

    /// The response body was not the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No product with the given id
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Loading a fixture catalog failed
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

impl CatalogError {
    /// HTTP status of the failure, if the API answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::Network(_) | Self::Decode(_) | Self::Fixture(_) => None,
        }
    }

    /// Build a status error from a response body.
    ///
    /// The message is the first reported error, then the top-level message,
    /// then a generic fallback.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        let errors: Vec<String> = parsed
            .errors
            .into_iter()
            .map(|detail| detail.message)
            .filter(|message| !message.is_empty())
            .collect();

        let message = errors
            .first()
            .cloned()
            .or(parsed.message.filter(|message| !message.is_empty()))
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

        Self::Status {
            status,
            message,
            errors,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorDetail>,

    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

/// Read access to the product catalog.
#[automock]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of products.
    async fn list_products(&self, page: u32, limit: u32) -> Result<ProductPage, CatalogError>;

    /// Fetch a single product by id.
    async fn get_product(&self, id: &str) -> Result<Product, CatalogError>;
}

#[async_trait]
impl<C: CatalogClient + ?Sized> CatalogClient for Box<C> {
    async fn list_products(&self, page: u32, limit: u32) -> Result<ProductPage, CatalogError> {
        (**self).list_products(page, limit).await
    }

    async fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        (**self).get_product(id).await
    }
}
