//! Remote catalog and stock service.
//!
//! # Architecture
//!
//! - The catalog is the source of truth for product details and stock -
//!   the cart never writes back
//! - Product details are cached in memory via `moka` (5 minute TTL by default)
//! - Stock is never cached: it is mutable state and every cart check must see
//!   the current value
//!
//! # Endpoints
//!
//! - `GET /products/{id}` - product details
//! - `GET /stock/{id}` - `{ "amount": integer }`
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cart::catalog::{Catalog, HttpCatalog};
//!
//! let catalog = HttpCatalog::new(&config.catalog)?;
//!
//! let product = catalog.product(ProductId::new(1)).await?;
//! let stock = catalog.stock(ProductId::new(1)).await?;
//! ```

mod http;

pub use http::HttpCatalog;

use std::future::Future;

use rocketshoes_core::{ProductDetails, ProductId, Stock};
use thiserror::Error;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Service answered with a non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Start of the response body, for diagnostics.
        body: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only access to product details and stock levels.
pub trait Catalog {
    /// Fetch the details of a product.
    fn product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<ProductDetails, CatalogError>> + Send;

    /// Fetch the current stock of a product.
    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, CatalogError>> + Send;
}
