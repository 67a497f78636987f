//! Cart operation errors.
//!
//! Every failed operation leaves the cart untouched. Callers show
//! [`CartError::notice`] to the shopper as a transient notification and move
//! on; nothing is retried.

use rocketshoes_core::{DuplicateProduct, ProductId};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Coarse classification of a [`CartError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested quantity is not available.
    OutOfStock,
    /// The product is not in the cart.
    NotFound,
    /// A lookup or write failed.
    Failure,
}

/// Underlying cause of a generic operation failure.
#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Cart(#[from] DuplicateProduct),
}

/// Error returned by a cart operation.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart already holds all available units, or more were requested
    /// than are in stock.
    #[error("Product {product_id} out of stock: {available} available")]
    OutOfStock {
        product_id: ProductId,
        available: i64,
    },

    /// A product not yet in the cart has no stock at all.
    #[error("Product {0} is sold out")]
    SoldOut(ProductId),

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Adding the product failed.
    #[error("Failed to add product {product_id}: {source}")]
    AddFailed {
        product_id: ProductId,
        #[source]
        source: Failure,
    },

    /// Removing the product failed.
    #[error("Failed to remove product {product_id}: {source}")]
    RemoveFailed {
        product_id: ProductId,
        #[source]
        source: Failure,
    },

    /// Changing the product amount failed.
    #[error("Failed to update amount of product {product_id}: {source}")]
    UpdateFailed {
        product_id: ProductId,
        #[source]
        source: Failure,
    },
}

impl CartError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfStock { .. } | Self::SoldOut(_) => ErrorKind::OutOfStock,
            Self::NotInCart(_) => ErrorKind::NotFound,
            Self::AddFailed { .. } | Self::RemoveFailed { .. } | Self::UpdateFailed { .. } => {
                ErrorKind::Failure
            }
        }
    }

    /// Shopper-facing notification text, in the storefront's language.
    #[must_use]
    pub const fn notice(&self) -> &'static str {
        match self {
            Self::OutOfStock { .. } => "Quantidade solicitada fora de estoque",
            Self::SoldOut(_) => "Produto sem estoque",
            Self::AddFailed { .. } => "Erro na adição do produto",
            Self::NotInCart(_) | Self::RemoveFailed { .. } => "Erro na remoção do produto",
            Self::UpdateFailed { .. } => "Erro na alteração de quantidade do produto",
        }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
