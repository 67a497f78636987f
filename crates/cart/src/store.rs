//! The cart store.
//!
//! Owns the in-memory cart and keeps the persisted snapshot and subscribers in
//! step with it. Each operation runs read → check stock → compute new cart →
//! persist → publish, and commits nothing unless the persist succeeds.
//!
//! Operations take `&mut self`, so two operations on one store can never
//! interleave.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cart::{CartStore, UpdateProductAmount};
//!
//! let mut store = CartStore::load(catalog, storage, DEFAULT_STORAGE_KEY)?;
//! let mut updates = store.subscribe();
//!
//! store.add_product(ProductId::new(1)).await?;
//! store
//!     .update_product_amount(UpdateProductAmount {
//!         product_id: ProductId::new(1),
//!         amount: 3,
//!     })
//!     .await?;
//! store.remove_product(ProductId::new(1))?;
//! ```

use rocketshoes_core::{Cart, Product, ProductId};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;
use crate::error::{CartError, ErrorKind, Failure, Result};
use crate::storage::{self, CartStorage, StorageError};

/// Request to set the amount of a product already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: u32,
}

/// Stock-checked cart backed by a catalog and a persistent store.
pub struct CartStore<C, S> {
    catalog: C,
    storage: S,
    key: String,
    cart: Cart,
    publisher: watch::Sender<Cart>,
}

impl<C, S> CartStore<C, S>
where
    C: Catalog,
    S: CartStorage,
{
    /// Create a store, reading the persisted cart under `key` once.
    ///
    /// A missing key yields an empty cart. A stored value that does not
    /// decode as a cart is logged and treated as empty; the next successful
    /// operation overwrites it.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be read.
    pub fn load(
        catalog: C,
        storage: S,
        key: impl Into<String>,
    ) -> std::result::Result<Self, StorageError> {
        let key = key.into();

        let cart = match storage::load_json::<Cart, _>(&storage, &key) {
            Ok(cart) => cart.unwrap_or_default(),
            Err(StorageError::Format(e)) => {
                warn!(key = %key, error = %e, "Discarding unreadable cart snapshot");
                Cart::new()
            }
            Err(e) => return Err(e),
        };

        info!(key = %key, products = cart.len(), "Cart loaded");

        let (publisher, _) = watch::channel(cart.clone());

        Ok(Self {
            catalog,
            storage,
            key,
            cart,
            publisher,
        })
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Observe every committed cart. The receiver starts at the current cart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.publisher.subscribe()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart gets its amount incremented, unless the
    /// cart already holds every unit in stock. A new product is appended with
    /// amount 1, unless it has no stock.
    ///
    /// # Errors
    ///
    /// - `CartError::OutOfStock` if the cart already holds all available units
    /// - `CartError::SoldOut` if a new product has no stock
    /// - `CartError::AddFailed` if a catalog lookup or the persist fails
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<()> {
        let failed = move |source: Failure| CartError::AddFailed { product_id, source };

        let details = self
            .catalog
            .product(product_id)
            .await
            .map_err(|e| reject(failed(e.into())))?;
        let stock = self
            .catalog
            .stock(product_id)
            .await
            .map_err(|e| reject(failed(e.into())))?;

        let next = match self.cart.get(product_id) {
            Some(line) if i64::from(line.amount) == stock.amount => {
                return Err(reject(CartError::OutOfStock {
                    product_id,
                    available: stock.amount,
                }));
            }
            Some(line) => self
                .cart
                .with_amount(product_id, line.amount.saturating_add(1)),
            None if stock.amount < 1 => return Err(reject(CartError::SoldOut(product_id))),
            None => {
                let line = Product {
                    id: product_id,
                    ..Product::from_details(details, 1)
                };
                self.cart
                    .with_appended(line)
                    .map_err(|e| reject(failed(e.into())))?
            }
        };

        self.commit(next).map_err(|e| reject(failed(e.into())))
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// - `CartError::NotInCart` if the product is not in the cart
    /// - `CartError::RemoveFailed` if the persist fails
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<()> {
        if !self.cart.contains(product_id) {
            return Err(reject(CartError::NotInCart(product_id)));
        }

        let next = self.cart.without(product_id);
        self.commit(next).map_err(|e| {
            reject(CartError::RemoveFailed {
                product_id,
                source: e.into(),
            })
        })
    }

    /// Set the amount of a product in the cart.
    ///
    /// Setting a line that holds exactly 1 unit to 0 is ignored: no error,
    /// nothing persisted or published. Any other amount up to the available
    /// stock is applied as-is, including 0. Requests for a product that is
    /// not in the cart re-persist and re-publish the unchanged cart.
    ///
    /// # Errors
    ///
    /// - `CartError::OutOfStock` if `amount` exceeds the available stock
    /// - `CartError::UpdateFailed` if the stock lookup or the persist fails
    #[instrument(skip(self), fields(product_id = %request.product_id, amount = request.amount))]
    pub async fn update_product_amount(&mut self, request: UpdateProductAmount) -> Result<()> {
        let UpdateProductAmount { product_id, amount } = request;
        let failed = move |source: Failure| CartError::UpdateFailed { product_id, source };

        let stock = self
            .catalog
            .stock(product_id)
            .await
            .map_err(|e| reject(failed(e.into())))?;

        if i64::from(amount) > stock.amount {
            return Err(reject(CartError::OutOfStock {
                product_id,
                available: stock.amount,
            }));
        }

        if amount == 0 && self.cart.get(product_id).is_some_and(|line| line.amount == 1) {
            debug!("Ignoring amount change from 1 to 0");
            return Ok(());
        }

        let next = self.cart.with_amount(product_id, amount);
        self.commit(next).map_err(|e| reject(failed(e.into())))
    }

    /// Persist `next`, then make it the current cart and publish it.
    fn commit(&mut self, next: Cart) -> std::result::Result<(), StorageError> {
        storage::save_json(&self.storage, &self.key, &next)?;

        debug!(
            products = next.len(),
            units = next.total_amount(),
            "Cart committed"
        );
        self.cart = next;
        self.publisher.send_replace(self.cart.clone());
        Ok(())
    }
}

/// Log a rejected operation at a level matching its cause.
fn reject(err: CartError) -> CartError {
    match err.kind() {
        ErrorKind::Failure => warn!(error = %err, "Cart operation failed"),
        ErrorKind::OutOfStock | ErrorKind::NotFound => {
            debug!(error = %err, "Cart operation rejected");
        }
    }
    err
}
