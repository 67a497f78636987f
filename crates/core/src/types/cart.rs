//! The cart: an ordered list of products, unique by ID.
//!
//! `Cart` is immutable from the outside. Every mutation helper returns a new
//! cart so the caller can persist the new snapshot before committing it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Price, Product, ProductId};

/// A cart snapshot contained the same product twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("duplicate product {0} in cart")]
pub struct DuplicateProduct(pub ProductId);

/// Ordered cart lines, serialized as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart {
    lines: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Find the line for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.lines.iter().find(|line| line.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.lines.iter()
    }

    /// Sum of all line amounts.
    #[must_use]
    pub fn total_amount(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.amount)).sum()
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(Product::subtotal).sum()
    }

    /// A copy of this cart with `product` appended.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateProduct` if the product is already in the cart.
    pub fn with_appended(&self, product: Product) -> Result<Self, DuplicateProduct> {
        if self.contains(product.id) {
            return Err(DuplicateProduct(product.id));
        }
        let mut lines = self.lines.clone();
        lines.push(product);
        Ok(Self { lines })
    }

    /// A copy of this cart with the line for `id` set to `amount`.
    ///
    /// Lines for other products are untouched; if `id` is not in the cart
    /// the copy equals the original.
    #[must_use]
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                if line.id == id {
                    Product {
                        amount,
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect();
        Self { lines }
    }

    /// A copy of this cart without the line for `id`.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        let lines = self
            .lines
            .iter()
            .filter(|line| line.id != id)
            .cloned()
            .collect();
        Self { lines }
    }
}

impl TryFrom<Vec<Product>> for Cart {
    type Error = DuplicateProduct;

    fn try_from(lines: Vec<Product>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if !seen.insert(line.id) {
                return Err(DuplicateProduct(line.id));
            }
        }
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
