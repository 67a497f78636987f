//! Core types for RocketShoes.
//!
//! This module provides type-safe wrappers for catalog and cart concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{Cart, DuplicateProduct};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{Product, ProductDetails, Stock};
