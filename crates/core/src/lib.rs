//! RocketShoes Core - Shared types library.
//!
//! This crate provides the types used across the RocketShoes components:
//! - `cart` - Cart store, catalog client and persistent storage
//! - `cli` - Command-line front end for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus the
//!   product, stock and cart models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
