//! RocketShoes cart library.
//!
//! A stock-checked shopping cart for the storefront. The cart lives in
//! memory, is mirrored wholesale into a local key-value store after every
//! change, and every quantity increase is validated against the remote
//! stock service first.
//!
//! # Modules
//!
//! - [`store`] - The cart store and its three operations
//! - [`catalog`] - Product details and stock lookups over HTTP
//! - [`storage`] - Persistent key-value backends for the cart snapshot
//! - [`config`] - Environment-based configuration
//! - [`error`] - Operation errors and shopper-facing notices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, CatalogError, HttpCatalog};
pub use config::{CartConfig, CatalogConfig, ConfigError, DEFAULT_STORAGE_KEY};
pub use error::{CartError, ErrorKind, Failure};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CartStore, UpdateProductAmount};
