//! Persistent catalogue implementations.
//!
//! The recommendation core depends only on the [`CatalogReader`] and
//! [`FavouriteStore`] traits. This module provides a SQLite-backed
//! implementation behind the `store-sqlite` feature.
//!
//! [`CatalogReader`]: crate::CatalogReader
//! [`FavouriteStore`]: crate::FavouriteStore

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{CATALOG_SCHEMA, SqliteCatalog, SqliteCatalogError};
