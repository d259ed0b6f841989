//! Core domain types for the Folio recommendation engine.
//!
//! The crate models catalogue [`Book`] snapshots, a user's [`FavouriteSet`],
//! and the read/write contracts ([`CatalogReader`], [`FavouriteStore`]) that
//! the recommendation core consumes. Storage is pluggable: tests use
//! [`test_support::MemoryCatalog`], while the `store-sqlite` feature provides
//! [`SqliteCatalog`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod book;
pub mod catalog;
pub mod favourites;
pub mod slug;
pub mod store;
pub mod test_support;

pub use book::{Book, BookError};
pub use catalog::{CatalogError, CatalogReader, FavouriteStore};
pub use favourites::{FavouriteError, FavouriteSet};
pub use slug::slugify;
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteCatalog, SqliteCatalogError};
pub use test_support::MemoryCatalog;
