//! Catalog store for intake-rs
//!
//! This crate provides the typed catalog of offerable items and the store
//! abstraction the matcher reads from. Items are immutable once listed; the
//! store itself may be refreshed wholesale.

pub mod item;
pub mod store;

pub use item::{CatalogItem, Category, Condition};
pub use store::{CatalogStore, InMemoryCatalog};
