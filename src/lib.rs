//! Catalog Cache - categories and products with a cached category name
//!
//! Products read their category's name through a key-value cache
//! (`category:<id>:name`, 5 minute TTL); renaming a category through the
//! catalog invalidates that entry.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use catalog::Catalog;
pub use config::Config;
pub use error::{CatalogError, Result};
pub use tasks::spawn_cleanup_task;
