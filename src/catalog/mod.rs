//! Catalog Module
//!
//! Entity logic for categories and products. `Catalog` owns handles to the
//! relational store and the key-value cache and keeps the cached category
//! names consistent with the store:
//!
//! - `category_name` reads through the cache, populating
//!   `category:<id>:name` on a miss with the configured TTL.
//! - `update_category` deletes that key after a successful write that
//!   changed the name.
//!
//! Cache failures never fail an operation; the catalog falls back to the
//! store and logs a warning. A rename written straight to the store
//! bypasses invalidation and may be served stale until the entry expires.

mod category;
mod product;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::cache::{CacheKey, KvCache};
use crate::config::DEFAULT_CATEGORY_NAME_TTL;
use crate::store::CatalogStore;

#[derive(Debug, Clone)]
pub struct Catalog {
    store: Arc<dyn CatalogStore>,
    cache: Arc<dyn KvCache>,
    name_ttl: Duration,
}

impl Catalog {
    /// Creates a catalog caching category names for 5 minutes.
    pub fn new(store: Arc<dyn CatalogStore>, cache: Arc<dyn KvCache>) -> Self {
        Self {
            store,
            cache,
            name_ttl: Duration::from_secs(DEFAULT_CATEGORY_NAME_TTL),
        }
    }

    pub fn with_name_ttl(mut self, ttl: Duration) -> Self {
        self.name_ttl = ttl;
        self
    }

    pub fn name_ttl(&self) -> Duration {
        self.name_ttl
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<dyn KvCache> {
        &self.cache
    }

    /// Best-effort delete of a cached category name.
    async fn invalidate(&self, key: &CacheKey) {
        if let Err(err) = self.cache.delete(key).await {
            warn!(key = %key, error = %err, "cache invalidation failed");
        }
    }
}
