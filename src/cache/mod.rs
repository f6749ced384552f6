//! Cache Module
//!
//! The key-value cache the catalog reads through. `KvCache` is the seam;
//! `MemoryCache` is the in-process implementation with TTL expiry and LRU
//! eviction.

mod entry;
mod key;
mod lru;
mod memory;
mod stats;
mod store;


use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use lru::LruTracker;
pub use memory::MemoryCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Shared key-value cache with per-entry expiration.
///
/// Each call is atomic for its key. An `Err` means the backend failed; a
/// miss is `Ok(None)`.
#[async_trait]
pub trait KvCache: Send + Sync + std::fmt::Debug {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>>;

    /// Stores `value` under `key`, expiring `ttl` from now.
    async fn set(&self, key: &CacheKey, value: String, ttl: Duration) -> Result<()>;

    /// Removes `key`. Succeeds when the key is absent.
    async fn delete(&self, key: &CacheKey) -> Result<()>;
}
