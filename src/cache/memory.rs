//! In-process `KvCache` backed by a mutex-guarded `CacheStore`.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheKey, CacheStats, CacheStore, KvCache};
use crate::error::Result;

#[derive(Debug)]
pub struct MemoryCache {
    store: Mutex<CacheStore>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Mutex::new(CacheStore::new(max_entries)),
        }
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    pub async fn ttl_remaining(&self, key: &CacheKey) -> Option<Duration> {
        self.store.lock().await.ttl_remaining(&key.to_string())
    }

    pub async fn cleanup_expired(&self) -> usize {
        self.store.lock().await.cleanup_expired()
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

#[async_trait]
impl KvCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>> {
        Ok(self.store.lock().await.get(&key.to_string()))
    }

    async fn set(&self, key: &CacheKey, value: String, ttl: Duration) -> Result<()> {
        self.store.lock().await.set(key.to_string(), value, ttl)
    }

    async fn delete(&self, key: &CacheKey) -> Result<()> {
        let removed = self.store.lock().await.delete(&key.to_string());
        debug!(key = %key, removed, "cache delete");
        Ok(())
    }
}
