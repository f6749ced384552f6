//! TTL Cleanup Task
//!
//! Background task that periodically drops expired entries from the
//! in-process cache. Reads already ignore expired entries; this only
//! reclaims their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns the cleanup loop. Abort the returned handle on shutdown.
pub fn spawn_cleanup_task(cache: Arc<MemoryCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired().await;
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheKey, KvCache};
    use crate::models::CategoryId;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = Arc::new(MemoryCache::new(100));
        cache
            .set(
                &CacheKey::category_name(CategoryId(1)),
                "Books".to_string(),
                Duration::from_secs(1),
            )
            .await
            .unwrap();
        cache
            .set(
                &CacheKey::category_name(CategoryId(2)),
                "Music".to_string(),
                Duration::from_secs(3600),
            )
            .await
            .unwrap();

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(cache.len().await, 1, "only the long-lived entry remains");
        assert_eq!(
            cache
                .get(&CacheKey::category_name(CategoryId(2)))
                .await
                .unwrap()
                .as_deref(),
            Some("Music")
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = Arc::new(MemoryCache::new(100));
        let handle = spawn_cleanup_task(cache, 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
