//! Configuration Module
//!
//! Loads server and cache settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default lifetime of a cached category name (5 minutes).
pub const DEFAULT_CATEGORY_NAME_TTL: u64 = 300;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the in-process cache can hold
    pub max_cache_entries: usize,
    /// TTL in seconds for cached category names
    pub category_name_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MAX_CACHE_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CATEGORY_NAME_TTL` - Category name TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            max_cache_entries: env_or("MAX_CACHE_ENTRIES", defaults.max_cache_entries),
            category_name_ttl: env_or("CATEGORY_NAME_TTL", defaults.category_name_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    /// Category name TTL as a `Duration`.
    pub fn category_name_ttl(&self) -> Duration {
        Duration::from_secs(self.category_name_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            max_cache_entries: 1000,
            category_name_ttl: DEFAULT_CATEGORY_NAME_TTL,
            cleanup_interval: 1,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.max_cache_entries, 1000);
        assert_eq!(config.category_name_ttl, 300);
        assert_eq!(config.cleanup_interval, 1);
        assert_eq!(config.category_name_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("MAX_CACHE_ENTRIES");
        env::remove_var("CATEGORY_NAME_TTL");
        env::remove_var("CLEANUP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.max_cache_entries, 1000);
        assert_eq!(config.category_name_ttl, 300);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_env_or_ignores_unparsable_values() {
        env::set_var("CATALOG_TEST_BAD_NUMBER", "not-a-number");
        assert_eq!(env_or("CATALOG_TEST_BAD_NUMBER", 42u64), 42);
        env::remove_var("CATALOG_TEST_BAD_NUMBER");
    }
}
