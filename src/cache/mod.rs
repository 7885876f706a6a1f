//! Named in-process caches with optional hit/miss statistics.
//!
//! The service keeps a single `vets` cache: the vet list is read on every
//! dashboard render and changes only through the seed data.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::models::vet::Vet;

/// Name of the cache holding the veterinarian list.
pub const VETS_CACHE: &str = "vets";

/// Key under which the full vet list is stored.
pub const ALL_VETS: &str = "all";

/// Settings for one named cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub name: &'static str,
    pub statistics_enabled: bool,
}

impl CacheSettings {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            statistics_enabled: false,
        }
    }

    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.statistics_enabled = enabled;
        self
    }
}

/// Snapshot of a cache's usage counters.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CacheStatistics {
    pub name: String,
    pub statistics_enabled: bool,
    pub hits: u64,
    pub misses: u64,
    pub entry_count: u64,
}

impl CacheStatistics {
    /// Fraction of lookups served from the cache (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Read-through cache keyed by `K`.
#[derive(Debug)]
pub struct Cache<K, V> {
    settings: CacheSettings,
    entries: RwLock<HashMap<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            settings,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let found = self.entries.read().await.get(key).cloned();
        match found {
            Some(_) => self.record(&self.hits),
            None => self.record(&self.misses),
        }
        found
    }

    pub async fn put(&self, key: K, value: V) {
        self.entries.write().await.insert(key, value);
    }

    /// Return the cached value, or load, store and return it.
    ///
    /// A failed load leaves the cache untouched.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            return Ok(value);
        }
        let value = load().await?;
        self.put(key, value.clone()).await;
        Ok(value)
    }

    pub async fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            name: self.settings.name.to_string(),
            statistics_enabled: self.settings.statistics_enabled,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self.entries.read().await.len() as u64,
        }
    }

    fn record(&self, counter: &AtomicU64) {
        if self.settings.statistics_enabled {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Cache of the full veterinarian list.
pub type VetCache = Cache<&'static str, Vec<Vet>>;

/// Settings for the `vets` cache derived from configuration.
pub fn vets_cache_settings(config: &AppConfig) -> CacheSettings {
    CacheSettings::new(VETS_CACHE).with_statistics(config.cache_statistics_enabled)
}

/// Build the `vets` cache.
pub fn vets_cache(config: &AppConfig) -> VetCache {
    let settings = vets_cache_settings(config);
    tracing::debug!(
        cache = settings.name,
        statistics = settings.statistics_enabled,
        "Creating cache"
    );
    Cache::new(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(statistics: bool) -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/petclinic".to_string(),
            database_max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            cache_statistics_enabled: statistics,
            max_upload_bytes: 1024,
        }
    }

    #[test]
    fn vets_cache_has_statistics_enabled() {
        let cache = vets_cache(&config(true));
        assert_eq!(cache.settings().name, "vets");
        assert!(cache.settings().statistics_enabled);
    }

    #[test]
    fn statistics_follow_configuration() {
        let settings = vets_cache_settings(&config(false));
        assert_eq!(settings, CacheSettings::new("vets"));
    }

    #[tokio::test]
    async fn read_through_counts_miss_then_hit() {
        let cache: Cache<&'static str, u32> =
            Cache::new(CacheSettings::new("numbers").with_statistics(true));

        let first: Result<u32, ()> = cache.get_or_try_insert_with("k", || async { Ok(7) }).await;
        let second: Result<u32, ()> = cache.get_or_try_insert_with("k", || async { Ok(99) }).await;

        assert_eq!(first, Ok(7));
        assert_eq!(second, Ok(7));
        let stats = cache.statistics().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entry_count, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn failed_load_is_not_cached() {
        let cache: Cache<&'static str, u32> =
            Cache::new(CacheSettings::new("numbers").with_statistics(true));

        let failed: Result<u32, &str> = cache
            .get_or_try_insert_with("k", || async { Err("database down") })
            .await;
        assert_eq!(failed, Err("database down"));
        assert_eq!(cache.statistics().await.entry_count, 0);

        let loaded: Result<u32, &str> = cache.get_or_try_insert_with("k", || async { Ok(3) }).await;
        assert_eq!(loaded, Ok(3));
    }

    #[tokio::test]
    async fn disabled_statistics_stay_at_zero() {
        let cache: Cache<&'static str, u32> = Cache::new(CacheSettings::new("quiet"));
        cache.put("k", 1).await;
        assert_eq!(cache.get(&"k").await, Some(1));
        assert_eq!(cache.get(&"missing").await, None);

        let stats = cache.statistics().await;
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }
}
