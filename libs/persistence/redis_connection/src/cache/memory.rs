use std::{
    marker::PhantomData,
    time::{Duration, Instant},
};

use moka::{Expiry, future::Cache};

use super::r#trait::{CacheResult, CacheTrait};
use crate::config::MemoryConfig;

#[derive(Clone)]
struct Entry<T> {
    value: T,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct EntryTtl<T>(PhantomData<fn() -> T>);

impl<T> Expiry<String, Entry<T>> for EntryTtl<T> {
    fn expire_after_create(
        &self, _key: &String, value: &Entry<T>, _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self, _key: &String, value: &Entry<T>, _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process cache backed by moka. Values are stored as-is, without
/// serialization.
#[derive(Clone)]
pub struct MemoryCache<T> {
    cache: Cache<String, Entry<T>>,
    config: MemoryConfig,
}

impl<T> MemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(config: MemoryConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .expire_after(EntryTtl(PhantomData))
            .build();

        Self { cache, config }
    }

    pub fn config(&self) -> &MemoryConfig { &self.config }

    /// Number of live entries, after pending maintenance has run.
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    pub async fn is_empty(&self) -> bool { self.len().await == 0 }
}

impl<T> Default for MemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self { Self::new(MemoryConfig::default()) }
}

#[async_trait::async_trait]
impl<T> CacheTrait for MemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Value = T;

    async fn try_get(&self, key: &str) -> CacheResult<Option<T>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &T) -> CacheResult<()> {
        self.set_with_ttl(key, value, self.config.ttl()).await
    }

    async fn set_with_ttl(
        &self, key: &str, value: &T, ttl: Duration,
    ) -> CacheResult<()> {
        let entry = Entry {
            value: value.clone(),
            ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> CacheResult<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn clear(&self) -> CacheResult<()> {
        self.cache.invalidate_all();
        Ok(())
    }
}
