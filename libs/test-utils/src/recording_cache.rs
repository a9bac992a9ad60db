use std::{
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use redis_connection::{CacheResult, CacheTrait, MemoryCache};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub sets: usize,
    pub removes: usize,
}

/// In-memory cache that counts traffic and remembers the keys it was asked
/// to store or evict.
pub struct RecordingCache<T> {
    inner: MemoryCache<T>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    sets: AtomicUsize,
    removes: AtomicUsize,
    set_keys: Mutex<Vec<String>>,
    removed_keys: Mutex<Vec<String>>,
}

impl<T> RecordingCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: MemoryCache::default(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
            removes: AtomicUsize::new(0),
            set_keys: Mutex::new(Vec::new()),
            removed_keys: Mutex::new(Vec::new()),
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::SeqCst),
            misses: self.misses.load(Ordering::SeqCst),
            sets: self.sets.load(Ordering::SeqCst),
            removes: self.removes.load(Ordering::SeqCst),
        }
    }

    pub fn set_keys(&self) -> Vec<String> {
        self.set_keys.lock().map(|k| k.clone()).unwrap_or_default()
    }

    pub fn removed_keys(&self) -> Vec<String> {
        self.removed_keys.lock().map(|k| k.clone()).unwrap_or_default()
    }

    /// Reads the underlying cache without touching the counters.
    pub async fn peek(&self, key: &str) -> Option<T> {
        self.inner.try_get(key).await.ok().flatten()
    }
}

impl<T> Default for RecordingCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self { Self::new() }
}

fn record(keys: &Mutex<Vec<String>>, key: &str) {
    if let Ok(mut keys) = keys.lock() {
        keys.push(key.to_string());
    }
}

#[async_trait::async_trait]
impl<T> CacheTrait for RecordingCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Value = T;

    async fn try_get(&self, key: &str) -> CacheResult<Option<T>> {
        let value = self.inner.try_get(key).await?;
        let counter = if value.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    async fn set(&self, key: &str, value: &T) -> CacheResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        record(&self.set_keys, key);
        self.inner.set(key, value).await
    }

    async fn set_with_ttl(
        &self, key: &str, value: &T, ttl: Duration,
    ) -> CacheResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        record(&self.set_keys, key);
        self.inner.set_with_ttl(key, value, ttl).await
    }

    async fn remove(&self, key: &str) -> CacheResult<bool> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        record(&self.removed_keys, key);
        self.inner.remove(key).await
    }

    async fn clear(&self) -> CacheResult<()> { self.inner.clear().await }
}
