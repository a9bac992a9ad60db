use std::{future::Future, time::Duration};

use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Operation not supported: {0}")]
    Unsupported(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store of computed values, independent of the backend.
#[async_trait::async_trait]
pub trait CacheTrait: Send + Sync {
    type Value: Clone + Send + Sync + 'static;

    /// Returns the cached value, or `None` on a miss.
    async fn try_get(&self, key: &str) -> CacheResult<Option<Self::Value>>;

    /// Stores a value with the backend's default TTL.
    async fn set(&self, key: &str, value: &Self::Value) -> CacheResult<()>;

    async fn set_with_ttl(
        &self, key: &str, value: &Self::Value, ttl: Duration,
    ) -> CacheResult<()>;

    /// Removes a key. Returns whether it was present.
    async fn remove(&self, key: &str) -> CacheResult<bool>;

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        Ok(self.try_get(key).await?.is_some())
    }

    async fn clear(&self) -> CacheResult<()> {
        Err(CacheError::Unsupported(
            "Clear operation not supported by this cache implementation"
                .to_string(),
        ))
    }
}

/// Read-through helpers available on every [`CacheTrait`], including
/// `dyn CacheTrait` objects.
pub trait CacheExt: CacheTrait {
    /// Returns the cached value for `key`, or runs `factory`, stores its
    /// result with the default TTL and returns it.
    ///
    /// A cache read error is treated as a miss and a failed store is only
    /// logged. Factory errors are returned untouched and nothing is cached.
    fn get_or_create<'a, F, Fut, E>(
        &'a self, key: &'a str, factory: F,
    ) -> impl Future<Output = Result<Self::Value, E>> + Send + 'a
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<Self::Value, E>> + Send + 'a,
        E: Send + 'a,
    {
        self.get_or_create_with_ttl(key, None, factory)
    }

    fn get_or_create_with_ttl<'a, F, Fut, E>(
        &'a self, key: &'a str, ttl: Option<Duration>, factory: F,
    ) -> impl Future<Output = Result<Self::Value, E>> + Send + 'a
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<Self::Value, E>> + Send + 'a,
        E: Send + 'a,
    {
        async move {
            match self.try_get(key).await {
                Ok(Some(value)) => {
                    debug!(cache.key = key, "Cache hit");
                    return Ok(value);
                }
                Ok(None) => debug!(cache.key = key, "Cache miss"),
                Err(e) => {
                    warn!(cache.key = key, error = %e, "Cache read failed, treating as miss")
                }
            }

            let value = factory().await?;

            let stored = match ttl {
                Some(ttl) => self.set_with_ttl(key, &value, ttl).await,
                None => self.set(key, &value).await,
            };
            if let Err(e) = stored {
                warn!(cache.key = key, error = %e, "Failed to populate cache");
            }

            Ok(value)
        }
    }
}

impl<C: CacheTrait + ?Sized> CacheExt for C {}
