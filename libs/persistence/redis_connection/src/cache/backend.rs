use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};

use super::{
    memory::MemoryCache,
    redis_cache::RedisCache,
    r#trait::{CacheResult, CacheTrait},
};
use crate::config::MemoryConfig;

/// Cache backend selected at startup.
#[derive(Clone)]
pub enum CacheBackend {
    Memory(MemoryConfig),
    Redis {
        pool: deadpool_redis::Pool,
        config: MemoryConfig,
        namespace: String,
    },
}

impl CacheBackend {
    /// Builds a cache for one value type on this backend.
    pub fn cache<T>(&self) -> AnyCache<T>
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    {
        match self {
            Self::Memory(config) => {
                AnyCache::Memory(MemoryCache::new(config.clone()))
            }
            Self::Redis {
                pool,
                config,
                namespace,
            } => AnyCache::Redis(
                RedisCache::new(pool.clone(), config.ttl())
                    .with_namespace(namespace.clone()),
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis { .. } => "redis",
        }
    }
}

#[derive(Clone)]
pub enum AnyCache<T> {
    Memory(MemoryCache<T>),
    Redis(RedisCache<T>),
}

#[async_trait::async_trait]
impl<T> CacheTrait for AnyCache<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Value = T;

    async fn try_get(&self, key: &str) -> CacheResult<Option<T>> {
        match self {
            Self::Memory(cache) => cache.try_get(key).await,
            Self::Redis(cache) => cache.try_get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &T) -> CacheResult<()> {
        match self {
            Self::Memory(cache) => cache.set(key, value).await,
            Self::Redis(cache) => cache.set(key, value).await,
        }
    }

    async fn set_with_ttl(
        &self, key: &str, value: &T, ttl: Duration,
    ) -> CacheResult<()> {
        match self {
            Self::Memory(cache) => cache.set_with_ttl(key, value, ttl).await,
            Self::Redis(cache) => cache.set_with_ttl(key, value, ttl).await,
        }
    }

    async fn remove(&self, key: &str) -> CacheResult<bool> {
        match self {
            Self::Memory(cache) => cache.remove(key).await,
            Self::Redis(cache) => cache.remove(key).await,
        }
    }

    async fn clear(&self) -> CacheResult<()> {
        match self {
            Self::Memory(cache) => cache.clear().await,
            Self::Redis(cache) => cache.clear().await,
        }
    }
}
