use std::{borrow::Cow, marker::PhantomData, time::Duration};

use async_trait::async_trait;
use deadpool_redis::{Connection, Pool, redis::AsyncCommands};
use serde::{Serialize, de::DeserializeOwned};

use super::r#trait::{CacheError, CacheResult, CacheTrait};

/// Redis cache storing values as JSON strings with `SETEX`.
pub struct RedisCache<T> {
    pool: Pool,
    namespace: Cow<'static, str>,
    default_ttl: Duration,
    __phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for RedisCache<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            namespace: self.namespace.clone(),
            default_ttl: self.default_ttl,
            __phantom: PhantomData,
        }
    }
}

impl<T> RedisCache<T> {
    pub fn new(pool: Pool, default_ttl: Duration) -> Self {
        Self {
            pool,
            namespace: Cow::Borrowed(""),
            default_ttl,
            __phantom: PhantomData,
        }
    }

    /// Prefixes every key, e.g. `"events-api:"`.
    pub fn with_namespace(
        mut self, namespace: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.namespace = namespace.into();
        self
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    async fn connection(&self) -> CacheResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }
}

#[async_trait]
impl<T> CacheTrait for RedisCache<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Value = T;

    async fn try_get(&self, key: &str) -> CacheResult<Option<T>> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn
            .get(self.full_key(key))
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        raw.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| CacheError::DeserializationError(e.to_string()))
        })
        .transpose()
    }

    async fn set(&self, key: &str, value: &T) -> CacheResult<()> {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    async fn set_with_ttl(
        &self, key: &str, value: &T, ttl: Duration,
    ) -> CacheResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;
        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(self.full_key(key), json, ttl.as_secs().max(1))
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.connection().await?;
        let count: u64 = conn
            .del(self.full_key(key))
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        Ok(count > 0)
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.connection().await?;
        conn.exists(self.full_key(key))
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }
}
