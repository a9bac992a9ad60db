use deadpool_redis::{Config, CreatePoolError, Pool, Runtime};
pub use deadpool_redis::{PoolError, redis::RedisError};
use tracing::{info, instrument};
use url::Url;

pub mod cache;
pub mod config;
pub mod key;
pub mod macros;

pub use cache::{
    AnyCache, CacheBackend, CacheError, CacheExt, CacheResult, CacheTrait,
    MemoryCache, RedisCache,
};

#[derive(Debug, thiserror::Error)]
pub enum RedisConnectError {
    #[error("Invalid Redis URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Failed to create Redis pool: {0}")]
    Pool(#[from] CreatePoolError),
}

pub fn redis_url<C>(config: &C) -> Result<Url, url::ParseError>
where
    C: config::DbConnectConfig,
{
    let auth = match config.password() {
        Some(password) => format!(":{password}@"),
        None => String::new(),
    };
    Url::parse(&format!(
        "redis://{auth}{}:{}/{}",
        config.host(),
        config.port(),
        config.db()
    ))
}

#[instrument(skip_all, name = "connect-redis")]
pub async fn connect_redis_db<C>(config: &C) -> Result<Pool, RedisConnectError>
where
    C: config::DbConnectConfig,
{
    let url = redis_url(config)?;

    info!(
        redis.host = config.host(),
        redis.port = config.port(),
        redis.db = config.db(),
        redis.connect = true
    );

    let cfg = Config {
        url: Some(url.to_string()),
        pool: Some(deadpool_redis::PoolConfig::default()),
        connection: None,
    };

    let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
    Ok(pool)
}
