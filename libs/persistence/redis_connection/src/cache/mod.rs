mod backend;
mod memory;
mod redis_cache;
mod r#trait;

pub use backend::{AnyCache, CacheBackend};
pub use memory::MemoryCache;
pub use r#trait::{CacheError, CacheExt, CacheResult, CacheTrait};
pub use redis_cache::RedisCache;
