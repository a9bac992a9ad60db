mod containers;
pub mod fixtures;
mod flaky_store;
mod recording_cache;

pub use containers::{TestPostgresContainer, TestRedisContainer};
pub use flaky_store::{FlakyEventStore, ReadGate};
pub use recording_cache::{CacheStats, RecordingCache};
