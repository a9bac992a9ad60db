pub use config::{DbConnectConfig, DbOptionsConfig, PostgresDbConfig};
pub use connect::{PoolStatus, SqlConnect};
pub use deadpool_postgres::PoolError;
pub use migrator::{Migration, SqlMigrator};
pub use pool::connect_postgres_db;
pub use tokio_postgres::Error as PgError;

pub mod config;
mod connect;
mod migrator;
mod pool;
