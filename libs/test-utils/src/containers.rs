use std::time::Duration;

use anyhow::{Context, Result};
use deadpool_redis::{Config as RedisConfig, Pool as RedisPool, Runtime};
use events_dao::MIGRATIONS;
use sql_connection::{
    PostgresDbConfig, SqlConnect, SqlMigrator, connect_postgres_db,
};
use testcontainers_modules::{
    postgres::Postgres,
    redis::Redis,
    testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner},
};

/// PostgreSQL container with the event schema migrated and categories
/// seeded.
pub struct TestPostgresContainer {
    pub db: SqlConnect,
    pub connection_string: String,
    _container: ContainerAsync<Postgres>,
}

impl TestPostgresContainer {
    pub async fn new() -> Result<Self> {
        let container = Postgres::default()
            .with_env_var("POSTGRES_DB", "testdb")
            .with_env_var("POSTGRES_USER", "testuser")
            .with_env_var("POSTGRES_PASSWORD", "testpass")
            .start()
            .await
            .context("Failed to start PostgreSQL container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let connection_string =
            format!("postgresql://testuser:testpass@{host}:{port}/testdb");

        let db = Self::connect(&connection_string).await?;
        SqlMigrator::new(db.clone())
            .run(&MIGRATIONS)
            .await
            .context("Failed to apply migrations")?;

        Ok(Self {
            db,
            connection_string,
            _container: container,
        })
    }

    async fn connect(connection_string: &str) -> Result<SqlConnect> {
        let config = PostgresDbConfig {
            uri: connection_string.to_string(),
            max_conn: Some(10),
            min_conn: None,
        };
        let db = connect_postgres_db(&config).await?;

        let mut attempts = 0;
        loop {
            let ready = match db.get_client().await {
                Ok(client) => client.query_one("SELECT 1", &[]).await.is_ok(),
                Err(_) => false,
            };
            if ready {
                return Ok(db);
            }
            if attempts >= 20 {
                anyhow::bail!("PostgreSQL not ready after {attempts} attempts");
            }
            attempts += 1;
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    }

    pub async fn execute_sql(&self, sql: &str) -> Result<()> {
        let client = self.db.get_client().await?;
        client
            .batch_execute(sql)
            .await
            .context("Failed to execute SQL")?;
        Ok(())
    }
}

/// Redis container. Tests namespace their keys with `test_prefix`.
pub struct TestRedisContainer {
    pub pool: RedisPool,
    pub connection_string: String,
    pub test_prefix: String,
    _container: ContainerAsync<Redis>,
}

impl TestRedisContainer {
    pub async fn new() -> Result<Self> {
        let container = Redis::default()
            .start()
            .await
            .context("Failed to start Redis container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(6379).await?;
        let connection_string = format!("redis://{host}:{port}");
        let test_prefix = format!("test_{}:", uuid::Uuid::now_v7().simple());

        let pool = Self::create_pool(&connection_string).await?;

        Ok(Self {
            pool,
            connection_string,
            test_prefix,
            _container: container,
        })
    }

    async fn create_pool(connection_string: &str) -> Result<RedisPool> {
        let mut cfg = RedisConfig::from_url(connection_string);
        cfg.pool = Some(deadpool_redis::PoolConfig::new(10));
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create Redis pool")?;

        let mut attempts = 0;
        loop {
            let ready = match pool.get().await {
                Ok(mut conn) => deadpool_redis::redis::cmd("PING")
                    .query_async::<()>(&mut conn)
                    .await
                    .is_ok(),
                Err(_) => false,
            };
            if ready {
                return Ok(pool);
            }
            if attempts >= 20 {
                anyhow::bail!("Redis not ready after {attempts} attempts");
            }
            attempts += 1;
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    }

    pub async fn get_connection(&self) -> Result<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }
}
