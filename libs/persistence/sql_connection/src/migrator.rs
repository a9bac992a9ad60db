use anyhow::Context;
use tracing::{info, instrument};

use crate::SqlConnect;

/// A named SQL script, applied at most once per database.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

impl Migration {
    pub const fn new(name: &'static str, sql: &'static str) -> Self {
        Self { name, sql }
    }
}

/// Applies migrations in order, each inside its own transaction, and
/// records them in `_migrations`.
pub struct SqlMigrator {
    db: SqlConnect,
}

impl SqlMigrator {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    /// Returns the names of the migrations applied by this call.
    #[instrument(skip_all, name = "run-migrations")]
    pub async fn run(
        &self, migrations: &[Migration],
    ) -> anyhow::Result<Vec<&'static str>> {
        self.create_migration_table().await?;

        let mut applied = Vec::new();
        for migration in migrations {
            if self.is_applied(migration.name).await? {
                info!("Migration {} already applied, skipping", migration.name);
                continue;
            }

            let mut client = self.db.get_client().await?;
            let tx = client.transaction().await?;
            tx.batch_execute(migration.sql).await.with_context(|| {
                format!("Failed to run migration {}", migration.name)
            })?;
            tx.execute(
                "INSERT INTO _migrations (name, applied_at) VALUES ($1, NOW())",
                &[&migration.name],
            )
            .await?;
            tx.commit().await?;

            info!("Migration {} completed", migration.name);
            applied.push(migration.name);
        }

        Ok(applied)
    }

    pub async fn list_applied(&self) -> anyhow::Result<Vec<String>> {
        self.create_migration_table().await?;

        let client = self.db.get_client().await?;
        let rows = client
            .query("SELECT name FROM _migrations ORDER BY id", &[])
            .await?;
        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    async fn create_migration_table(&self) -> anyhow::Result<()> {
        let client = self.db.get_client().await?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS _migrations (
                    id SERIAL PRIMARY KEY,
                    name VARCHAR(255) NOT NULL UNIQUE,
                    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )",
            )
            .await
            .context("Failed to create migration table")?;
        Ok(())
    }

    async fn is_applied(&self, name: &str) -> anyhow::Result<bool> {
        let client = self.db.get_client().await?;
        let row = client
            .query_one("SELECT COUNT(*) FROM _migrations WHERE name = $1", &[
                &name,
            ])
            .await?;
        let count: i64 = row.get(0);
        Ok(count > 0)
    }
}
