use async_trait::async_trait;
use dao_utils::is_constraint_violation;
use database_traits::GenericDao;
use events_errors::StoreError;
use events_models::Category;
use sql_connection::SqlConnect;
use tracing::{instrument, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct CategoryDao {
    db: SqlConnect,
}

impl CategoryDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }
}

#[async_trait]
impl GenericDao for CategoryDao {
    type Error = StoreError;
    type ID = Uuid;
    type Model = Category;

    #[instrument(skip(self))]
    async fn add(&self, category: &Category) -> Result<bool, StoreError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare("INSERT INTO categories (id, name) VALUES ($1, $2)")
            .await?;

        match client.execute(&stmt, &[&category.id, &category.name]).await {
            Ok(rows) => Ok(rows == 1),
            Err(e) if is_constraint_violation(&e) => {
                warn!("Category insert rejected: {}", e);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Events in the category are removed with it.
    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let client = self.db.get_client().await?;
        let stmt =
            client.prepare("DELETE FROM categories WHERE id = $1").await?;
        let rows = client.execute(&stmt, &[&id]).await?;
        Ok(rows > 0)
    }

    #[instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Category>, StoreError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare("SELECT id, name FROM categories ORDER BY name, id")
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        Ok(rows
            .iter()
            .map(|row| Category {
                id: row.get(0),
                name: row.get(1),
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Uuid,
    ) -> Result<Option<Category>, StoreError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare("SELECT id, name FROM categories WHERE id = $1")
            .await?;
        let row = client.query_opt(&stmt, &[&id]).await?;

        Ok(row.map(|row| Category {
            id: row.get(0),
            name: row.get(1),
        }))
    }

    #[instrument(skip(self))]
    async fn update(&self, category: &Category) -> Result<bool, StoreError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare("UPDATE categories SET name = $2 WHERE id = $1")
            .await?;
        let rows = client.execute(&stmt, &[&category.id, &category.name]).await?;
        Ok(rows == 1)
    }
}
