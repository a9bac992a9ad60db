use async_trait::async_trait;
use dao_utils::is_constraint_violation;
use database_traits::GenericDao;
use events_errors::StoreError;
use events_models::{Category, Event, EventStatus};
use events_queries::EventQuery;
use sql_connection::SqlConnect;
use tokio_postgres::Row;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::{
    EventStore,
    sql::{self, SELECT_EVENT},
};

#[derive(Clone)]
pub struct EventDao {
    db: SqlConnect,
}

impl EventDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    pub fn db(&self) -> &SqlConnect { &self.db }

    fn map_row(row: &Row) -> Result<Event, StoreError> {
        let id: Uuid = row.get(0);
        let status: EventStatus = row.try_get(7).map_err(|e| {
            StoreError::CorruptRow(format!("event {id} status: {e}"))
        })?;
        let category_id: Option<Uuid> = row.get(9);
        let category_name: Option<String> = row.get(10);
        let category = match (category_id, category_name) {
            (Some(id), Some(name)) => Some(Category { id, name }),
            _ => None,
        };

        Ok(Event {
            id,
            name: row.get(1),
            description: row.get(2),
            image_id: row.get(3),
            category_id: row.get(4),
            category,
            start_date: row.get(5),
            end_date: row.get(6),
            status,
            location_id: row.get(8),
        })
    }
}

#[async_trait]
impl GenericDao for EventDao {
    type Error = StoreError;
    type ID = Uuid;
    type Model = Event;

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn add(&self, event: &Event) -> Result<bool, StoreError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "INSERT INTO events (id, name, description, image_id, \
                 category_id, start_date, end_date, status, location_id) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .await?;

        let result = client
            .execute(&stmt, &[
                &event.id,
                &event.name,
                &event.description,
                &event.image_id,
                &event.category_id,
                &event.start_date,
                &event.end_date,
                &event.status,
                &event.location_id,
            ])
            .await;

        match result {
            Ok(rows) => Ok(rows == 1),
            Err(e) if is_constraint_violation(&e) => {
                warn!("Event insert rejected: {}", e);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let client = self.db.get_client().await?;
        let stmt = client.prepare("DELETE FROM events WHERE id = $1").await?;
        let rows = client.execute(&stmt, &[&id]).await?;
        Ok(rows > 0)
    }

    #[instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Event>, StoreError> {
        let (query, filter) = sql::select_matching(&EventQuery::default());
        let client = self.db.get_client().await?;
        let stmt = client.prepare(&query).await?;
        let rows = client.query(&stmt, &filter.param_refs()).await?;
        rows.iter().map(Self::map_row).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(&format!("{SELECT_EVENT} WHERE e.id = $1"))
            .await?;
        let row = client.query_opt(&stmt, &[&id]).await?;
        row.as_ref().map(Self::map_row).transpose()
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> Result<bool, StoreError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "UPDATE events SET name = $2, description = $3, image_id = \
                 $4, category_id = $5, start_date = $6, end_date = $7, \
                 status = $8, location_id = $9 WHERE id = $1",
            )
            .await?;

        let result = client
            .execute(&stmt, &[
                &event.id,
                &event.name,
                &event.description,
                &event.image_id,
                &event.category_id,
                &event.start_date,
                &event.end_date,
                &event.status,
                &event.location_id,
            ])
            .await;

        match result {
            Ok(rows) => Ok(rows == 1),
            Err(e) if is_constraint_violation(&e) => {
                warn!("Event update rejected: {}", e);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl EventStore for EventDao {
    #[instrument(skip(self))]
    async fn count_matching(
        &self, query: &EventQuery,
    ) -> Result<u64, StoreError> {
        let (query, filter) = sql::count_matching(query);
        let client = self.db.get_client().await?;
        let stmt = client.prepare(&query).await?;
        let row = client.query_one(&stmt, &filter.param_refs()).await?;
        let count: i64 = row.get(0);
        Ok(u64::try_from(count).unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn find_matching(
        &self, query: &EventQuery,
    ) -> Result<Vec<Event>, StoreError> {
        let (query, filter) = sql::select_matching(query);
        let client = self.db.get_client().await?;
        let stmt = client.prepare(&query).await?;
        let rows = client.query(&stmt, &filter.param_refs()).await?;
        rows.iter().map(Self::map_row).collect()
    }
}
