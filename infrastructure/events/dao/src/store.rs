use async_trait::async_trait;
use database_traits::GenericDao;
use events_errors::StoreError;
use events_models::{Category, Event};
use events_queries::EventQuery;
use uuid::Uuid;

/// Event persistence: entity CRUD plus execution of built queries.
#[async_trait]
pub trait EventStore:
    GenericDao<Model = Event, ID = Uuid, Error = StoreError>
{
    /// Number of events matching the query's predicates. The window is
    /// ignored.
    async fn count_matching(&self, query: &EventQuery)
    -> Result<u64, StoreError>;

    /// Matching events, sorted and windowed as the query asks.
    async fn find_matching(
        &self, query: &EventQuery,
    ) -> Result<Vec<Event>, StoreError>;
}

pub trait CategoryStore:
    GenericDao<Model = Category, ID = Uuid, Error = StoreError>
{
}

impl<T> CategoryStore for T where
    T: GenericDao<Model = Category, ID = Uuid, Error = StoreError>
{
}
