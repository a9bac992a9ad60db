//! Process-local stores backed by a shared table set. Used when no
//! PostgreSQL backend is configured and by the test suites.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use database_traits::GenericDao;
use events_errors::StoreError;
use events_models::{Category, Event};
use events_queries::EventQuery;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{EventStore, default_categories};

#[derive(Default)]
struct Tables {
    categories: HashMap<Uuid, Category>,
    events: HashMap<Uuid, Event>,
}

impl Tables {
    /// Attaches the current category row, mirroring the SQL join.
    fn joined(&self, event: &Event) -> Event {
        Event {
            category: self.categories.get(&event.category_id).cloned(),
            ..event.clone()
        }
    }

    /// Stored events never carry a joined category.
    fn detached(event: &Event) -> Event {
        Event {
            category: None,
            ..event.clone()
        }
    }
}

/// Shared tables for [`InMemoryEventStore`] and [`InMemoryCategoryStore`].
/// Clones share state.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self { Self::default() }

    /// A database holding the default category set.
    pub fn seeded() -> Self {
        let tables = Tables {
            categories: default_categories()
                .into_iter()
                .map(|c| (c.id, c))
                .collect(),
            events: HashMap::new(),
        };

        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    pub fn events(&self) -> InMemoryEventStore {
        InMemoryEventStore { db: self.clone() }
    }

    pub fn categories(&self) -> InMemoryCategoryStore {
        InMemoryCategoryStore { db: self.clone() }
    }
}

#[derive(Clone)]
pub struct InMemoryEventStore {
    db: MemoryDatabase,
}

impl InMemoryEventStore {
    pub async fn len(&self) -> usize {
        self.db.tables.read().await.events.len()
    }

    pub async fn is_empty(&self) -> bool { self.len().await == 0 }
}

#[async_trait]
impl GenericDao for InMemoryEventStore {
    type Error = StoreError;
    type ID = Uuid;
    type Model = Event;

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn add(&self, event: &Event) -> Result<bool, StoreError> {
        let mut tables = self.db.tables.write().await;
        if tables.events.contains_key(&event.id)
            || !tables.categories.contains_key(&event.category_id)
        {
            debug!("Event insert rejected");
            return Ok(false);
        }

        tables.events.insert(event.id, Tables::detached(event));
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.db.tables.write().await.events.remove(&id).is_some())
    }

    async fn all(&self) -> Result<Vec<Event>, StoreError> {
        self.find_matching(&EventQuery::default()).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        let tables = self.db.tables.read().await;
        Ok(tables.events.get(&id).map(|e| tables.joined(e)))
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> Result<bool, StoreError> {
        let mut tables = self.db.tables.write().await;
        if !tables.events.contains_key(&event.id)
            || !tables.categories.contains_key(&event.category_id)
        {
            debug!("Event update rejected");
            return Ok(false);
        }

        tables.events.insert(event.id, Tables::detached(event));
        Ok(true)
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn count_matching(
        &self, query: &EventQuery,
    ) -> Result<u64, StoreError> {
        let tables = self.db.tables.read().await;
        let joined: Vec<Event> =
            tables.events.values().map(|e| tables.joined(e)).collect();
        Ok(query.count(&joined))
    }

    async fn find_matching(
        &self, query: &EventQuery,
    ) -> Result<Vec<Event>, StoreError> {
        let tables = self.db.tables.read().await;
        let joined = tables.events.values().map(|e| tables.joined(e));
        Ok(query.apply(joined))
    }
}

#[derive(Clone)]
pub struct InMemoryCategoryStore {
    db: MemoryDatabase,
}

#[async_trait]
impl GenericDao for InMemoryCategoryStore {
    type Error = StoreError;
    type ID = Uuid;
    type Model = Category;

    async fn add(&self, category: &Category) -> Result<bool, StoreError> {
        let mut tables = self.db.tables.write().await;
        if tables.categories.contains_key(&category.id) {
            return Ok(false);
        }

        tables.categories.insert(category.id, category.clone());
        Ok(true)
    }

    /// Cascades to the category's events.
    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.db.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Ok(false);
        }

        tables.events.retain(|_, event| event.category_id != id);
        Ok(true)
    }

    async fn all(&self) -> Result<Vec<Category>, StoreError> {
        let tables = self.db.tables.read().await;
        let mut categories: Vec<Category> =
            tables.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn find_by_id(
        &self, id: Uuid,
    ) -> Result<Option<Category>, StoreError> {
        Ok(self.db.tables.read().await.categories.get(&id).cloned())
    }

    async fn update(&self, category: &Category) -> Result<bool, StoreError> {
        let mut tables = self.db.tables.write().await;
        match tables.categories.get_mut(&category.id) {
            Some(existing) => {
                existing.name = category.name.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
