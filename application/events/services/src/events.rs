use std::sync::Arc;

use events_cache_keys::{EventCacheKey, EventListCacheKey};
use events_dao::EventStore;
use events_errors::EventError;
use events_models::{CreateEventRequest, UpdateEventRequest};
use events_queries::{GetEventsQuery, PageRequest, QueryFilterBuilder};
use events_responses::{EventCreatedResponse, EventResponse, PagingEventResult};
use redis_connection::{CacheExt, key::CacheKey};
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::{EventCache, EventListCache};

/// Event reads and writes behind a read-through cache.
///
/// `event:{id}` holds single views (including cached misses) and
/// `events:list` the full listing. Store and cache failures never escape:
/// callers see `None`, `false` or an empty collection. Only validation
/// errors and id mismatches are returned as `Err`.
#[derive(Clone)]
pub struct EventCacheService {
    store: Arc<dyn EventStore>,
    events: EventCache,
    lists: EventListCache,
}

impl EventCacheService {
    pub fn new(
        store: Arc<dyn EventStore>, events: EventCache, lists: EventListCache,
    ) -> Self {
        Self {
            store,
            events,
            lists,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_event(
        &self, request: CreateEventRequest,
    ) -> Result<Option<EventCreatedResponse>, EventError> {
        collapse(self.try_create_event(request).await)
    }

    async fn try_create_event(
        &self, request: CreateEventRequest,
    ) -> Result<Option<EventCreatedResponse>, EventError> {
        request.validate()?;

        let event = request.into_event();
        let id = event.id;
        if !self.store.add(&event).await? {
            return Err(EventError::persistence("event", id));
        }

        let stored = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(EventError::consistency("event", id))?;

        let key = EventCacheKey.get_key_with_args((&id,));
        if let Err(e) = self
            .events
            .set(&key, &Some(EventResponse::from(&stored)))
            .await
        {
            warn!(cache.key = %key, error = %e, "Failed to cache created event");
        }
        self.invalidate_list().await;

        debug!("Created event {}", id);
        Ok(Some(EventCreatedResponse::from(&stored)))
    }

    /// Removes the event and its `event:{id}` entry. `events:list` is left
    /// as is.
    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: Uuid) -> bool {
        match self.store.delete(id).await {
            Ok(true) => {
                let key = EventCacheKey.get_key_with_args((&id,));
                if let Err(e) = self.events.remove(&key).await {
                    warn!(cache.key = %key, error = %e, "Failed to evict deleted event");
                }
                true
            }
            Ok(false) => {
                debug!("Event {} not found for delete", id);
                false
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete event {}", id);
                false
            }
        }
    }

    /// Every event, ascending by start date.
    #[instrument(skip(self))]
    pub async fn get_all_events(&self) -> Vec<EventResponse> {
        let key = EventListCacheKey.get_key();
        let result = self
            .lists
            .get_or_create(&key, move || async move {
                let mut events: Vec<EventResponse> = self
                    .store
                    .all()
                    .await?
                    .iter()
                    .map(EventResponse::from)
                    .collect();
                events.sort_by(|a, b| a.event_start_date.cmp(&b.event_start_date));
                Ok::<_, EventError>(events)
            })
            .await;

        result.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load events");
            Vec::new()
        })
    }

    /// A lookup that finds nothing is cached as `None` as well.
    #[instrument(skip(self))]
    pub async fn get_event_by_id(&self, id: Uuid) -> Option<EventResponse> {
        let key = EventCacheKey.get_key_with_args((&id,));
        let result = self
            .events
            .get_or_create(&key, move || async move {
                let event = self.store.find_by_id(id).await?;
                if event.is_none() {
                    debug!("Event {} not found", id);
                }
                Ok::<_, EventError>(event.as_ref().map(EventResponse::from))
            })
            .await;

        result.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load event {}", id);
            None
        })
    }

    /// Applies the `Some` fields of `request` to the stored event.
    ///
    /// The returned view is built from the updated entity, so a changed
    /// category id comes back without a category name.
    #[instrument(skip(self))]
    pub async fn update_event(
        &self, id: Uuid, request: UpdateEventRequest,
    ) -> Result<Option<EventResponse>, EventError> {
        collapse(self.try_update_event(id, request).await)
    }

    async fn try_update_event(
        &self, id: Uuid, request: UpdateEventRequest,
    ) -> Result<Option<EventResponse>, EventError> {
        let Some(mut event) = self.store.find_by_id(id).await?
        else {
            debug!("Event {} not found for update", id);
            return Ok(None);
        };

        if let Some(body_id) = request.body_id() {
            if body_id != id {
                return Err(EventError::IdMismatch {
                    route_id: id,
                    body_id,
                });
            }
        }
        request.validate()?;

        request.apply_to(&mut event);
        if !self.store.update(&event).await? {
            return Err(EventError::persistence("event", id));
        }

        let key = EventCacheKey.get_key_with_args((&id,));
        if let Err(e) = self.events.remove(&key).await {
            warn!(cache.key = %key, error = %e, "Failed to evict updated event");
        }

        Ok(Some(EventResponse::from(&event)))
    }

    /// One filtered page. Every returned view is also written to its
    /// `event:{id}` entry.
    #[instrument(skip(self))]
    pub async fn get_events_paginated(
        &self, query: GetEventsQuery,
    ) -> PagingEventResult {
        let page = PageRequest::new(query.page_number, query.page_size);

        match self.try_get_events_paginated(&query, page).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Failed to load events page");
                PagingEventResult::empty(page.page_number, page.page_size)
            }
        }
    }

    async fn try_get_events_paginated(
        &self, query: &GetEventsQuery, page: PageRequest,
    ) -> Result<PagingEventResult, EventError> {
        let event_query = QueryFilterBuilder::for_now().build(query, page);

        let total = self.store.count_matching(&event_query).await?;
        let events: Vec<EventResponse> = self
            .store
            .find_matching(&event_query)
            .await?
            .iter()
            .map(EventResponse::from)
            .collect();

        for view in &events {
            let key = EventCacheKey.get_key_with_args((&view.id,));
            if let Err(e) = self.events.set(&key, &Some(view.clone())).await {
                warn!(cache.key = %key, error = %e, "Failed to warm event cache");
            }
        }

        Ok(PagingEventResult::new(
            events,
            page.page_number,
            page.page_size,
            total,
        ))
    }

    async fn invalidate_list(&self) {
        let key = EventListCacheKey.get_key();
        if let Err(e) = self.lists.remove(&key).await {
            warn!(cache.key = %key, error = %e, "Failed to invalidate event list");
        }
    }
}

/// Passes surfaced errors through and turns the rest into `Ok(None)`.
pub(crate) fn collapse<T>(
    result: Result<Option<T>, EventError>,
) -> Result<Option<T>, EventError> {
    match result {
        Err(e) if e.is_surfaced() => Err(e),
        Err(e @ EventError::Consistency { .. }) => {
            error!(error = %e, "Store consistency violation");
            Ok(None)
        }
        Err(e) => {
            warn!(error = %e, "Operation failed");
            Ok(None)
        }
        ok => ok,
    }
}
