use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use events_services::{CategoryService, EventCacheService};

pub mod auth;
pub mod categories;
pub mod events;
pub mod status;

/// Shared handler state.
#[derive(Clone)]
pub struct EventServices {
    pub events: EventCacheService,
    pub categories: CategoryService,
    /// When set, mutating routes require a matching `X-API-KEY` header.
    pub api_key: Option<Arc<str>>,
}

impl EventServices {
    pub fn new(events: EventCacheService, categories: CategoryService) -> Self {
        Self {
            events,
            categories,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty()).map(Arc::from);
        self
    }
}

/// All `/api` routes with state applied. POST, PUT and DELETE pass through
/// [`auth::require_api_key`].
pub fn routes(services: EventServices) -> Router {
    let guard =
        middleware::from_fn_with_state(services.clone(), auth::require_api_key);

    Router::new()
        .route(
            "/api/events",
            get(events::get_events_paginated)
                .merge(post(events::create_event).route_layer(guard.clone())),
        )
        .route("/api/events/all", get(events::get_all_events))
        .route(
            "/api/events/{id}",
            get(events::get_event)
                .merge(put(events::update_event).route_layer(guard.clone()))
                .merge(delete(events::delete_event).route_layer(guard.clone())),
        )
        .route(
            "/api/categories",
            get(categories::get_all_categories).merge(
                post(categories::create_category).route_layer(guard.clone()),
            ),
        )
        .route(
            "/api/categories/{id}",
            get(categories::get_category)
                .merge(
                    put(categories::update_category).route_layer(guard.clone()),
                )
                .merge(delete(categories::delete_category).route_layer(guard)),
        )
        .route("/api/status/eventstatuses", get(status::get_event_statuses))
        .with_state(services)
}
