use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use clap::Parser;
use events_dao::{
    CategoryDao, CategoryStore, EventDao, EventStore, MIGRATIONS,
    MemoryDatabase,
};
use events_http::EventServices;
use events_responses::{CategoryResponse, EventResponse};
use events_services::{CategoryService, EventCacheService};
use redis_connection::{CacheBackend, connect_redis_db};
use sql_connection::{SqlConnect, SqlMigrator, connect_postgres_db};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_rapidoc::RapiDoc;

use crate::config::{AppConfig, CacheKind, StoreBackend};

mod config;

struct Stores {
    events: Arc<dyn EventStore>,
    categories: Arc<dyn CategoryStore>,
    db: Option<SqlConnect>,
}

async fn open_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let db = connect_postgres_db(&config.postgres()).await?;
            info!("PostgreSQL connection pool initialized");

            if config.run_migrations {
                let applied =
                    SqlMigrator::new(db.clone()).run(&MIGRATIONS).await?;
                info!("Applied {} migrations", applied.len());
            }

            Ok(Stores {
                events: Arc::new(EventDao::new(db.clone())),
                categories: Arc::new(CategoryDao::new(db.clone())),
                db: Some(db),
            })
        }
        StoreBackend::Memory => {
            let memory = MemoryDatabase::seeded();
            info!("Using in-memory store");

            Ok(Stores {
                events: Arc::new(memory.events()),
                categories: Arc::new(memory.categories()),
                db: None,
            })
        }
    }
}

async fn cache_backend(config: &AppConfig) -> anyhow::Result<CacheBackend> {
    let backend = match config.cache_backend {
        CacheKind::Memory => CacheBackend::Memory(config.memory()),
        CacheKind::Redis => CacheBackend::Redis {
            pool: connect_redis_db(&config.redis()).await?,
            config: config.memory(),
            namespace: config.redis_namespace.clone(),
        },
    };
    info!(cache.backend = backend.name(), "Cache backend initialized");
    Ok(backend)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::parse();

    let stores = open_stores(&config).await?;
    let cache = cache_backend(&config).await?;

    let events = EventCacheService::new(
        stores.events,
        Arc::new(cache.cache::<Option<EventResponse>>()),
        Arc::new(cache.cache::<Vec<EventResponse>>()),
    );
    let categories = CategoryService::new(
        stores.categories,
        Arc::new(cache.cache::<Vec<CategoryResponse>>()),
    );
    let services = EventServices::new(events, categories)
        .with_api_key(config.api_key.clone());
    if services.api_key.is_some() {
        info!("API key required for write routes");
    }

    let health = Router::new()
        .route("/health", get(health_check))
        .with_state(stores.db);

    let app = Router::new()
        .merge(health)
        .merge(events_http::routes(services))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("Events API starting on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                    "X-API-KEY",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        events_http::events::create_event,
        events_http::events::get_events_paginated,
        events_http::events::get_all_events,
        events_http::events::get_event,
        events_http::events::update_event,
        events_http::events::delete_event,
        events_http::categories::create_category,
        events_http::categories::get_all_categories,
        events_http::categories::get_category,
        events_http::categories::update_category,
        events_http::categories::delete_category,
        events_http::status::get_event_statuses,
    ),
    components(
        schemas(
            events_models::CreateEventRequest,
            events_models::UpdateEventRequest,
            events_models::CreateCategoryRequest,
            events_models::UpdateCategoryRequest,
            events_models::EventStatus,
            events_responses::EventResponse,
            events_responses::EventCreatedResponse,
            events_responses::CategoryResponse,
            events_responses::EventStatusResponse,
            events_responses::PagingEventResult,
            common_errors::ApiErrorResponse,
            common_errors::ApiErrorInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "events", description = "Event management endpoints"),
        (name = "categories", description = "Category management endpoints"),
        (name = "status", description = "Event status lookup")
    ),
    info(
        title = "Events API",
        description = "Events and categories with a read-through cache",
        version = "1.0.0"
    )
)]
struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check successful with connection pool status", body = String)
    ),
    tag = "health"
)]
async fn health_check(State(db): State<Option<SqlConnect>>) -> impl IntoResponse {
    let health_info = match db {
        Some(db) => {
            let status = db.get_pool_status();
            format!(
                "OK - Pool: {}/{} available (max {})",
                status.available, status.size, status.max_size
            )
        }
        None => "OK - in-memory store".to_string(),
    };

    (StatusCode::OK, health_info)
}
