use std::sync::Arc;

use events_cache_keys::CategoryListCacheKey;
use events_dao::CategoryStore;
use events_errors::EventError;
use events_models::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use events_responses::CategoryResponse;
use redis_connection::{CacheExt, key::CacheKey};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{CategoryListCache, events::collapse};

/// Category CRUD with the full listing cached under `categories:list`.
#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    cache: CategoryListCache,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>, cache: CategoryListCache) -> Self {
        Self { store, cache }
    }

    #[instrument(skip(self))]
    pub async fn create_category(
        &self, request: CreateCategoryRequest,
    ) -> Result<Option<CategoryResponse>, EventError> {
        collapse(self.try_create_category(request).await)
    }

    async fn try_create_category(
        &self, request: CreateCategoryRequest,
    ) -> Result<Option<CategoryResponse>, EventError> {
        request.validate()?;

        let category = Category::builder().name(request.category_name).build();
        if !self.store.add(&category).await? {
            return Err(EventError::persistence("category", category.id));
        }

        self.invalidate().await;
        Ok(Some(CategoryResponse::from(category)))
    }

    /// All categories sorted by name.
    #[instrument(skip(self))]
    pub async fn get_all_categories(&self) -> Vec<CategoryResponse> {
        let key = CategoryListCacheKey.get_key();
        let result = self
            .cache
            .get_or_create(&key, move || async move {
                let mut categories: Vec<CategoryResponse> = self
                    .store
                    .all()
                    .await?
                    .into_iter()
                    .map(CategoryResponse::from)
                    .collect();
                categories.sort_by(|a, b| a.category_name.cmp(&b.category_name));
                Ok::<_, EventError>(categories)
            })
            .await;

        result.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load categories");
            Vec::new()
        })
    }

    /// Answered from the cached listing when there is one.
    #[instrument(skip(self))]
    pub async fn get_category_by_id(&self, id: Uuid) -> Option<CategoryResponse> {
        let key = CategoryListCacheKey.get_key();
        match self.cache.try_get(&key).await {
            Ok(Some(categories)) => {
                debug!(cache.key = %key, "Cache hit");
                return categories.into_iter().find(|c| c.id == id);
            }
            Ok(None) => debug!(cache.key = %key, "Cache miss"),
            Err(e) => warn!(cache.key = %key, error = %e, "Cache read failed"),
        }

        match self.store.find_by_id(id).await {
            Ok(category) => category.map(CategoryResponse::from),
            Err(e) => {
                warn!(error = %e, "Failed to load category {}", id);
                None
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn update_category(
        &self, id: Uuid, request: UpdateCategoryRequest,
    ) -> Result<Option<CategoryResponse>, EventError> {
        collapse(self.try_update_category(id, request).await)
    }

    async fn try_update_category(
        &self, id: Uuid, request: UpdateCategoryRequest,
    ) -> Result<Option<CategoryResponse>, EventError> {
        if let Some(body_id) = request.body_id() {
            if body_id != id {
                return Err(EventError::IdMismatch {
                    route_id: id,
                    body_id,
                });
            }
        }
        request.validate()?;

        let category = Category {
            id,
            name: request.category_name,
        };
        if !self.store.update(&category).await? {
            debug!("Category {} not found for update", id);
            return Ok(None);
        }

        self.invalidate().await;
        Ok(Some(CategoryResponse::from(category)))
    }

    /// Deleting a category also deletes its events.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> bool {
        match self.store.delete(id).await {
            Ok(true) => {
                self.invalidate().await;
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!(error = %e, "Failed to delete category {}", id);
                false
            }
        }
    }

    async fn invalidate(&self) {
        let key = CategoryListCacheKey.get_key();
        if let Err(e) = self.cache.remove(&key).await {
            warn!(cache.key = %key, error = %e, "Failed to invalidate category list");
        }
    }
}
