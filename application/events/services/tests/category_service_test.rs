use std::sync::Arc;

use chrono::Utc;
use database_traits::GenericDao;
use events_dao::MemoryDatabase;
use events_errors::EventError;
use events_models::{CreateCategoryRequest, UpdateCategoryRequest};
use events_responses::CategoryResponse;
use events_services::CategoryService;
use test_utils::{
    RecordingCache,
    fixtures::{self, MUSIC_ID},
};
use uuid::Uuid;

const LIST_KEY: &str = "categories:list";

fn service() -> (
    MemoryDatabase,
    Arc<RecordingCache<Vec<CategoryResponse>>>,
    CategoryService,
) {
    let db = MemoryDatabase::seeded();
    let cache = Arc::new(RecordingCache::new());
    let service = CategoryService::new(Arc::new(db.categories()), cache.clone());
    (db, cache, service)
}

#[tokio::test]
async fn listing_is_sorted_and_cached() {
    let (_db, cache, service) = service();

    let first = service.get_all_categories().await;
    let second = service.get_all_categories().await;

    assert_eq!(first.len(), 16);
    assert!(first.windows(2).all(|w| w[0].category_name <= w[1].category_name));
    assert_eq!(first, second);
    assert_eq!(cache.stats().misses, 1);
    assert_eq!(cache.stats().hits, 1);
}

#[tokio::test]
async fn create_invalidates_listing() {
    let (_db, cache, service) = service();
    service.get_all_categories().await;

    let created = service
        .create_category(CreateCategoryRequest {
            category_name: "Science".into(),
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.category_name, "Science");
    assert_eq!(cache.removed_keys(), [LIST_KEY]);
    assert!(
        service
            .get_all_categories()
            .await
            .iter()
            .any(|c| c.id == created.id)
    );
}

#[tokio::test]
async fn blank_name_is_surfaced() {
    let (_db, cache, service) = service();

    let err = service
        .create_category(CreateCategoryRequest {
            category_name: "   ".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, EventError::Validation(_)));
    assert!(cache.removed_keys().is_empty());
}

#[tokio::test]
async fn lookup_prefers_cached_listing() {
    let (db, _cache, service) = service();
    service.get_all_categories().await;

    // Added behind the service's back, so only the store knows it.
    let hidden = events_models::Category::builder().name("Hidden").build();
    db.categories().add(&hidden).await.unwrap();

    let music = service.get_category_by_id(MUSIC_ID).await.unwrap();
    assert_eq!(music.category_name, "Music");
    assert!(service.get_category_by_id(hidden.id).await.is_none());
}

#[tokio::test]
async fn lookup_falls_back_to_store_without_listing() {
    let (_db, cache, service) = service();

    let music = service.get_category_by_id(MUSIC_ID).await.unwrap();

    assert_eq!(music.id, MUSIC_ID);
    assert!(service.get_category_by_id(Uuid::now_v7()).await.is_none());
    assert_eq!(cache.stats().sets, 0);
}

#[tokio::test]
async fn update_checks_ids_and_existence() {
    let (_db, cache, service) = service();

    let err = service
        .update_category(MUSIC_ID, UpdateCategoryRequest {
            id: Some(Uuid::now_v7()),
            category_name: "Sound".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EventError::IdMismatch { .. }));

    let missing = service
        .update_category(Uuid::now_v7(), UpdateCategoryRequest {
            id: None,
            category_name: "Sound".into(),
        })
        .await
        .unwrap();
    assert!(missing.is_none());
    assert!(cache.removed_keys().is_empty());

    let renamed = service
        .update_category(MUSIC_ID, UpdateCategoryRequest {
            id: Some(MUSIC_ID),
            category_name: "Sound".into(),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.category_name, "Sound");
    assert_eq!(cache.removed_keys(), [LIST_KEY]);
}

#[tokio::test]
async fn delete_cascades_and_invalidates() {
    let (db, cache, service) = service();
    let event = fixtures::event("Gig", MUSIC_ID, Utc::now());
    db.events().add(&event).await.unwrap();

    assert!(service.delete_category(MUSIC_ID).await);
    assert!(!service.delete_category(MUSIC_ID).await);

    assert_eq!(cache.removed_keys(), [LIST_KEY]);
    assert!(db.events().find_by_id(event.id).await.unwrap().is_none());
}
