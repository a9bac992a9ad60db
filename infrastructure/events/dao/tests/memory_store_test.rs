use chrono::{Duration, Utc};
use database_traits::GenericDao;
use events_dao::{EventStore, MemoryDatabase};
use events_models::Category;
use events_queries::{EventPredicate, EventQuery, PageWindow};
use test_utils::fixtures::{self, MUSIC_ID, TECHNOLOGY_ID};
use uuid::Uuid;

#[tokio::test]
async fn seeded_database_lists_sixteen_categories_by_name() {
    let db = MemoryDatabase::seeded();

    let categories = db.categories().all().await.unwrap();

    assert_eq!(categories.len(), 16);
    assert_eq!(categories[0].name, "Art & Design");
    assert!(categories.windows(2).all(|w| w[0].name <= w[1].name));
}

#[tokio::test]
async fn added_event_is_read_back_with_its_category() {
    let db = MemoryDatabase::seeded();
    let store = db.events();
    let event = fixtures::event("Jazz Night", MUSIC_ID, Utc::now());

    assert!(store.add(&event).await.unwrap());

    let found = store.find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Jazz Night");
    assert_eq!(found.category_name(), Some("Music"));
}

#[tokio::test]
async fn add_rejects_unknown_category_and_duplicate_id() {
    let db = MemoryDatabase::seeded();
    let store = db.events();

    let orphan = fixtures::event("Orphan", Uuid::now_v7(), Utc::now());
    assert!(!store.add(&orphan).await.unwrap());

    let event = fixtures::event("Once", MUSIC_ID, Utc::now());
    assert!(store.add(&event).await.unwrap());
    assert!(!store.add(&event).await.unwrap());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn update_and_delete_report_missing_rows() {
    let db = MemoryDatabase::seeded();
    let store = db.events();
    let event = fixtures::event("Ghost", MUSIC_ID, Utc::now());

    assert!(!store.update(&event).await.unwrap());
    assert!(!store.delete(event.id).await.unwrap());

    store.add(&event).await.unwrap();
    let renamed = events_models::Event {
        name: "Renamed".into(),
        category_id: TECHNOLOGY_ID,
        ..event.clone()
    };
    assert!(store.update(&renamed).await.unwrap());

    let found = store.find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Renamed");
    assert_eq!(found.category_name(), Some("Technology"));

    assert!(store.delete(event.id).await.unwrap());
    assert!(store.find_by_id(event.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_a_category_removes_its_events() {
    let db = MemoryDatabase::new();
    let categories = db.categories();
    let events = db.events();
    let category = Category::builder().name("Temporary").build();
    categories.add(&category).await.unwrap();

    let event = fixtures::event("Short lived", category.id, Utc::now());
    events.add(&event).await.unwrap();

    assert!(categories.delete(category.id).await.unwrap());
    assert!(events.is_empty().await);
}

#[tokio::test]
async fn category_rename_is_visible_through_events() {
    let db = MemoryDatabase::seeded();
    let event = fixtures::event("Gig", MUSIC_ID, Utc::now());
    db.events().add(&event).await.unwrap();

    db.categories()
        .update(&Category {
            id: MUSIC_ID,
            name: "Live Music".into(),
        })
        .await
        .unwrap();

    let found = db.events().find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(found.category_name(), Some("Live Music"));
}

#[tokio::test]
async fn queries_filter_sort_and_window() {
    let db = MemoryDatabase::seeded();
    let store = db.events();
    let base = Utc::now();

    for offset in [3, 1, 2] {
        let event = fixtures::event(
            &format!("Concert {offset}"),
            MUSIC_ID,
            base + Duration::days(offset),
        );
        store.add(&event).await.unwrap();
    }
    store
        .add(&fixtures::event("Hackathon", TECHNOLOGY_ID, base))
        .await
        .unwrap();

    let query = EventQuery {
        predicates: vec![EventPredicate::CategoryNameEquals("music".into())],
        window: Some(PageWindow { skip: 1, take: 5 }),
        ..EventQuery::default()
    };

    assert_eq!(store.count_matching(&query).await.unwrap(), 3);

    let page = store.find_matching(&query).await.unwrap();
    let names: Vec<&str> = page.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Concert 2", "Concert 3"]);
}

#[tokio::test]
async fn all_is_sorted_by_start_date() {
    let db = MemoryDatabase::seeded();
    let store = db.events();
    let base = Utc::now();

    store
        .add(&fixtures::event("Later", MUSIC_ID, base + Duration::hours(1)))
        .await
        .unwrap();
    store
        .add(&fixtures::event("Sooner", MUSIC_ID, base))
        .await
        .unwrap();

    let all = store.all().await.unwrap();
    assert_eq!(all[0].name, "Sooner");
    assert_eq!(all[1].name, "Later");
}
