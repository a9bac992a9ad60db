use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::{Duration, Utc};
use database_traits::GenericDao;
use events_dao::MemoryDatabase;
use events_http::{EventServices, routes};
use events_responses::{CategoryResponse, EventResponse};
use events_services::{CategoryService, EventCacheService};
use http_body_util::BodyExt;
use redis_connection::MemoryCache;
use serde_json::{Value, json};
use test_utils::fixtures::{self, MUSIC_ID};
use tower::ServiceExt;
use uuid::Uuid;

fn app(api_key: Option<&str>) -> (MemoryDatabase, Router) {
    let db = MemoryDatabase::seeded();
    let events = EventCacheService::new(
        Arc::new(db.events()),
        Arc::new(MemoryCache::<Option<EventResponse>>::default()),
        Arc::new(MemoryCache::<Vec<EventResponse>>::default()),
    );
    let categories = CategoryService::new(
        Arc::new(db.categories()),
        Arc::new(MemoryCache::<Vec<CategoryResponse>>::default()),
    );
    let services = EventServices::new(events, categories)
        .with_api_key(api_key.map(str::to_string));

    (db, routes(services))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    }
    else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_body(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn create_body(name: &str, category_id: Uuid) -> Value {
    let start = Utc::now() + Duration::days(1);
    json!({
        "eventName": name,
        "categoryId": category_id,
        "eventStartDate": start,
        "eventEndDate": start + Duration::hours(2),
        "status": "Active",
    })
}

#[tokio::test]
async fn create_then_fetch_event() {
    let (_db, app) = app(None);

    let (status, created) = send(
        &app,
        with_body(Method::POST, "/api/events", &create_body("Gig", MUSIC_ID)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["eventName"], "Gig");
    assert!(created.get("categoryName").is_none());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, get(&format!("/api/events/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["categoryName"], "Music");
    assert_eq!(fetched["status"], "Active");
}

#[tokio::test]
async fn create_rejections_map_to_bad_request() {
    let (_db, app) = app(None);

    let (status, body) = send(
        &app,
        with_body(Method::POST, "/api/events", &create_body(" ", MUSIC_ID)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        with_body(
            Method::POST,
            "/api/events",
            &create_body("Gig", Uuid::now_v7()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "EVENT_NOT_CREATED");
}

#[tokio::test]
async fn unknown_event_is_not_found() {
    let (_db, app) = app(None);

    let (status, body) =
        send(&app, get(&format!("/api/events/{}", Uuid::now_v7()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "EVENT_NOT_FOUND");
}

#[tokio::test]
async fn paged_listing_reads_camel_case_query() {
    let (db, app) = app(None);
    let base = Utc::now() + Duration::days(1);
    for i in 0..3 {
        db.events()
            .add(&fixtures::event(&format!("Gig {i}"), MUSIC_ID, base + Duration::hours(i)))
            .await
            .unwrap();
    }

    let (status, page) = send(
        &app,
        get("/api/events?pageNumber=2&pageSize=2&categoryNameFilter=MUSIC"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pageNumber"], 2);
    assert_eq!(page["pageSize"], 2);
    assert_eq!(page["totalCount"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["hasPreviousPage"], true);
    assert_eq!(page["hasNextPage"], false);
    assert_eq!(page["events"][0]["eventName"], "Gig 2");
}

#[tokio::test]
async fn timestamped_date_range_filters_by_calendar_day() {
    let (db, app) = app(None);
    let starts = [
        ("Morning", fixtures::at(2025, 7, 1) + Duration::hours(9)),
        ("Evening", fixtures::at(2025, 7, 2) + Duration::hours(18)),
        ("Later", fixtures::at(2025, 7, 4) + Duration::hours(10)),
    ];
    for (name, start) in starts {
        db.events()
            .add(&fixtures::event(name, MUSIC_ID, start))
            .await
            .unwrap();
    }

    let (status, page) = send(
        &app,
        get("/api/events?specificDateFrom=2025-07-01T12:00:00\
             &specificDateTo=2025-07-02T08:00:00"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalCount"], 2);
    assert_eq!(page["events"][0]["eventName"], "Morning");
    assert_eq!(page["events"][1]["eventName"], "Evening");
}

#[tokio::test]
async fn malformed_date_range_is_rejected() {
    let (_db, app) = app(None);

    let response = app
        .clone()
        .oneshot(get("/api/events?specificDateFrom=someday"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn all_events_listing() {
    let (db, app) = app(None);
    db.events()
        .add(&fixtures::event("Gig", MUSIC_ID, Utc::now()))
        .await
        .unwrap();

    let (status, body) = send(&app, get("/api/events/all")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_with_mismatched_body_id() {
    let (db, app) = app(None);
    let event = fixtures::event("Gig", MUSIC_ID, Utc::now());
    db.events().add(&event).await.unwrap();

    let (status, body) = send(
        &app,
        with_body(
            Method::PUT,
            &format!("/api/events/{}", event.id),
            &json!({ "id": Uuid::now_v7(), "eventName": "Encore" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "ID_MISMATCH");

    let (status, body) = send(
        &app,
        with_body(
            Method::PUT,
            &format!("/api/events/{}", event.id),
            &json!({ "eventName": "Encore" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eventName"], "Encore");

    let (status, _) = send(
        &app,
        with_body(
            Method::PUT,
            &format!("/api/events/{}", Uuid::now_v7()),
            &json!({ "eventName": "Encore" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_event_twice() {
    let (db, app) = app(None);
    let event = fixtures::event("Gig", MUSIC_ID, Utc::now());
    db.events().add(&event).await.unwrap();
    let uri = format!("/api/events/{}", event.id);

    let delete = || {
        Request::builder()
            .method(Method::DELETE)
            .uri(&uri)
            .body(Body::empty())
            .unwrap()
    };

    assert_eq!(send(&app, delete()).await.0, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, delete()).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_key_guards_writes_only() {
    let (_db, app) = app(Some("s3cret"));
    let body = create_body("Gig", MUSIC_ID);

    let (status, error) =
        send(&app, with_body(Method::POST, "/api/events", &body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["error"]["message"], "Invalid or missing Api-Key");

    let mut wrong = with_body(Method::POST, "/api/events", &body);
    wrong.headers_mut().insert("x-api-key", "nope".parse().unwrap());
    let (status, error) = send(&app, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["error"]["message"], "Invalid Api-Key provided");

    let mut right = with_body(Method::POST, "/api/events", &body);
    right.headers_mut().insert("x-api-key", "s3cret".parse().unwrap());
    assert_eq!(send(&app, right).await.0, StatusCode::CREATED);

    assert_eq!(send(&app, get("/api/events")).await.0, StatusCode::OK);
    assert_eq!(send(&app, get("/api/categories")).await.0, StatusCode::OK);
}

#[tokio::test]
async fn category_routes() {
    let (_db, app) = app(None);

    let (status, all) = send(&app, get("/api/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 16);

    let (status, created) = send(
        &app,
        with_body(
            Method::POST,
            "/api/categories",
            &json!({ "categoryName": "Science" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) =
        send(&app, get(&format!("/api/categories/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["categoryName"], "Science");

    let (status, renamed) = send(
        &app,
        with_body(
            Method::PUT,
            &format!("/api/categories/{id}"),
            &json!({ "categoryName": "Natural Science" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["categoryName"], "Natural Science");

    let delete = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/categories/{id}"))
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, delete).await.0, StatusCode::NO_CONTENT);

    let (status, body) =
        send(&app, get(&format!("/api/categories/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "CATEGORY_NOT_FOUND");
}

#[tokio::test]
async fn event_statuses() {
    let (_db, app) = app(None);

    let (status, body) = send(&app, get("/api/status/eventstatuses")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": 0, "name": "Draft" },
            { "id": 1, "name": "Active" },
            { "id": 2, "name": "Cancelled" },
            { "id": 3, "name": "Completed" },
        ])
    );
}
