use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use common_errors::AppError;
use events_errors::EventError;
use events_models::{CreateEventRequest, UpdateEventRequest};
use events_queries::GetEventsQuery;
use events_responses::{EventCreatedResponse, EventResponse, PagingEventResult};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::EventServices;

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventCreatedResponse),
        (status = 400, description = "Invalid request or event not created", body = common_errors::ApiErrorResponse),
        (status = 401, description = "Missing or wrong API key", body = common_errors::ApiErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "events"
)]
#[instrument(skip_all)]
pub async fn create_event(
    State(services): State<EventServices>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventCreatedResponse>), AppError> {
    match services.events.create_event(request).await? {
        Some(created) => Ok((StatusCode::CREATED, Json(created))),
        None => Err(AppError::bad_request(
            "EVENT_NOT_CREATED",
            "Event could not be created",
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/events",
    params(GetEventsQuery),
    responses(
        (status = 200, description = "One page of events", body = PagingEventResult)
    ),
    tag = "events"
)]
#[instrument(skip_all)]
pub async fn get_events_paginated(
    State(services): State<EventServices>, Query(query): Query<GetEventsQuery>,
) -> Json<PagingEventResult> {
    Json(services.events.get_events_paginated(query).await)
}

#[utoipa::path(
    get,
    path = "/api/events/all",
    responses(
        (status = 200, description = "Every event by start date", body = Vec<EventResponse>)
    ),
    tag = "events"
)]
#[instrument(skip_all)]
pub async fn get_all_events(
    State(services): State<EventServices>,
) -> Json<Vec<EventResponse>> {
    Json(services.events.get_all_events().await)
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, description = "Event not found", body = common_errors::ApiErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn get_event(
    State(services): State<EventServices>, Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, AppError> {
    match services.events.get_event_by_id(id).await {
        Some(event) => Ok(Json(event)),
        None => {
            warn!("Event {} not found", id);
            Err(EventError::NotFound { event_id: id }.into())
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    request_body = UpdateEventRequest,
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Id mismatch or invalid request", body = common_errors::ApiErrorResponse),
        (status = 401, description = "Missing or wrong API key", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Event not found", body = common_errors::ApiErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "events"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn update_event(
    State(services): State<EventServices>, Path(id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    services
        .events
        .update_event(id, request)
        .await?
        .map(Json)
        .ok_or_else(|| EventError::NotFound { event_id: id }.into())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Missing or wrong API key", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Event not found", body = common_errors::ApiErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "events"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_event(
    State(services): State<EventServices>, Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if services.events.delete_event(id).await {
        Ok(StatusCode::NO_CONTENT)
    }
    else {
        Err(EventError::NotFound { event_id: id }.into())
    }
}
