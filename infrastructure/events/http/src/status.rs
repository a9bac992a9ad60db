use axum::response::Json;
use events_models::EventStatus;
use events_responses::EventStatusResponse;

#[utoipa::path(
    get,
    path = "/api/status/eventstatuses",
    responses(
        (status = 200, description = "Every event status", body = Vec<EventStatusResponse>)
    ),
    tag = "status"
)]
pub async fn get_event_statuses() -> Json<Vec<EventStatusResponse>> {
    Json(
        EventStatus::ALL
            .iter()
            .copied()
            .map(EventStatusResponse::from)
            .collect(),
    )
}
