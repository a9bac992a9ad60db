use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use common_errors::AppError;
use tracing::warn;

use crate::EventServices;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects the request with 401 unless it carries the configured key. A
/// service without a key lets everything through.
pub async fn require_api_key(
    State(services): State<EventServices>, request: Request, next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = services.api_key.as_deref()
    else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        None => {
            warn!("Request without API key rejected");
            Err(AppError::unauthorized("Invalid or missing Api-Key"))
        }
        Some(key) if key != expected => {
            warn!("Request with wrong API key rejected");
            Err(AppError::unauthorized("Invalid Api-Key provided"))
        }
        Some(_) => Ok(next.run(request).await),
    }
}
