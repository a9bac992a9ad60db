use common_errors::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
    #[error("{0} is required")]
    Missing(&'static str),
}

/// Failures raised by event and category stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sql_connection::PgError),
    #[error("Connection error: {0}")]
    Connection(#[from] sql_connection::PoolError),
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Id mismatch: route id {route_id} does not match body id {body_id}")]
    IdMismatch { route_id: Uuid, body_id: Uuid },
    #[error("Failed to persist {entity} {id}")]
    Persistence { entity: &'static str, id: Uuid },
    #[error("{entity} {id} was written but could not be read back")]
    Consistency { entity: &'static str, id: Uuid },
    #[error("Event not found: {event_id}")]
    NotFound { event_id: Uuid },
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl EventError {
    pub fn persistence(entity: &'static str, id: Uuid) -> Self {
        Self::Persistence { entity, id }
    }

    pub fn consistency(entity: &'static str, id: Uuid) -> Self {
        Self::Consistency { entity, id }
    }

    /// Validation and id mismatches reach the caller. Every other failure
    /// is collapsed into an absent or empty result by the services.
    pub fn is_surfaced(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::IdMismatch { .. })
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match &err {
            EventError::Validation(_) => {
                AppError::bad_request("VALIDATION_ERROR", &err.to_string())
            }
            EventError::IdMismatch { .. } => AppError::bad_request(
                "ID_MISMATCH",
                "Route id and body id do not match",
            )
            .with_details(err.to_string()),
            EventError::NotFound { .. } => {
                AppError::not_found("EVENT_NOT_FOUND", &err.to_string())
            }
            _ => AppError::internal_server_error(&err.to_string()),
        }
    }
}
