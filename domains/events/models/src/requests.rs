use chrono::{DateTime, Utc};
use events_errors::ValidationError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{Event, EventStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub event_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_image_id: Option<Uuid>,
    pub category_id: Uuid,
    pub event_start_date: DateTime<Utc>,
    pub event_end_date: DateTime<Utc>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub location_id: Option<Uuid>,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.event_name.trim().is_empty() {
            return Err(ValidationError::Blank("eventName"));
        }
        if self.category_id.is_nil() {
            return Err(ValidationError::Missing("categoryId"));
        }
        Ok(())
    }

    /// Builds a new, not yet persisted event with a fresh id.
    pub fn into_event(self) -> Event {
        Event {
            id: Uuid::now_v7(),
            name: self.event_name,
            description: self.description,
            image_id: self.event_image_id,
            category_id: self.category_id,
            category: None,
            start_date: self.event_start_date,
            end_date: self.event_end_date,
            status: self.status,
            location_id: self.location_id,
        }
    }
}

/// Partial update. Absent fields leave the stored value untouched.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateEventRequest {
    pub id: Option<Uuid>,
    pub event_image_id: Option<Uuid>,
    pub event_name: Option<String>,
    pub description: Option<String>,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub event_start_date: Option<DateTime<Utc>>,
    pub event_end_date: Option<DateTime<Utc>>,
    pub status: Option<EventStatus>,
}

impl UpdateEventRequest {
    /// Body id, ignoring an absent or nil value.
    pub fn body_id(&self) -> Option<Uuid> {
        self.id.filter(|id| !id.is_nil())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if matches!(&self.event_name, Some(name) if name.trim().is_empty()) {
            return Err(ValidationError::Blank("eventName"));
        }
        if matches!(self.category_id, Some(id) if id.is_nil()) {
            return Err(ValidationError::Missing("categoryId"));
        }
        Ok(())
    }

    pub fn apply_to(&self, event: &mut Event) {
        if let Some(image_id) = self.event_image_id {
            event.image_id = Some(image_id);
        }
        if let Some(name) = &self.event_name {
            event.name = name.clone();
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(location_id) = self.location_id {
            event.location_id = Some(location_id);
        }
        if let Some(category_id) = self.category_id {
            if category_id != event.category_id {
                event.category_id = category_id;
                event.category = None;
            }
        }
        if let Some(start) = self.event_start_date {
            event.start_date = start;
        }
        if let Some(end) = self.event_end_date {
            event.end_date = end;
        }
        if let Some(status) = self.status {
            event.status = status;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub category_name: String,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category_name.trim().is_empty() {
            return Err(ValidationError::Blank("categoryName"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub category_name: String,
}

impl UpdateCategoryRequest {
    pub fn body_id(&self) -> Option<Uuid> {
        self.id.filter(|id| !id.is_nil())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category_name.trim().is_empty() {
            return Err(ValidationError::Blank("categoryName"));
        }
        Ok(())
    }
}
