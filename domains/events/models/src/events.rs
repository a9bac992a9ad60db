use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{Category, EventStatus};

#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TypedBuilder, ToSchema,
)]
pub struct Event {
    #[builder(default = Uuid::now_v7())]
    pub id: Uuid,
    #[builder(setter(into))]
    pub name: String,
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    #[builder(default, setter(strip_option))]
    pub image_id: Option<Uuid>,
    pub category_id: Uuid,
    /// Joined category row, present when the event was loaded from a store.
    #[builder(default, setter(strip_option))]
    pub category: Option<Category>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[builder(default)]
    pub status: EventStatus,
    #[builder(default, setter(strip_option))]
    pub location_id: Option<Uuid>,
}

impl Event {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|category| category.name.as_str())
    }
}
