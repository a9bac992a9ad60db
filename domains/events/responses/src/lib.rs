use chrono::{DateTime, Utc};
use events_models::{Category, Event, EventStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Read projection of an event, as cached and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub event_image_id: Option<Uuid>,
    pub event_name: String,
    pub description: Option<String>,
    pub location_id: Option<Uuid>,
    pub status: String,
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub event_start_date: DateTime<Utc>,
    pub event_end_date: DateTime<Utc>,
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            event_image_id: event.image_id,
            event_name: event.name.clone(),
            description: event.description.clone(),
            location_id: event.location_id,
            status: event.status.to_string(),
            category_id: event.category_id,
            category_name: event.category_name().map(str::to_string),
            event_start_date: event.start_date,
            event_end_date: event.end_date,
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self { Self::from(&event) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventCreatedResponse {
    pub id: Uuid,
    pub event_image_id: Option<Uuid>,
    pub event_name: String,
    pub category_id: Uuid,
    pub event_start_date: DateTime<Utc>,
    pub event_end_date: DateTime<Utc>,
    pub status: EventStatus,
    pub location_id: Option<Uuid>,
}

impl From<&Event> for EventCreatedResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            event_image_id: event.image_id,
            event_name: event.name.clone(),
            category_id: event.category_id,
            event_start_date: event.start_date,
            event_end_date: event.end_date,
            status: event.status,
            location_id: event.location_id,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub category_name: String,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            category_name: category.name.clone(),
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            category_name: category.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventStatusResponse {
    pub id: i32,
    pub name: String,
}

impl From<EventStatus> for EventStatusResponse {
    fn from(status: EventStatus) -> Self {
        Self {
            id: status.id(),
            name: status.to_string(),
        }
    }
}

/// One page of events plus the paging metadata derived from the total
/// match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagingEventResult {
    pub events: Vec<EventResponse>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PagingEventResult {
    pub fn new(
        events: Vec<EventResponse>, page_number: u32, page_size: u32,
        total_count: u64,
    ) -> Self {
        let total_pages = if page_size == 0 {
            0
        }
        else {
            total_count.div_ceil(u64::from(page_size))
        };

        Self {
            events,
            page_number,
            page_size,
            total_count,
            total_pages,
            has_previous_page: page_number > 1,
            has_next_page: u64::from(page_number) < total_pages,
        }
    }

    pub fn empty(page_number: u32, page_size: u32) -> Self {
        Self::new(Vec::new(), page_number, page_size, 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = PagingEventResult::new(Vec::new(), 1, 10, 25);

        assert_eq!(page.total_pages, 3);
        assert!(!page.has_previous_page);
        assert!(page.has_next_page);
    }

    #[test]
    fn last_page_has_no_next() {
        let page = PagingEventResult::new(Vec::new(), 3, 10, 25);

        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page = PagingEventResult::empty(1, 10);

        assert_eq!(page.total_pages, 0);
        assert!(!page.has_previous_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn page_beyond_range_keeps_previous_flag() {
        let page = PagingEventResult::new(Vec::new(), 5, 10, 12);

        assert_eq!(page.total_pages, 2);
        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn view_flattens_category_and_status() {
        let start = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
        let category = Category::builder().name("Technology").build();
        let event = Event::builder()
            .name("RustConf")
            .category_id(category.id)
            .category(category)
            .start_date(start)
            .end_date(start)
            .status(EventStatus::Active)
            .build();

        let view = EventResponse::from(&event);

        assert_eq!(view.category_name.as_deref(), Some("Technology"));
        assert_eq!(view.status, "Active");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["eventName"], "RustConf");
        assert_eq!(json["categoryName"], "Technology");
    }
}
