use chrono::{DateTime, Duration, TimeZone, Utc};
use events_models::{Category, CreateEventRequest, Event, EventStatus};
use uuid::{Uuid, uuid};

pub const MUSIC_ID: Uuid = uuid!("58253062-17d0-48cd-8cb5-35ee499fb56d");
pub const TECHNOLOGY_ID: Uuid = uuid!("e910e72c-3d6f-4f30-b271-9e7cf46862a0");

/// Seeded "Music" category.
pub fn music() -> Category {
    Category {
        id: MUSIC_ID,
        name: "Music".into(),
    }
}

/// Seeded "Technology" category.
pub fn technology() -> Category {
    Category {
        id: TECHNOLOGY_ID,
        name: "Technology".into(),
    }
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Active event lasting two hours.
pub fn event(name: &str, category_id: Uuid, start: DateTime<Utc>) -> Event {
    Event::builder()
        .name(name)
        .category_id(category_id)
        .start_date(start)
        .end_date(start + Duration::hours(2))
        .status(EventStatus::Active)
        .build()
}

pub fn create_request(
    name: &str, category_id: Uuid, start: DateTime<Utc>,
) -> CreateEventRequest {
    CreateEventRequest {
        event_name: name.to_string(),
        description: None,
        event_image_id: None,
        category_id,
        event_start_date: start,
        event_end_date: start + Duration::hours(2),
        status: EventStatus::Active,
        location_id: None,
    }
}
