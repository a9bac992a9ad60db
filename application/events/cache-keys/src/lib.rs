use events_responses::{CategoryResponse, EventResponse};
use redis_connection::cache_key;
use uuid::Uuid;

// A cached `None` records a lookup that found nothing.
cache_key!(EventCacheKey::<Option<EventResponse>> => "event:{}"[id: Uuid]);
cache_key!(EventListCacheKey::<Vec<EventResponse>> => "events:list");
cache_key!(CategoryListCacheKey::<Vec<CategoryResponse>> => "categories:list");
