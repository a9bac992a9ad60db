use std::sync::Arc;

use events_responses::{CategoryResponse, EventResponse};
use redis_connection::CacheTrait;

mod categories;
mod events;

pub use categories::CategoryService;
pub use events::EventCacheService;

pub type EventCache = Arc<dyn CacheTrait<Value = Option<EventResponse>>>;
pub type EventListCache = Arc<dyn CacheTrait<Value = Vec<EventResponse>>>;
pub type CategoryListCache = Arc<dyn CacheTrait<Value = Vec<CategoryResponse>>>;
