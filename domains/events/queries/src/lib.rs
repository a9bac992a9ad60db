pub mod date_filter;
pub mod event_query;
pub mod filter_builder;
pub mod get_events;
pub mod page;

pub use date_filter::DateFilter;
pub use event_query::{EventPredicate, EventQuery, EventSort, PageWindow};
pub use filter_builder::QueryFilterBuilder;
pub use get_events::GetEventsQuery;
pub use page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};
