mod categories;
mod events;
mod memory;
mod migrations;
pub mod sql;
mod store;

pub use categories::CategoryDao;
pub use events::EventDao;
pub use memory::{InMemoryCategoryStore, InMemoryEventStore, MemoryDatabase};
pub use migrations::{MIGRATIONS, default_categories};
pub use store::{CategoryStore, EventStore};
