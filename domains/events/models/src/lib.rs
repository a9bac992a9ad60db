pub mod categories;
pub mod events;
pub mod requests;
pub mod status;

pub use categories::Category;
pub use events::Event;
pub use requests::{
    CreateCategoryRequest, CreateEventRequest, UpdateCategoryRequest,
    UpdateEventRequest,
};
pub use status::{EventStatus, UnknownStatus};
