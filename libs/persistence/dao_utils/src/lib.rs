pub mod error_handling;
pub mod pagination;
pub mod query_helpers;

pub use error_handling::is_constraint_violation;
pub use pagination::PaginationParams;
pub use query_helpers::{PgParam, PgParamBox, PgParamVec, SqlFilter};
