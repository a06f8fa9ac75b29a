//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, query strings and
//! pagination.

mod auth;
mod pagination;
mod path;
mod query;
mod validated;

pub use auth::CurrentUser;
pub use pagination::{Pagination, PaginationParams};
pub use path::IdPath;
pub use query::QueryParams;
pub use validated::ValidatedJson;
