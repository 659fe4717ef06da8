//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::{PageParams, PageQuery, Paged};
pub use path::SnowflakePath;
pub use validated::{ValidatedJson, ValidatedQuery};

pub(crate) use validated::json_rejection;
