//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in cine-core.
//! Each repository handles database operations for a specific domain entity.

mod category;
mod comment;
mod error;
mod movie;
mod ott;
mod post;
mod reaction;
mod review;
mod user;

pub use category::PgCategoryRepository;
pub use comment::PgCommentRepository;
pub use movie::PgMovieRepository;
pub use ott::PgOttRepository;
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
pub use review::PgReviewRepository;
pub use user::PgUserRepository;
