//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod board;
pub mod comment;
pub mod context;
mod derived;
pub mod error;
pub mod movie;
pub mod reaction;
pub mod review;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use auth::AuthService;
pub use board::BoardService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use movie::MovieService;
pub use reaction::ReactionService;
pub use review::ReviewService;
pub use user::UserService;
