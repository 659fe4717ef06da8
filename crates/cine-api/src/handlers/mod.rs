//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod comments;
pub mod health;
pub mod movies;
pub mod posts;
pub mod reviews;
pub mod users;
