//! # cine-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, BoardService, CommentService, MovieService, ReactionService, ReviewService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
