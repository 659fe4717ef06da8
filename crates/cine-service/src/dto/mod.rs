//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddReviewImageRequest, AttachmentInput, CreateCommentRequest, CreatePostRequest,
    CreateReviewRequest, LikeRequest, LoginRequest, MovieListQuery, PostListQuery,
    RefreshTokenRequest, RegisterRequest, ReviewListQuery, UpdatePostRequest,
    UpdateProfileRequest, UpdateReviewRequest, UpdateSubscriptionsRequest,
};

pub use responses::{
    AttachmentResponse, AuthResponse, AuthorResponse, CategoryResponse, CommentLikeResponse,
    CommentResponse, CurrentUserResponse, HealthChecks, HealthResponse, MovieDetailResponse,
    MovieResponse, OttResponse, PostResponse, ProfileResponse, ReactionResponse,
    ReadinessResponse, ReviewHistoryResponse, ReviewImageResponse, ReviewResponse,
    ViewCountResponse,
};

pub use mappers::{
    AuthorDirectory, CommentWithDetails, MovieWithStats, PostWithDetails, ReviewWithDetails,
};
