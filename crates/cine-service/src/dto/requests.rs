//! Request DTOs for API endpoints
//!
//! Every DTO implements `Deserialize` and `Validate`; query DTOs are parsed
//! from the query string and only bound the length of free-text terms.

use cine_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 2, max = 30, message = "Username must be 2-30 characters"))]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Refresh or logout request; the token may instead come from a cookie
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Update current user request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
}

/// Replace the subscription set
///
/// Kept as raw JSON so a non-list value can be reported against `ott_ids`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubscriptionsRequest {
    #[serde(default)]
    pub ott_ids: Option<serde_json::Value>,
}

// ============================================================================
// Review Requests
// ============================================================================

/// Create review request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[serde(alias = "movie")]
    pub movie_id: Snowflake,

    pub rating: f64,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Comment must be at most 5000 characters"))]
    pub comment: String,

    #[serde(default)]
    pub is_spoiler: bool,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 images per request"))]
    pub image_urls: Vec<String>,
}

/// Update review request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    pub rating: Option<f64>,

    #[validate(length(max = 5000, message = "Comment must be at most 5000 characters"))]
    pub comment: Option<String>,

    pub is_spoiler: Option<bool>,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 images per request"))]
    pub image_urls: Vec<String>,

    #[serde(default)]
    pub delete_image_ids: Vec<Snowflake>,
}

/// Attach one image to a review
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddReviewImageRequest {
    #[validate(length(min = 1, message = "image_url is required"))]
    pub image_url: String,
}

// ============================================================================
// Board Requests
// ============================================================================

/// File reference attached to a new post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttachmentInput {
    #[validate(length(min = 1, message = "file_url is required"))]
    pub file_url: String,

    #[validate(length(min = 1, max = 255, message = "file_name must be 1-255 characters"))]
    pub file_name: String,
}

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(alias = "category_id")]
    pub category: Snowflake,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[serde(default)]
    #[validate(nested)]
    pub attachments: Vec<AttachmentInput>,
}

/// Update post request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[serde(alias = "category_id")]
    pub category: Option<Snowflake>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,
}

/// Create comment request (posts and reviews)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Like/dislike toggle body
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct LikeRequest {
    pub is_like: bool,
}

// ============================================================================
// Query Strings
// ============================================================================

/// `GET /posts` filters
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostListQuery {
    pub category: Option<String>,
    pub search_type: Option<String>,
    #[validate(length(max = 100, message = "Search term must be at most 100 characters"))]
    pub search: Option<String>,
}

/// `GET /reviews` filters
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewListQuery {
    pub movie: Option<Snowflake>,
    pub ordering: Option<String>,
}

/// `GET /movies` filters
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MovieListQuery {
    /// Comma-separated provider ids
    pub ott_services: Option<String>,
    #[validate(length(max = 100, message = "Title filter must be at most 100 characters"))]
    pub title: Option<String>,
}
