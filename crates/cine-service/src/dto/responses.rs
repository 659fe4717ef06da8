//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use cine_core::{Rating, Snowflake};
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        refresh_expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            refresh_expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Authenticated user (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: Snowflake,
    pub email: String,
    pub username: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

/// Author reference embedded in content views
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorResponse {
    pub id: Snowflake,
    pub username: String,
}

/// Profile with subscribed providers
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Snowflake,
    pub email: String,
    pub username: String,
    pub is_staff: bool,
    pub subscribed_ott: Vec<OttResponse>,
}

// ============================================================================
// Catalog Responses
// ============================================================================

/// OTT provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OttResponse {
    pub id: Snowflake,
    pub name: String,
    pub logo_url: Option<String>,
    pub link_url: Option<String>,
}

/// Movie list row
#[derive(Debug, Clone, Serialize)]
pub struct MovieResponse {
    pub id: Snowflake,
    pub title: String,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub thumbnail_url: Option<String>,
    pub ott_services: Vec<Snowflake>,
    /// One decimal, null when the movie has no reviews
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

/// Movie detail with embedded provider records
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetailResponse {
    #[serde(flatten)]
    pub movie: MovieResponse,
    pub otts: Vec<OttResponse>,
}

// ============================================================================
// Review Responses
// ============================================================================

/// Image attached to a review
#[derive(Debug, Clone, Serialize)]
pub struct ReviewImageResponse {
    pub id: Snowflake,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Review with per-request derived fields
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: Snowflake,
    pub movie_id: Snowflake,
    pub author: AuthorResponse,
    pub rating: Rating,
    pub comment: String,
    pub is_spoiler: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub like_count: i64,
    pub dislike_count: i64,
    /// -1, 0 or +1 for the requesting user
    pub my_vote: i8,
    pub is_edited: bool,
    pub images: Vec<ReviewImageResponse>,
    pub comment_count: i64,
}

/// One edit of a review
#[derive(Debug, Clone, Serialize)]
pub struct ReviewHistoryResponse {
    pub id: Snowflake,
    pub review_id: Snowflake,
    pub editor_id: Snowflake,
    pub previous_rating: Rating,
    pub previous_comment: String,
    pub edited_at: DateTime<Utc>,
}

// ============================================================================
// Board Responses
// ============================================================================

/// Board category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: Snowflake,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// File attached to a post
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentResponse {
    pub id: Snowflake,
    pub file_url: String,
    pub file_name: String,
}

/// Post with per-request derived fields
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: Snowflake,
    pub category: Snowflake,
    pub category_name: Option<String>,
    pub title: String,
    pub content: String,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view_count: i64,
    pub like_count: i64,
    pub dislike_count: i64,
    /// true = liked, false = disliked, null = no vote
    pub my_like: Option<bool>,
    pub comment_count: i64,
    pub thumbnail_url: Option<String>,
    pub attachments: Vec<AttachmentResponse>,
}

/// Result of an explicit view
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ViewCountResponse {
    pub id: Snowflake,
    pub view_count: i64,
}

/// Comment under a post or a review
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Snowflake,
    pub parent_id: Snowflake,
    pub author: AuthorResponse,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub my_like: Option<bool>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Result of a like/dislike toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionResponse {
    /// -1, 0 or +1 after the toggle
    pub my_vote: i8,
    pub like_count: i64,
    pub dislike_count: i64,
    /// Whether a new reaction row was created
    #[serde(skip)]
    pub created: bool,
}

/// Result of a like-only toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommentLikeResponse {
    pub liked: bool,
    pub like_count: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
