//! Test fixtures and data generators
//!
//! Request bodies and the subset of response fields the tests read.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Per-run prefix so reruns against the same database do not collide
fn run_prefix() -> u64 {
    static PREFIX: OnceLock<u64> = OnceLock::new();
    *PREFIX.get_or_init(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64 % 100_000_000)
            .unwrap_or_default()
    })
}

/// Unique suffix for test data
pub fn unique_suffix() -> String {
    format!("{}{}", run_prefix(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("critic{suffix}"),
            email: format!("critic{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Signed-in user
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
}

/// Profile with subscriptions
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub subscribed_ott: Vec<OttResponse>,
}

/// OTT provider
#[derive(Debug, Deserialize)]
pub struct OttResponse {
    pub id: String,
    pub name: String,
}

/// Movie list row
#[derive(Debug, Deserialize)]
pub struct MovieResponse {
    pub id: String,
    pub title: String,
    pub ott_services: Vec<String>,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

/// Board category
#[derive(Debug, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub slug: String,
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub category: String,
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn in_category(category: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            category: category.to_string(),
            title: format!("Weekend watchlist {suffix}"),
            content: "<p>Three films worth a rewatch.</p>".to_string(),
        }
    }
}

/// Post view
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub view_count: i64,
    pub like_count: i64,
    pub dislike_count: i64,
    pub my_like: Option<bool>,
    pub comment_count: i64,
}

/// Page envelope
#[derive(Debug, Deserialize)]
pub struct PageResponse<T> {
    pub count: i64,
    pub page: u32,
    pub page_size: u32,
    pub has_next: bool,
    pub results: Vec<T>,
}

/// Create review request
#[derive(Debug, Serialize)]
pub struct CreateReviewRequest {
    pub movie_id: String,
    pub rating: f64,
    pub comment: String,
    pub image_urls: Vec<String>,
}

impl CreateReviewRequest {
    pub fn for_movie(movie_id: &str, rating: f64) -> Self {
        Self {
            movie_id: movie_id.to_string(),
            rating,
            comment: "Slow start, great last act.".to_string(),
            image_urls: Vec::new(),
        }
    }
}

/// Review view
#[derive(Debug, Deserialize)]
pub struct ReviewResponse {
    pub id: String,
    pub movie_id: String,
    pub rating: f64,
    pub comment: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub my_vote: i8,
    pub is_edited: bool,
    pub images: Vec<ReviewImageResponse>,
}

/// Review image
#[derive(Debug, Deserialize)]
pub struct ReviewImageResponse {
    pub id: String,
    pub image_url: String,
}

/// Review edit history row
#[derive(Debug, Deserialize)]
pub struct ReviewHistoryResponse {
    pub previous_rating: f64,
    pub previous_comment: String,
}

/// Like/dislike toggle result
#[derive(Debug, Deserialize)]
pub struct ReactionResponse {
    pub my_vote: i8,
    pub like_count: i64,
    pub dislike_count: i64,
}

/// Like-only toggle result
#[derive(Debug, Deserialize)]
pub struct CommentLikeResponse {
    pub liked: bool,
    pub like_count: i64,
}

/// Comment view
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub content: String,
    pub like_count: i64,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
