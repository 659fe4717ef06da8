//! Review database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reviews table
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: i64,
    pub movie_id: i64,
    pub author_id: i64,
    pub rating: f64,
    pub comment: String,
    pub is_spoiler: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for review_histories table
#[derive(Debug, Clone, FromRow)]
pub struct ReviewHistoryModel {
    pub id: i64,
    pub review_id: i64,
    pub editor_id: i64,
    pub previous_rating: f64,
    pub previous_comment: String,
    pub edited_at: DateTime<Utc>,
}

/// Database model for review_images table
#[derive(Debug, Clone, FromRow)]
pub struct ReviewImageModel {
    pub id: i64,
    pub review_id: i64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}
