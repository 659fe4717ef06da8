//! Comment database models (post_comments / review_comments)

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A comment row; `parent_id` is aliased from post_id or review_id
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub parent_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Comment row joined with its like count
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithLikesModel {
    #[sqlx(flatten)]
    pub comment: CommentModel,
    pub like_count: i64,
}
