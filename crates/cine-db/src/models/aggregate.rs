//! Aggregate query rows shared by several repositories

use sqlx::FromRow;

/// Like/dislike counts of one reaction target
#[derive(Debug, Clone, Copy, FromRow)]
pub struct TallyModel {
    pub target_id: i64,
    pub like_count: i64,
    pub dislike_count: i64,
}

/// A user's vote on one target
#[derive(Debug, Clone, Copy, FromRow)]
pub struct VoteModel {
    pub target_id: i64,
    pub is_like: bool,
}

/// Child count of one parent row
#[derive(Debug, Clone, Copy, FromRow)]
pub struct CountModel {
    pub parent_id: i64,
    pub count: i64,
}
