//! Comment entity shared by post and review threads

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Which kind of parent a comment thread hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentThread {
    Post,
    Review,
}

/// A comment under a post or a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub thread: CommentThread,
    pub parent_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        id: Snowflake,
        thread: CommentThread,
        parent_id: Snowflake,
        author_id: Snowflake,
        content: String,
    ) -> Self {
        Self {
            id,
            thread,
            parent_id,
            author_id,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Comment with its like count, as loaded for ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithLikes {
    pub comment: Comment,
    pub like_count: i64,
}
