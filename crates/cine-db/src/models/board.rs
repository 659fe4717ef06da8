//! Board database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for categories table
#[derive(Debug, Clone, FromRow)]
pub struct CategoryModel {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub category_id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for post_attachments table
#[derive(Debug, Clone, FromRow)]
pub struct PostAttachmentModel {
    pub id: i64,
    pub post_id: i64,
    pub file_url: String,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}
