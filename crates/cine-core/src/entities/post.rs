//! Board entities - categories, posts and their attachments

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Board category addressed by slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Snowflake,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Board post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub category_id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub content: String,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        id: Snowflake,
        category_id: Snowflake,
        author_id: Snowflake,
        title: String,
        content: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            category_id,
            author_id,
            title,
            content,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit from the author
    pub fn edit(
        &mut self,
        title: Option<String>,
        content: Option<String>,
        category_id: Option<Snowflake>,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(category_id) = category_id {
            self.category_id = category_id;
        }
        self.updated_at = Utc::now();
    }
}

/// File attached to a post, referenced by URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostAttachment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub file_url: String,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

impl PostAttachment {
    pub fn new(id: Snowflake, post_id: Snowflake, file_url: String, file_name: String) -> Self {
        Self {
            id,
            post_id,
            file_url,
            file_name,
            created_at: Utc::now(),
        }
    }
}

/// Which text a post search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    Title,
    #[default]
    TitleContent,
    Author,
}

impl SearchType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "title" => Some(Self::Title),
            "title_content" => Some(Self::TitleContent),
            "author" => Some(Self::Author),
            _ => None,
        }
    }
}

/// Category selector of the post list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Posts with at least `min_likes` likes, most liked first
    Hot { min_likes: i64 },
    Slug(String),
}

/// Composed post list filter; all parts are ANDed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostFilter {
    pub category: CategoryFilter,
    pub search: Option<(SearchType, String)>,
}

impl PostFilter {
    /// Build from raw `category`, `search_type` and `search` query values
    pub fn from_query(
        category: Option<&str>,
        search_type: Option<&str>,
        search: Option<&str>,
        hot_threshold: i64,
    ) -> Self {
        let category = match category.map(str::trim) {
            None | Some("") => CategoryFilter::All,
            Some("hot") => CategoryFilter::Hot {
                min_likes: hot_threshold,
            },
            Some(slug) => CategoryFilter::Slug(slug.to_string()),
        };

        let search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| {
                let mode = search_type.and_then(SearchType::parse).unwrap_or_default();
                (mode, term.to_string())
            });

        Self { category, search }
    }
}
