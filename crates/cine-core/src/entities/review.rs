//! Review entity plus its edit history and attached images

use chrono::{DateTime, Utc};

use crate::value_objects::{Rating, Snowflake};

/// A user's review of a movie; one per (author, movie)
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Snowflake,
    pub movie_id: Snowflake,
    pub author_id: Snowflake,
    pub rating: Rating,
    pub comment: String,
    pub is_spoiler: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        id: Snowflake,
        movie_id: Snowflake,
        author_id: Snowflake,
        rating: Rating,
        comment: String,
        is_spoiler: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            movie_id,
            author_id,
            rating,
            comment,
            is_spoiler,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit and return the snapshot that must be recorded in history
    pub fn edit(
        &mut self,
        history_id: Snowflake,
        editor_id: Snowflake,
        rating: Option<Rating>,
        comment: Option<String>,
        is_spoiler: Option<bool>,
    ) -> ReviewHistory {
        let snapshot = ReviewHistory {
            id: history_id,
            review_id: self.id,
            editor_id,
            previous_rating: self.rating,
            previous_comment: self.comment.clone(),
            edited_at: Utc::now(),
        };

        if let Some(rating) = rating {
            self.rating = rating;
        }
        if let Some(comment) = comment {
            self.comment = comment;
        }
        if let Some(is_spoiler) = is_spoiler {
            self.is_spoiler = is_spoiler;
        }
        self.updated_at = snapshot.edited_at;

        snapshot
    }
}

/// State of a review before one edit
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewHistory {
    pub id: Snowflake,
    pub review_id: Snowflake,
    pub editor_id: Snowflake,
    pub previous_rating: Rating,
    pub previous_comment: String,
    pub edited_at: DateTime<Utc>,
}

/// Image attached to a review, referenced by URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewImage {
    pub id: Snowflake,
    pub review_id: Snowflake,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewImage {
    pub fn new(id: Snowflake, review_id: Snowflake, image_url: String) -> Self {
        Self {
            id,
            review_id,
            image_url,
            created_at: Utc::now(),
        }
    }
}

/// Sort keys accepted by the review list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewOrdering {
    #[default]
    NewestFirst,
    OldestFirst,
    RatingDesc,
    RatingAsc,
    MostLiked,
    LeastLiked,
}

impl ReviewOrdering {
    /// Parse the `ordering` query value; a leading `-` means descending
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "-created_at" => Some(Self::NewestFirst),
            "created_at" => Some(Self::OldestFirst),
            "-rating" => Some(Self::RatingDesc),
            "rating" => Some(Self::RatingAsc),
            "-like_count" => Some(Self::MostLiked),
            "like_count" => Some(Self::LeastLiked),
            _ => None,
        }
    }
}
