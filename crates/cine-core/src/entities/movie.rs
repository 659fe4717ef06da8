//! Movie entity and its per-request review aggregates

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{round_average, Snowflake};

/// Catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: Snowflake,
    pub title: String,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub thumbnail_url: Option<String>,
    /// Providers the movie is available on
    pub ott_ids: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
}

/// Review aggregates computed from review rows at read time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovieStats {
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

impl MovieStats {
    /// Build from a raw SQL average; rounds to one decimal
    pub fn new(raw_average: Option<f64>, review_count: i64) -> Self {
        Self {
            average_rating: raw_average.map(round_average),
            review_count,
        }
    }
}

/// Filters accepted by the movie list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    /// Match movies available on any of these providers
    pub ott_ids: Vec<Snowflake>,
    /// Case-insensitive title substring
    pub title: Option<String>,
}
