//! Movie catalog database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for otts table
#[derive(Debug, Clone, FromRow)]
pub struct OttModel {
    pub id: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub link_url: Option<String>,
}

/// Database model for movies table
#[derive(Debug, Clone, FromRow)]
pub struct MovieModel {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row of the movie_otts link table
#[derive(Debug, Clone, Copy, FromRow)]
pub struct MovieOttModel {
    pub movie_id: i64,
    pub ott_id: i64,
}

/// Review aggregates of one movie
#[derive(Debug, Clone, Copy, FromRow)]
pub struct MovieStatsModel {
    pub movie_id: i64,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}
