//! Movie catalog service
//!
//! Lists OTT providers and movies; review aggregates are counted per request.

use std::collections::HashMap;

use cine_core::entities::MovieFilter;
use cine_core::{DomainError, Snowflake};
use tracing::instrument;

use crate::dto::{
    MovieDetailResponse, MovieListQuery, MovieResponse, MovieWithStats, OttResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Build the movie filter from raw query values
pub fn movie_filter(query: &MovieListQuery) -> ServiceResult<MovieFilter> {
    let mut ott_ids = Vec::new();
    if let Some(raw) = query.ott_services.as_deref() {
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id = Snowflake::parse(part).map_err(|_| {
                ServiceError::field("ott_services", format!("invalid provider id: {part}"))
            })?;
            ott_ids.push(id);
        }
    }

    let title = query
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    Ok(MovieFilter { ott_ids, title })
}

/// Movie catalog service
pub struct MovieService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MovieService<'a> {
    /// Create a new MovieService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All OTT providers
    #[instrument(skip(self))]
    pub async fn list_otts(&self) -> ServiceResult<Vec<OttResponse>> {
        let otts = self.ctx.ott_repo().list().await?;
        Ok(otts.iter().map(OttResponse::from).collect())
    }

    /// Movies matching the provider and title filters
    #[instrument(skip(self))]
    pub async fn list_movies(&self, query: MovieListQuery) -> ServiceResult<Vec<MovieResponse>> {
        let filter = movie_filter(&query)?;
        let movies = self.ctx.movie_repo().list(&filter).await?;

        let ids: Vec<Snowflake> = movies.iter().map(|m| m.id).collect();
        let stats: HashMap<_, _> = self
            .ctx
            .movie_repo()
            .stats_for(&ids)
            .await?
            .into_iter()
            .collect();

        Ok(movies
            .into_iter()
            .map(|movie| {
                let stats = stats.get(&movie.id).copied().unwrap_or_default();
                MovieResponse::from(MovieWithStats { movie, stats })
            })
            .collect())
    }

    /// One movie with its providers and review aggregates
    #[instrument(skip(self))]
    pub async fn get_movie(&self, movie_id: Snowflake) -> ServiceResult<MovieDetailResponse> {
        let movie = self
            .ctx
            .movie_repo()
            .find_by_id(movie_id)
            .await?
            .ok_or(DomainError::MovieNotFound(movie_id))?;

        let stats = self.ctx.movie_repo().stats(movie_id).await?;
        let otts = self.ctx.ott_repo().find_by_ids(&movie.ott_ids).await?;

        Ok(MovieDetailResponse {
            movie: MovieResponse::from(MovieWithStats { movie, stats }),
            otts: otts.iter().map(OttResponse::from).collect(),
        })
    }
}
