//! Catalog handlers
//!
//! OTT providers and movies; all public.

use axum::{extract::State, Json};
use cine_core::Snowflake;
use cine_service::dto::{MovieDetailResponse, MovieListQuery, MovieResponse, OttResponse};
use cine_service::MovieService;

use crate::extractors::{SnowflakePath, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /otts
pub async fn list_otts(State(state): State<AppState>) -> ApiResult<Json<Vec<OttResponse>>> {
    let service = MovieService::new(state.service_context());
    Ok(Json(service.list_otts().await?))
}

/// List movies, filtered by provider ids and title
///
/// GET /movies?ott_services=1,2&title=dune
pub async fn list_movies(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<MovieListQuery>,
) -> ApiResult<Json<Vec<MovieResponse>>> {
    let service = MovieService::new(state.service_context());
    Ok(Json(service.list_movies(query).await?))
}

/// GET /movies/:movie_id
pub async fn get_movie(
    State(state): State<AppState>,
    SnowflakePath(movie_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<MovieDetailResponse>> {
    let service = MovieService::new(state.service_context());
    Ok(Json(service.get_movie(movie_id).await?))
}
