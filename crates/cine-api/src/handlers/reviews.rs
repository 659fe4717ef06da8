//! Review handlers
//!
//! Review CRUD, like/dislike votes, edit history and images.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cine_core::{Page, Snowflake, Vote};
use cine_service::dto::{
    AddReviewImageRequest, CreateReviewRequest, ReviewHistoryResponse, ReviewImageResponse,
    ReviewListQuery, ReviewResponse, UpdateReviewRequest,
};
use cine_service::{ReactionService, ReviewService};

use crate::extractors::{
    AuthUser, OptionalAuthUser, Paged, SnowflakePath, ValidatedJson, ValidatedQuery,
};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Paged review list
///
/// GET /reviews?movie=...&ordering=-like_count&page=1
pub async fn list_reviews(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Paged(page): Paged,
    ValidatedQuery(query): ValidatedQuery<ReviewListQuery>,
) -> ApiResult<Json<Page<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    Ok(Json(service.list(query, page, viewer.user_id()).await?))
}

/// POST /reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> ApiResult<Created<Json<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let review = service.create(auth.user_id, request).await?;
    Ok(Created(Json(review)))
}

/// GET /reviews/:review_id
pub async fn get_review(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SnowflakePath(review_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<ReviewResponse>> {
    let service = ReviewService::new(state.service_context());
    Ok(Json(service.get(review_id, viewer.user_id()).await?))
}

/// Update a review, recording the previous rating and text
///
/// PATCH /reviews/:review_id
pub async fn update_review(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(review_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<UpdateReviewRequest>,
) -> ApiResult<Json<ReviewResponse>> {
    let service = ReviewService::new(state.service_context());
    Ok(Json(service.update(auth.user_id, review_id, request).await?))
}

/// DELETE /reviews/:review_id
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(review_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = ReviewService::new(state.service_context());
    service.delete(auth.user_id, review_id).await?;
    Ok(NoContent)
}

/// Like or dislike a review
///
/// POST /reviews/:review_id/:reaction
///
/// 201 when a new vote row is recorded, 200 when it is retracted or flipped.
pub async fn react(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((review_id, reaction)): SnowflakePath<(Snowflake, String)>,
) -> ApiResult<Response> {
    let vote = Vote::parse(&reaction)
        .ok_or_else(|| ApiError::invalid_path("reaction must be 'like' or 'dislike'"))?;

    let service = ReactionService::new(state.service_context());
    let response = service.toggle_review(review_id, auth.user_id, vote).await?;

    let status = if response.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)).into_response())
}

/// Edit history, newest first
///
/// GET /reviews/:review_id/histories
pub async fn list_histories(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(review_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<ReviewHistoryResponse>>> {
    let service = ReviewService::new(state.service_context());
    Ok(Json(service.histories(review_id).await?))
}

/// POST /reviews/:review_id/images
pub async fn add_image(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(review_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<AddReviewImageRequest>,
) -> ApiResult<Created<Json<ReviewImageResponse>>> {
    let service = ReviewService::new(state.service_context());
    let image = service.add_image(auth.user_id, review_id, request).await?;
    Ok(Created(Json(image)))
}

/// DELETE /reviews/:review_id/images/:image_id
pub async fn delete_image(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((review_id, image_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    let service = ReviewService::new(state.service_context());
    service.delete_image(auth.user_id, review_id, image_id).await?;
    Ok(NoContent)
}
