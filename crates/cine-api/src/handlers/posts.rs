//! Board handlers
//!
//! Categories, posts, view counter and post likes.

use axum::{extract::State, Json};
use cine_core::{Page, Snowflake};
use cine_service::dto::{
    CategoryResponse, CreatePostRequest, LikeRequest, PostListQuery, PostResponse,
    ReactionResponse, UpdatePostRequest, ViewCountResponse,
};
use cine_service::{BoardService, ReactionService};

use crate::extractors::{
    AuthUser, OptionalAuthUser, Paged, SnowflakePath, ValidatedJson, ValidatedQuery,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let service = BoardService::new(state.service_context());
    Ok(Json(service.categories().await?))
}

/// Paged post list
///
/// GET /posts?category=hot&search_type=title&search=...&page=2
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Paged(page): Paged,
    ValidatedQuery(query): ValidatedQuery<PostListQuery>,
) -> ApiResult<Json<Page<PostResponse>>> {
    let service = BoardService::new(state.service_context());
    let posts = service.list_posts(query, page, viewer.user_id()).await?;
    Ok(Json(posts))
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = BoardService::new(state.service_context());
    let post = service.create_post(auth.user_id, request).await?;
    Ok(Created(Json(post)))
}

/// Post detail; reading does not count as a view
///
/// GET /posts/:post_id
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<PostResponse>> {
    let service = BoardService::new(state.service_context());
    Ok(Json(service.get_post(post_id, viewer.user_id()).await?))
}

/// PATCH /posts/:post_id
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = BoardService::new(state.service_context());
    Ok(Json(service.update_post(auth.user_id, post_id, request).await?))
}

/// DELETE /posts/:post_id
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = BoardService::new(state.service_context());
    service.delete_post(auth.user_id, post_id).await?;
    Ok(NoContent)
}

/// POST /posts/:post_id/view
pub async fn record_view(
    State(state): State<AppState>,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<ViewCountResponse>> {
    let service = BoardService::new(state.service_context());
    Ok(Json(service.record_view(post_id).await?))
}

/// POST /posts/:post_id/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<LikeRequest>,
) -> ApiResult<Json<ReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service
        .toggle_post(post_id, auth.user_id, request.is_like)
        .await?;
    Ok(Json(response))
}
