//! Comment handlers
//!
//! Post and review comment threads share one service; each route pins the
//! thread it belongs to.

use axum::{extract::State, Json};
use cine_core::{CommentThread, Snowflake};
use cine_service::dto::{
    CommentLikeResponse, CommentResponse, CreateCommentRequest, LikeRequest, ReactionResponse,
};
use cine_service::{CommentService, ReactionService};

use crate::extractors::{AuthUser, OptionalAuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

async fn list(
    state: &AppState,
    thread: CommentThread,
    parent_id: Snowflake,
    viewer: OptionalAuthUser,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.list(thread, parent_id, viewer.user_id()).await?))
}

async fn create(
    state: &AppState,
    thread: CommentThread,
    parent_id: Snowflake,
    auth: AuthUser,
    request: CreateCommentRequest,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .create(thread, parent_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(comment)))
}

async fn delete(
    state: &AppState,
    thread: CommentThread,
    (parent_id, comment_id): (Snowflake, Snowflake),
    auth: AuthUser,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service
        .delete(thread, parent_id, comment_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Ranked comments: top liked first, with a like floor
///
/// GET /posts/:post_id/comments
pub async fn list_post_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    list(&state, CommentThread::Post, post_id, viewer).await
}

/// POST /posts/:post_id/comments
pub async fn create_post_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    create(&state, CommentThread::Post, post_id, auth, request).await
}

/// DELETE /posts/:post_id/comments/:comment_id
pub async fn delete_post_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(ids): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    delete(&state, CommentThread::Post, ids, auth).await
}

/// POST /posts/:post_id/comments/:comment_id/like
pub async fn toggle_post_comment_like(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((post_id, comment_id)): SnowflakePath<(Snowflake, Snowflake)>,
    ValidatedJson(request): ValidatedJson<LikeRequest>,
) -> ApiResult<Json<ReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service
        .toggle_post_comment(post_id, comment_id, auth.user_id, request.is_like)
        .await?;
    Ok(Json(response))
}

/// Ranked comments without a like floor
///
/// GET /reviews/:review_id/comments
pub async fn list_review_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SnowflakePath(review_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    list(&state, CommentThread::Review, review_id, viewer).await
}

/// POST /reviews/:review_id/comments
pub async fn create_review_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(review_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    create(&state, CommentThread::Review, review_id, auth, request).await
}

/// DELETE /reviews/:review_id/comments/:comment_id
pub async fn delete_review_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(ids): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<NoContent> {
    delete(&state, CommentThread::Review, ids, auth).await
}

/// Like-only toggle
///
/// POST /reviews/:review_id/comments/:comment_id/like
pub async fn toggle_review_comment_like(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath((review_id, comment_id)): SnowflakePath<(Snowflake, Snowflake)>,
) -> ApiResult<Json<CommentLikeResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service
        .toggle_review_comment_like(review_id, comment_id, auth.user_id)
        .await?;
    Ok(Json(response))
}
