//! User handlers
//!
//! Profile and OTT subscription endpoints for the signed-in user.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use cine_service::dto::{ProfileResponse, UpdateProfileRequest, UpdateSubscriptionsRequest};
use cine_service::UserService;

use crate::extractors::{json_rejection, AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /users/@me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.profile(auth.user_id).await?))
}

/// PATCH /users/@me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.update_profile(auth.user_id, request).await?))
}

/// Replace the OTT subscription set
///
/// PUT /users/@me/subscriptions
///
/// `ott_ids` arrives untyped so a non-list value gets a field-level error.
pub async fn update_subscriptions(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<UpdateSubscriptionsRequest>, JsonRejection>,
) -> ApiResult<Json<ProfileResponse>> {
    let Json(request) = body.map_err(json_rejection)?;
    let service = UserService::new(state.service_context());
    Ok(Json(service.update_subscriptions(auth.user_id, request).await?))
}
