//! Authentication handlers
//!
//! Endpoints for user registration, login, logout, and token refresh.
//! Successful sign-ins mirror the token pair into cookies.

use axum::{extract::State, Json};
use axum_extra::{extract::CookieJar, headers::UserAgent, TypedHeader};
use cine_service::dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest};
use cine_service::AuthService;

use crate::cookies::{clear_tokens, token_from, with_tokens, REFRESH_TOKEN_COOKIE};
use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

fn agent(user_agent: Option<TypedHeader<UserAgent>>) -> Option<String> {
    user_agent.map(|TypedHeader(ua)| ua.as_str().to_string())
}

/// Body token first, then the `refresh_token` cookie
fn refresh_token(body: Option<Json<RefreshTokenRequest>>, jar: &CookieJar) -> Option<String> {
    body.and_then(|Json(b)| b.refresh_token)
        .filter(|t| !t.is_empty())
        .or_else(|| token_from(jar, REFRESH_TOKEN_COOKIE))
}

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    user_agent: Option<TypedHeader<UserAgent>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<(CookieJar, Json<AuthResponse>)>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request, agent(user_agent)).await?;
    let jar = with_tokens(jar, &response, state.secure_cookies());
    Ok(Created((jar, Json(response))))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    user_agent: Option<TypedHeader<UserAgent>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request, agent(user_agent)).await?;
    let jar = with_tokens(jar, &response, state.secure_cookies());
    Ok((jar, Json(response)))
}

/// Rotate the token pair
///
/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    user_agent: Option<TypedHeader<UserAgent>>,
    body: Option<Json<RefreshTokenRequest>>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let token = refresh_token(body, &jar);
    let service = AuthService::new(state.service_context());
    let response = service.refresh(token, agent(user_agent)).await?;
    let jar = with_tokens(jar, &response, state.secure_cookies());
    Ok((jar, Json(response)))
}

/// Revoke the session and clear cookies
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshTokenRequest>>,
) -> ApiResult<(CookieJar, NoContent)> {
    let token = refresh_token(body, &jar);
    AuthService::new(state.service_context()).logout(token).await?;
    Ok((clear_tokens(jar), NoContent))
}
