//! Authentication extractor
//!
//! Reads the access token from the `Authorization: Bearer` header, falling
//! back to the `access_token` cookie.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use cine_common::JwtService;
use cine_core::Snowflake;

use crate::cookies::{token_from, ACCESS_TOKEN_COOKIE};
use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the JWT token
    pub user_id: Snowflake,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

/// Where the access token came from
enum Credential {
    Header(String),
    Cookie(String),
}

async fn credential<S: Send + Sync>(parts: &mut Parts, state: &S) -> Option<Credential> {
    if let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
    {
        return Some(Credential::Header(bearer.token().to_string()));
    }

    let jar = CookieJar::from_headers(&parts.headers);
    token_from(&jar, ACCESS_TOKEN_COOKIE).map(Credential::Cookie)
}

fn verify(jwt: &JwtService, token: &str) -> Result<AuthUser, ApiError> {
    let claims = jwt.validate_access_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Invalid access token");
        ApiError::InvalidAuthFormat
    })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::warn!(error = %e, "Invalid user ID in token");
        ApiError::InvalidAuthFormat
    })?;

    Ok(AuthUser::new(user_id))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = match credential(parts, state).await.ok_or(ApiError::MissingAuth)? {
            Credential::Header(token) | Credential::Cookie(token) => token,
        };

        let app_state = AppState::from_ref(state);
        verify(app_state.jwt_service(), &token)
    }
}

/// Optional authenticated user
///
/// A bad bearer header is still rejected. A stale cookie is treated as
/// anonymous so expired browser sessions can keep reading.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    /// The viewer's id, if any
    pub fn user_id(&self) -> Option<Snowflake> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        match credential(parts, state).await {
            None => Ok(OptionalAuthUser(None)),
            Some(Credential::Header(token)) => {
                verify(app_state.jwt_service(), &token).map(|user| OptionalAuthUser(Some(user)))
            }
            Some(Credential::Cookie(token)) => {
                Ok(OptionalAuthUser(verify(app_state.jwt_service(), &token).ok()))
            }
        }
    }
}
