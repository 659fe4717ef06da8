//! Authentication service
//!
//! Handles user registration, login, token refresh, and logout. Every issued
//! refresh token names a session kept in Redis; refreshing rotates the
//! session and logging out revokes it.

use cine_cache::RefreshTokenData;
use cine_common::auth::{hash_password, validate_password_strength, validate_username, verify_password};
use cine_common::AppError;
use cine_core::entities::User;
use cine_core::DomainError;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Turn a validation failure from the auth helpers into a field error
pub(crate) fn field_error(field: &'static str) -> impl Fn(AppError) -> ServiceError {
    move |err| match err {
        AppError::Validation(message) => ServiceError::field(field, message),
        other => ServiceError::App(other),
    }
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request, user_agent), fields(username = %request.username, email = %request.email))]
    pub async fn register(
        &self,
        request: RegisterRequest,
        user_agent: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();
        let username = request.username.trim().to_string();

        validate_username(&username).map_err(field_error("username"))?;
        validate_password_strength(&request.password).map_err(field_error("password"))?;

        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().username_exists(&username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let user = User::new(self.ctx.generate_id(), username, email);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        self.open_session(&user, user_agent).await
    }

    /// Login with email and password
    #[instrument(skip(self, request, user_agent), fields(email = %request.email))]
    pub async fn login(
        &self,
        request: LoginRequest,
        user_agent: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in");

        self.open_session(&user, user_agent).await
    }

    /// Rotate a refresh token: the old session is revoked and a new pair issued
    #[instrument(skip(self, refresh_token, user_agent))]
    pub async fn refresh(
        &self,
        refresh_token: Option<String>,
        user_agent: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(ServiceError::App(AppError::MissingAuth))?;

        let (user_id, session_id) = self.ctx.jwt_service().refresh_session(&token)?;

        let store = self.ctx.refresh_token_store();
        if store.validate(&session_id, user_id).await?.is_none() {
            warn!(user_id = %user_id, "Refresh rejected: session not open");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        store.revoke(&session_id).await?;

        info!(user_id = %user.id, "Tokens refreshed");

        self.open_session(&user, user_agent).await
    }

    /// Revoke the session named by a refresh token
    ///
    /// Logging out never fails on a bad or missing token; there is simply
    /// nothing to revoke.
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: Option<String>) -> ServiceResult<()> {
        let Some(token) = refresh_token.filter(|t| !t.is_empty()) else {
            return Ok(());
        };

        match self.ctx.jwt_service().refresh_session(&token) {
            Ok((user_id, session_id)) => {
                self.ctx
                    .refresh_token_store()
                    .revoke(&session_id)
                    .await?;
                info!(user_id = %user_id, "User logged out");
            }
            Err(err) => warn!(error = %err, "Logout with unusable refresh token"),
        }

        Ok(())
    }

    /// Issue a token pair bound to a fresh session
    async fn open_session(
        &self,
        user: &User,
        user_agent: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        let session_id = Uuid::new_v4().to_string();
        let jwt = self.ctx.jwt_service();
        let tokens = jwt.issue(user.id, &session_id)?;

        let mut data = RefreshTokenData::new(user.id, session_id);
        if let Some(agent) = user_agent {
            data = data.with_user_agent(agent);
        }
        self.ctx.refresh_token_store().store(&data).await?;

        Ok(AuthResponse::new(
            tokens.access_token,
            tokens.refresh_token,
            tokens.access_expires_in,
            tokens.refresh_expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}
