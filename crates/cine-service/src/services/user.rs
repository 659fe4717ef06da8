//! User service
//!
//! Handles the current user's profile and OTT subscriptions.

use cine_common::auth::validate_username;
use cine_core::entities::User;
use cine_core::{DomainError, Snowflake};
use serde_json::Value;
use tracing::{info, instrument};

use crate::dto::{ProfileResponse, UpdateProfileRequest, UpdateSubscriptionsRequest};

use super::auth::field_error;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Parse the raw `ott_ids` value; it must be a JSON list of ids
pub fn parse_ott_ids(raw: Option<&Value>) -> ServiceResult<Vec<Snowflake>> {
    let Some(Value::Array(items)) = raw else {
        return Err(ServiceError::field("ott_ids", "ott_ids must be a list"));
    };

    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        let id = match item {
            Value::String(s) => Snowflake::parse(s).ok(),
            Value::Number(n) => n.as_i64().map(Snowflake::new),
            _ => None,
        }
        .ok_or_else(|| ServiceError::field("ott_ids", format!("invalid id: {item}")))?;

        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    async fn render(&self, user: &User) -> ServiceResult<ProfileResponse> {
        let subscriptions = self.ctx.user_repo().subscriptions(user.id).await?;
        Ok(ProfileResponse::new(user, &subscriptions))
    }

    /// Get the current user's profile
    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: Snowflake) -> ServiceResult<ProfileResponse> {
        let user = self.load(user_id).await?;
        self.render(&user).await
    }

    /// Change the username
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let username = request.username.trim().to_string();
        validate_username(&username).map_err(field_error("username"))?;

        let mut user = self.load(user_id).await?;

        if username != user.username {
            if self.ctx.user_repo().username_exists(&username).await? {
                return Err(DomainError::UsernameAlreadyExists.into());
            }
            user.set_username(username);
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user_id, "Username changed");
        }

        self.render(&user).await
    }

    /// Replace the subscription set
    #[instrument(skip(self, request))]
    pub async fn update_subscriptions(
        &self,
        user_id: Snowflake,
        request: UpdateSubscriptionsRequest,
    ) -> ServiceResult<ProfileResponse> {
        let ott_ids = parse_ott_ids(request.ott_ids.as_ref())?;

        let known = self.ctx.ott_repo().find_by_ids(&ott_ids).await?;
        if let Some(unknown) = ott_ids.iter().find(|id| !known.iter().any(|o| o.id == **id)) {
            return Err(ServiceError::field(
                "ott_ids",
                format!("unknown OTT provider: {unknown}"),
            ));
        }

        let user = self.load(user_id).await?;
        self.ctx
            .user_repo()
            .replace_subscriptions(user.id, &ott_ids)
            .await?;

        info!(user_id = %user_id, count = ott_ids.len(), "Subscriptions replaced");

        self.render(&user).await
    }
}
