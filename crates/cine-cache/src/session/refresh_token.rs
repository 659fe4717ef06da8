//! Refresh token sessions in Redis.
//!
//! Each login opens a session keyed by its session id; the refresh token
//! carries that id in its claims. A session lives exactly as long as its
//! refresh token, and rotation or logout deletes it.

use crate::pool::{RedisPool, RedisResult};
use cine_core::Snowflake;
use serde::{Deserialize, Serialize};

const SESSION_PREFIX: &str = "refresh_session:";

/// Stored refresh session data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenData {
    pub user_id: Snowflake,
    pub session_id: String,
    /// Unix epoch seconds
    pub created_at: i64,
    pub user_agent: Option<String>,
}

impl RefreshTokenData {
    #[must_use]
    pub fn new(user_id: Snowflake, session_id: String) -> Self {
        Self {
            user_id,
            session_id,
            created_at: chrono::Utc::now().timestamp(),
            user_agent: None,
        }
    }

    /// Record the client's user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Open refresh sessions
#[derive(Clone)]
pub struct RefreshTokenStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RefreshTokenStore {
    /// `ttl_seconds` should match the refresh token expiry
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }

    /// Open a session
    pub async fn store(&self, data: &RefreshTokenData) -> RedisResult<()> {
        self.pool
            .put_json(&Self::key(&data.session_id), data, self.ttl_seconds)
            .await?;

        tracing::debug!(
            user_id = %data.user_id,
            session_id = %data.session_id,
            "Stored refresh session"
        );
        Ok(())
    }

    /// Return the session if it is still open and belongs to `user_id`
    pub async fn validate(
        &self,
        session_id: &str,
        user_id: Snowflake,
    ) -> RedisResult<Option<RefreshTokenData>> {
        let data: Option<RefreshTokenData> = self.pool.get_json(&Self::key(session_id)).await?;
        Ok(data.filter(|d| d.user_id == user_id))
    }

    /// Close a session, reporting whether it was still open
    pub async fn revoke(&self, session_id: &str) -> RedisResult<bool> {
        let deleted = self.pool.delete(&Self::key(session_id)).await?;
        if deleted {
            tracing::debug!(session_id = %session_id, "Revoked refresh session");
        }
        Ok(deleted)
    }
}
