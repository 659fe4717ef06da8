//! # cine-cache
//!
//! Redis layer for authentication sessions.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: Refresh token sessions that expire with the token
//!
//! ## Example
//!
//! ```ignore
//! use cine_cache::{RedisPool, RedisPoolConfig, RefreshTokenData, RefreshTokenStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = RefreshTokenStore::with_ttl(pool, 86_400);
//!
//! sessions.store(&RefreshTokenData::new(user_id, session_id)).await?;
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};

// Re-export session types
pub use session::{RefreshTokenData, RefreshTokenStore};
