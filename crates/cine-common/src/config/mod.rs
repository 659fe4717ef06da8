//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CommunityConfig, ConfigError, CorsConfig, DatabaseConfig,
    Environment, JwtConfig, RateLimitConfig, RedisConfig, ServerConfig, SnowflakeConfig,
};
