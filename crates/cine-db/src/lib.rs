//! # cine-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `cine-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//! - Reference seed data
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cine_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use cine_db::repositories::PgMovieRepository;
//! use cine_core::traits::MovieRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let movies = PgMovieRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod seed;

// Re-export commonly used types
pub use pool::{
    create_pool, create_pool_from_env, run_migrations, run_migrations_from, DatabaseConfig,
    PgPool, MIGRATIONS_DIR,
};
pub use repositories::{
    PgCategoryRepository, PgCommentRepository, PgMovieRepository, PgOttRepository,
    PgPostRepository, PgReactionRepository, PgReviewRepository, PgUserRepository,
};
pub use seed::{seed, SeedReport};
