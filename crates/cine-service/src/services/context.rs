//! Service context - dependency container for services
//!
//! Holds all repositories, the session store and the community knobs needed by services.

use std::sync::Arc;

use cine_cache::{RefreshTokenStore, SharedRedisPool};
use cine_common::auth::JwtService;
use cine_common::CommunityConfig;
use cine_core::traits::{
    CategoryRepository, CommentRepository, MovieRepository, OttRepository, PostRepository,
    ReactionRepository, ReviewRepository, UserRepository,
};
use cine_core::{Actor, RankingPolicy, Snowflake, SnowflakeGenerator};
use cine_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    ott_repo: Arc<dyn OttRepository>,
    movie_repo: Arc<dyn MovieRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    post_repo: Arc<dyn PostRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    refresh_token_store: RefreshTokenStore,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    community: CommunityConfig,
}

impl ServiceContext {
    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn ott_repo(&self) -> &dyn OttRepository {
        self.ott_repo.as_ref()
    }

    pub fn movie_repo(&self) -> &dyn MovieRepository {
        self.movie_repo.as_ref()
    }

    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    // === Sessions ===

    /// Get the refresh session store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Board and ranking settings
    pub fn community(&self) -> &CommunityConfig {
        &self.community
    }

    /// Ranking for post comment threads (with a like floor)
    pub fn post_comment_ranking(&self) -> RankingPolicy {
        RankingPolicy::with_floor(
            self.community.top_comment_count,
            self.community.post_top_comment_min_likes,
        )
    }

    /// Ranking for review comment threads (no floor)
    pub fn review_comment_ranking(&self) -> RankingPolicy {
        RankingPolicy::new(self.community.top_comment_count)
    }

    /// Load the acting user with their moderator flag
    ///
    /// The token only carries the user id, so staff status is read fresh.
    pub async fn actor(&self, user_id: Snowflake) -> ServiceResult<Actor> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;
        Ok(Actor::new(user.id, user.is_staff))
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("community", &self.community)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    ott_repo: Option<Arc<dyn OttRepository>>,
    movie_repo: Option<Arc<dyn MovieRepository>>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    community: Option<CommunityConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn ott_repo(mut self, repo: Arc<dyn OttRepository>) -> Self {
        self.ott_repo = Some(repo);
        self
    }

    pub fn movie_repo(mut self, repo: Arc<dyn MovieRepository>) -> Self {
        self.movie_repo = Some(repo);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Community settings; defaults apply when not set
    pub fn community(mut self, community: CommunityConfig) -> Self {
        self.community = Some(community);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let jwt_service = self
            .jwt_service
            .ok_or_else(|| ServiceError::validation("jwt_service is required"))?;
        let redis_pool = self
            .redis_pool
            .ok_or_else(|| ServiceError::validation("redis_pool is required"))?;

        let ttl = u64::try_from(jwt_service.refresh_token_expiry()).unwrap_or(0);
        let refresh_token_store = RefreshTokenStore::with_ttl((*redis_pool).clone(), ttl);

        Ok(ServiceContext {
            pool: self.pool.ok_or_else(|| ServiceError::validation("pool is required"))?,
            redis_pool,
            user_repo: self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            ott_repo: self.ott_repo.ok_or_else(|| ServiceError::validation("ott_repo is required"))?,
            movie_repo: self.movie_repo.ok_or_else(|| ServiceError::validation("movie_repo is required"))?,
            review_repo: self.review_repo.ok_or_else(|| ServiceError::validation("review_repo is required"))?,
            comment_repo: self.comment_repo.ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            category_repo: self.category_repo.ok_or_else(|| ServiceError::validation("category_repo is required"))?,
            post_repo: self.post_repo.ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            reaction_repo: self.reaction_repo.ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            refresh_token_store,
            jwt_service,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            community: self.community.unwrap_or_default(),
        })
    }
}
