//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs and the infrastructure layer
//! provides the implementation. Aggregate counts (likes, comments, ratings)
//! are always computed from rows by the implementation, never stored.

use async_trait::async_trait;

use crate::entities::{
    Category, Comment, CommentThread, CommentWithLikes, Movie, MovieFilter, MovieStats, Ott, Post,
    PostAttachment, PostFilter, Reaction, ReactionKind, ReactionTally, ReactionTarget, Review,
    ReviewHistory, ReviewImage, ReviewOrdering, User, Vote,
};
use crate::error::DomainError;
use crate::value_objects::{Page, PageRequest, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find several users at once (missing ids are skipped)
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// OTT providers the user subscribes to
    async fn subscriptions(&self, user_id: Snowflake) -> RepoResult<Vec<Ott>>;

    /// Replace the user's subscription set
    async fn replace_subscriptions(&self, user_id: Snowflake, ott_ids: &[Snowflake])
        -> RepoResult<()>;
}

// ============================================================================
// OTT Repository
// ============================================================================

#[async_trait]
pub trait OttRepository: Send + Sync {
    /// List all providers ordered by name
    async fn list(&self) -> RepoResult<Vec<Ott>>;

    /// Find providers by id (missing ids are skipped)
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Ott>>;

    /// Insert a provider unless one with the same name exists
    async fn upsert(&self, ott: &Ott) -> RepoResult<Ott>;
}

// ============================================================================
// Movie Repository
// ============================================================================

#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Find movie by ID (with its provider ids)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Movie>>;

    /// List movies matching the filter, newest release first
    async fn list(&self, filter: &MovieFilter) -> RepoResult<Vec<Movie>>;

    /// Review aggregates for one movie
    async fn stats(&self, movie_id: Snowflake) -> RepoResult<MovieStats>;

    /// Review aggregates for several movies; movies without reviews are omitted
    async fn stats_for(&self, movie_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, MovieStats)>>;

    /// Insert a movie and its provider links unless the title exists
    async fn upsert(&self, movie: &Movie) -> RepoResult<Movie>;
}

// ============================================================================
// Review Repository
// ============================================================================

/// Filter and ordering of the review list
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewQuery {
    pub movie_id: Option<Snowflake>,
    pub ordering: ReviewOrdering,
}

/// Changes applied atomically by a review update
#[derive(Debug, Clone)]
pub struct ReviewUpdate<'a> {
    pub review: &'a Review,
    pub history: &'a ReviewHistory,
    pub new_images: &'a [ReviewImage],
    pub delete_image_ids: &'a [Snowflake],
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find review by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Review>>;

    /// Check whether the author already reviewed the movie
    async fn exists_for(&self, author_id: Snowflake, movie_id: Snowflake) -> RepoResult<bool>;

    /// List reviews with paging
    async fn list(&self, query: ReviewQuery, page: PageRequest) -> RepoResult<Page<Review>>;

    /// Create a review together with its initial images
    async fn create(&self, review: &Review, images: &[ReviewImage]) -> RepoResult<()>;

    /// Save an edit: history row, new field values and image changes in one transaction
    async fn update(&self, update: ReviewUpdate<'_>) -> RepoResult<()>;

    /// Delete a review (cascades to images, history, comments and reactions)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Edit history, newest first
    async fn histories(&self, review_id: Snowflake) -> RepoResult<Vec<ReviewHistory>>;

    /// Subset of `review_ids` that have at least one history row
    async fn edited_ids(&self, review_ids: &[Snowflake]) -> RepoResult<Vec<Snowflake>>;

    /// Images of several reviews, oldest first
    async fn images_for(&self, review_ids: &[Snowflake]) -> RepoResult<Vec<ReviewImage>>;

    /// Find a single image
    async fn find_image(&self, image_id: Snowflake) -> RepoResult<Option<ReviewImage>>;

    /// Attach an image
    async fn add_image(&self, image: &ReviewImage) -> RepoResult<()>;

    /// Remove an image
    async fn delete_image(&self, image_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID within a thread kind
    async fn find_by_id(&self, thread: CommentThread, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// All comments of a parent with their like counts, oldest first
    async fn list_with_likes(
        &self,
        thread: CommentThread,
        parent_id: Snowflake,
    ) -> RepoResult<Vec<CommentWithLikes>>;

    /// Create a comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment
    async fn delete(&self, thread: CommentThread, id: Snowflake) -> RepoResult<()>;

    /// Comment counts per parent; parents without comments are omitted
    async fn count_by_parents(
        &self,
        thread: CommentThread,
        parent_ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, i64)>>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories ordered by name
    async fn list(&self) -> RepoResult<Vec<Category>>;

    /// Find category by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Category>>;

    /// Find several categories at once
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Category>>;

    /// Insert a category unless the slug exists
    async fn upsert(&self, category: &Category) -> RepoResult<Category>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// List posts matching the filter with paging
    async fn list(&self, filter: &PostFilter, page: PageRequest) -> RepoResult<Page<Post>>;

    /// Create a post together with its attachments
    async fn create(&self, post: &Post, attachments: &[PostAttachment]) -> RepoResult<()>;

    /// Update title, content and category
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post (cascades to attachments, comments and reactions)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Add one to the view counter and return the new value
    async fn increment_views(&self, id: Snowflake) -> RepoResult<Option<i64>>;

    /// Attachments of several posts, oldest first
    async fn attachments_for(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<PostAttachment>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// The user's stored vote on a target, if any
    async fn find_vote(&self, target: ReactionTarget, user_id: Snowflake)
        -> RepoResult<Option<Vote>>;

    /// Insert a new reaction row
    async fn insert(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Change the polarity of an existing row
    async fn update_vote(&self, target: ReactionTarget, user_id: Snowflake, vote: Vote)
        -> RepoResult<()>;

    /// Delete the user's row
    async fn delete(&self, target: ReactionTarget, user_id: Snowflake) -> RepoResult<()>;

    /// Count like and dislike rows of one target
    async fn tally(&self, target: ReactionTarget) -> RepoResult<ReactionTally>;

    /// Tallies for several targets of one kind; targets without rows are omitted
    async fn tallies(
        &self,
        kind: ReactionKind,
        ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, ReactionTally)>>;

    /// The user's votes among several targets of one kind
    async fn votes_of(
        &self,
        kind: ReactionKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, Vote)>>;
}
