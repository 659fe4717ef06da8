//! # cine-core
//!
//! Domain layer containing entities, value objects, the reaction state
//! machine, comment ranking, ownership rules and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod policies;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Category, CategoryFilter, Comment, CommentThread, CommentWithLikes, Movie, MovieFilter,
    MovieStats, Ott, Post, PostAttachment, PostFilter, Reaction, ReactionKind, ReactionTally,
    ReactionTarget, Review, ReviewHistory, ReviewImage, ReviewOrdering, SearchType, Toggle,
    Transition, User, Vote, VoteState,
};
pub use error::DomainError;
pub use policies::{resolve_thumbnail, Actor, OwnedResource, Rankable, RankedComments, RankingPolicy};
pub use traits::{
    CategoryRepository, CommentRepository, MovieRepository, OttRepository, PostRepository,
    ReactionRepository, RepoResult, ReviewQuery, ReviewRepository, ReviewUpdate, UserRepository,
};
pub use value_objects::{
    round_average, Page, PageRequest, Rating, RatingError, Snowflake, SnowflakeGenerator,
    SnowflakeParseError,
};
