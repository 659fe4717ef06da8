//! Domain entities - core business objects

mod comment;
mod movie;
mod ott;
mod post;
mod reaction;
mod review;
mod user;

pub use comment::{Comment, CommentThread, CommentWithLikes};
pub use movie::{Movie, MovieFilter, MovieStats};
pub use ott::Ott;
pub use post::{Category, CategoryFilter, Post, PostAttachment, PostFilter, SearchType};
pub use reaction::{
    Reaction, ReactionKind, ReactionTally, ReactionTarget, Toggle, Transition, Vote, VoteState,
};
pub use review::{Review, ReviewHistory, ReviewImage, ReviewOrdering};
pub use user::User;
