//! Ownership checks for user-authored content
//!
//! Every mutable resource is wrapped in [`OwnedResource`] so that edit and
//! delete permissions are decided in one place.

use crate::entities::{Comment, CommentThread, Post, Review, ReviewImage};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// The authenticated user performing an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Snowflake,
    pub is_staff: bool,
}

impl Actor {
    pub fn new(id: Snowflake, is_staff: bool) -> Self {
        Self { id, is_staff }
    }
}

/// A resource with a single owning user
#[derive(Debug, Clone, Copy)]
pub enum OwnedResource<'a> {
    Post(&'a Post),
    PostComment(&'a Comment),
    Review(&'a Review),
    ReviewComment(&'a Comment),
    /// Images belong to whoever owns the parent review
    ReviewImage {
        image: &'a ReviewImage,
        review: &'a Review,
    },
}

impl<'a> OwnedResource<'a> {
    /// Wrap a comment according to its thread
    pub fn comment(comment: &'a Comment) -> Self {
        match comment.thread {
            CommentThread::Post => Self::PostComment(comment),
            CommentThread::Review => Self::ReviewComment(comment),
        }
    }

    pub fn owner_id(&self) -> Snowflake {
        match self {
            Self::Post(post) => post.author_id,
            Self::PostComment(comment) | Self::ReviewComment(comment) => comment.author_id,
            Self::Review(review) | Self::ReviewImage { review, .. } => review.author_id,
        }
    }

    pub fn id(&self) -> Snowflake {
        match self {
            Self::Post(post) => post.id,
            Self::PostComment(comment) | Self::ReviewComment(comment) => comment.id,
            Self::Review(review) => review.id,
            Self::ReviewImage { image, .. } => image.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Post(_) => "post",
            Self::PostComment(_) => "post comment",
            Self::Review(_) => "review",
            Self::ReviewComment(_) => "review comment",
            Self::ReviewImage { .. } => "review image",
        }
    }

    #[inline]
    pub fn is_owned_by(&self, actor: &Actor) -> bool {
        self.owner_id() == actor.id
    }

    /// Only the owner may edit
    pub fn ensure_can_modify(&self, actor: &Actor) -> Result<(), DomainError> {
        if self.is_owned_by(actor) {
            Ok(())
        } else {
            Err(DomainError::NotOwner(self.kind()))
        }
    }

    /// The owner or a staff moderator may delete
    pub fn ensure_can_delete(&self, actor: &Actor) -> Result<(), DomainError> {
        if self.is_owned_by(actor) || actor.is_staff {
            Ok(())
        } else {
            Err(DomainError::NotOwner(self.kind()))
        }
    }
}
