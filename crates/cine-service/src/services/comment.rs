//! Comment service
//!
//! Comments live under either a post or a review. Listing applies the ranked
//! order configured for that thread kind.

use cine_core::entities::Comment;
use cine_core::{CommentThread, DomainError, OwnedResource, ReactionKind, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CommentWithDetails, CreateCommentRequest};

use super::context::ServiceContext;
use super::derived::{authors, ReactionLookup};
use super::error::ServiceResult;

/// Longest accepted comment body, in characters
pub const MAX_COMMENT_LENGTH: usize = 2000;

fn reaction_kind(thread: CommentThread) -> ReactionKind {
    match thread {
        CommentThread::Post => ReactionKind::PostComment,
        CommentThread::Review => ReactionKind::ReviewComment,
    }
}

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fail with the parent's not-found error unless it exists
    pub(crate) async fn ensure_parent(
        &self,
        thread: CommentThread,
        parent_id: Snowflake,
    ) -> ServiceResult<()> {
        let exists = match thread {
            CommentThread::Post => self.ctx.post_repo().find_by_id(parent_id).await?.is_some(),
            CommentThread::Review => self.ctx.review_repo().find_by_id(parent_id).await?.is_some(),
        };
        if exists {
            return Ok(());
        }
        Err(match thread {
            CommentThread::Post => DomainError::PostNotFound(parent_id),
            CommentThread::Review => DomainError::ReviewNotFound(parent_id),
        }
        .into())
    }

    /// Load a comment and check that it hangs off the given parent
    pub(crate) async fn load(
        &self,
        thread: CommentThread,
        parent_id: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(thread, comment_id)
            .await?
            .filter(|c| c.parent_id == parent_id)
            .ok_or_else(|| DomainError::CommentNotFound(comment_id).into())
    }

    /// All comments of a parent: ranked head, then the rest oldest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        thread: CommentThread,
        parent_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<CommentResponse>> {
        self.ensure_parent(thread, parent_id).await?;

        let policy = match thread {
            CommentThread::Post => self.ctx.post_comment_ranking(),
            CommentThread::Review => self.ctx.review_comment_ranking(),
        };

        let comments = self.ctx.comment_repo().list_with_likes(thread, parent_id).await?;
        let ordered = policy.rank(comments).into_ordered();

        let ids: Vec<Snowflake> = ordered.iter().map(|c| c.comment.id).collect();
        let reactions = ReactionLookup::load(self.ctx, reaction_kind(thread), &ids, viewer).await?;
        let directory = authors(self.ctx, ordered.iter().map(|c| c.comment.author_id)).await?;

        Ok(ordered
            .into_iter()
            .map(|entry| {
                let comment = entry.comment;
                CommentResponse::from(CommentWithDetails {
                    author: directory.get(comment.author_id),
                    tally: reactions.tally(comment.id),
                    my_vote: reactions.state(comment.id),
                    comment,
                })
            })
            .collect())
    }

    /// Add a comment under a post or review
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        thread: CommentThread,
        parent_id: Snowflake,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let content = request.content.trim();
        if content.is_empty() {
            return Err(DomainError::invalid_field("content", "Content is required").into());
        }
        if content.chars().count() > MAX_COMMENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: MAX_COMMENT_LENGTH,
            }
            .into());
        }

        self.ensure_parent(thread, parent_id).await?;

        let comment = Comment::new(
            self.ctx.generate_id(),
            thread,
            parent_id,
            author_id,
            content.to_string(),
        );
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, parent_id = %parent_id, "Comment created");

        let directory = authors(self.ctx, [author_id]).await?;
        Ok(CommentResponse::from(CommentWithDetails {
            author: directory.get(author_id),
            tally: Default::default(),
            my_vote: Default::default(),
            comment,
        }))
    }

    /// Delete a comment (author or staff)
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        thread: CommentThread,
        parent_id: Snowflake,
        comment_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<()> {
        let comment = self.load(thread, parent_id, comment_id).await?;
        let actor = self.ctx.actor(actor_id).await?;
        OwnedResource::comment(&comment).ensure_can_delete(&actor)?;

        self.ctx.comment_repo().delete(thread, comment_id).await?;

        info!(comment_id = %comment_id, actor_id = %actor_id, "Comment deleted");
        Ok(())
    }
}
