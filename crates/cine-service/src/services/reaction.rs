//! Reaction service
//!
//! One toggle engine for every target kind. The stored vote is read, the
//! state machine decides the transition, and exactly one row change is
//! written before the counts are recomputed.

use cine_core::{
    CommentThread, DomainError, Reaction, ReactionTarget, Snowflake, Transition, Vote, VoteState,
};
use tracing::{debug, instrument};

use crate::dto::{CommentLikeResponse, ReactionResponse};

use super::comment::CommentService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply a vote to a target that is known to exist
    async fn toggle(
        &self,
        target: ReactionTarget,
        user_id: Snowflake,
        vote: Vote,
    ) -> ServiceResult<ReactionResponse> {
        if !target.accepts(vote) {
            return Err(ServiceError::field(
                "is_like",
                format!("{} reactions are like-only", target.kind.as_str()),
            ));
        }

        let repo = self.ctx.reaction_repo();
        let stored = repo.find_vote(target, user_id).await?;
        let toggle = VoteState::from_stored(stored).apply(vote);

        match toggle.transition {
            Transition::Created(vote) => {
                repo.insert(&Reaction::new(target, user_id, vote)).await?;
            }
            Transition::Retracted => repo.delete(target, user_id).await?,
            Transition::Flipped(vote) => repo.update_vote(target, user_id, vote).await?,
        }

        let tally = repo.tally(target).await?;

        debug!(
            kind = target.kind.as_str(),
            target_id = %target.id,
            user_id = %user_id,
            transition = ?toggle.transition,
            "Reaction toggled"
        );

        Ok(ReactionResponse {
            my_vote: toggle.next.score(),
            like_count: tally.like_count,
            dislike_count: tally.dislike_count,
            created: toggle.transition.is_created(),
        })
    }

    /// Like or dislike a post
    #[instrument(skip(self))]
    pub async fn toggle_post(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        is_like: bool,
    ) -> ServiceResult<ReactionResponse> {
        if self.ctx.post_repo().find_by_id(post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(post_id).into());
        }
        self.toggle(ReactionTarget::post(post_id), user_id, Vote::from_is_like(is_like))
            .await
    }

    /// Like or dislike a comment under a post
    #[instrument(skip(self))]
    pub async fn toggle_post_comment(
        &self,
        post_id: Snowflake,
        comment_id: Snowflake,
        user_id: Snowflake,
        is_like: bool,
    ) -> ServiceResult<ReactionResponse> {
        CommentService::new(self.ctx)
            .load(CommentThread::Post, post_id, comment_id)
            .await?;
        self.toggle(
            ReactionTarget::post_comment(comment_id),
            user_id,
            Vote::from_is_like(is_like),
        )
        .await
    }

    /// Like or dislike a review
    #[instrument(skip(self))]
    pub async fn toggle_review(
        &self,
        review_id: Snowflake,
        user_id: Snowflake,
        vote: Vote,
    ) -> ServiceResult<ReactionResponse> {
        if self.ctx.review_repo().find_by_id(review_id).await?.is_none() {
            return Err(DomainError::ReviewNotFound(review_id).into());
        }
        self.toggle(ReactionTarget::review(review_id), user_id, vote)
            .await
    }

    /// Like a review comment, or take the like back
    #[instrument(skip(self))]
    pub async fn toggle_review_comment_like(
        &self,
        review_id: Snowflake,
        comment_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<CommentLikeResponse> {
        CommentService::new(self.ctx)
            .load(CommentThread::Review, review_id, comment_id)
            .await?;
        let result = self
            .toggle(ReactionTarget::review_comment(comment_id), user_id, Vote::Like)
            .await?;

        Ok(CommentLikeResponse {
            liked: result.my_vote > 0,
            like_count: result.like_count,
        })
    }
}
