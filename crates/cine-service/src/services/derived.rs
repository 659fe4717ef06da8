//! Batched lookups for per-request derived fields
//!
//! Each list view loads its counts, the viewer's votes and the author names
//! in one query per kind, never one per row.

use std::collections::HashMap;

use cine_core::{CommentThread, ReactionKind, ReactionTally, Snowflake, Vote, VoteState};

use crate::dto::AuthorDirectory;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction counts and the viewer's votes for a batch of targets
#[derive(Debug, Default)]
pub(crate) struct ReactionLookup {
    tallies: HashMap<Snowflake, ReactionTally>,
    votes: HashMap<Snowflake, Vote>,
}

impl ReactionLookup {
    pub(crate) async fn load(
        ctx: &ServiceContext,
        kind: ReactionKind,
        ids: &[Snowflake],
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Self> {
        if ids.is_empty() {
            return Ok(Self::default());
        }

        let tallies = ctx.reaction_repo().tallies(kind, ids).await?.into_iter().collect();
        let votes = match viewer {
            Some(user_id) => ctx
                .reaction_repo()
                .votes_of(kind, ids, user_id)
                .await?
                .into_iter()
                .collect(),
            None => HashMap::new(),
        };

        Ok(Self { tallies, votes })
    }

    pub(crate) fn tally(&self, id: Snowflake) -> ReactionTally {
        self.tallies.get(&id).copied().unwrap_or_default()
    }

    pub(crate) fn state(&self, id: Snowflake) -> VoteState {
        VoteState::from_stored(self.votes.get(&id).copied())
    }
}

/// Usernames for the given author ids
pub(crate) async fn authors(
    ctx: &ServiceContext,
    ids: impl IntoIterator<Item = Snowflake>,
) -> ServiceResult<AuthorDirectory> {
    let mut unique: Vec<Snowflake> = ids.into_iter().collect();
    unique.sort_unstable();
    unique.dedup();

    if unique.is_empty() {
        return Ok(AuthorDirectory::default());
    }
    let users = ctx.user_repo().find_by_ids(&unique).await?;
    Ok(AuthorDirectory::new(users))
}

/// Comment counts per parent
pub(crate) async fn comment_counts(
    ctx: &ServiceContext,
    thread: CommentThread,
    parent_ids: &[Snowflake],
) -> ServiceResult<HashMap<Snowflake, i64>> {
    if parent_ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(ctx
        .comment_repo()
        .count_by_parents(thread, parent_ids)
        .await?
        .into_iter()
        .collect())
}
