//! PostgreSQL implementation of ReactionRepository
//!
//! Each target kind has its own table keyed by (target, user). The table and
//! key column come from a fixed mapping, never from request input.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use cine_core::entities::{Reaction, ReactionKind, ReactionTally, ReactionTarget, Vote};
use cine_core::error::DomainError;
use cine_core::traits::{ReactionRepository, RepoResult};
use cine_core::value_objects::Snowflake;

use crate::models::{TallyModel, VoteModel};

use super::error::{map_db_error, map_unique_violation, raw_ids};

/// Table and key column storing reactions of one kind
const fn table_of(kind: ReactionKind) -> (&'static str, &'static str) {
    match kind {
        ReactionKind::Post => ("post_reactions", "post_id"),
        ReactionKind::PostComment => ("post_comment_reactions", "comment_id"),
        ReactionKind::Review => ("review_reactions", "review_id"),
        ReactionKind::ReviewComment => ("review_comment_reactions", "comment_id"),
    }
}

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find_vote(
        &self,
        target: ReactionTarget,
        user_id: Snowflake,
    ) -> RepoResult<Option<Vote>> {
        let (table, key) = table_of(target.kind);
        let sql = format!("SELECT is_like FROM {table} WHERE {key} = $1 AND user_id = $2");

        let result = sqlx::query_scalar::<_, bool>(&sql)
            .bind(target.id.into_inner())
            .bind(user_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Vote::from_is_like))
    }

    #[instrument(skip(self))]
    async fn insert(&self, reaction: &Reaction) -> RepoResult<()> {
        let (table, key) = table_of(reaction.target.kind);
        let sql = format!(
            "INSERT INTO {table} ({key}, user_id, is_like, created_at) VALUES ($1, $2, $3, $4)"
        );

        sqlx::query(&sql)
            .bind(reaction.target.id.into_inner())
            .bind(reaction.user_id.into_inner())
            .bind(reaction.vote.is_like())
            .bind(reaction.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, |_| DomainError::ReactionAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_vote(
        &self,
        target: ReactionTarget,
        user_id: Snowflake,
        vote: Vote,
    ) -> RepoResult<()> {
        let (table, key) = table_of(target.kind);
        let sql = format!("UPDATE {table} SET is_like = $3 WHERE {key} = $1 AND user_id = $2");

        sqlx::query(&sql)
            .bind(target.id.into_inner())
            .bind(user_id.into_inner())
            .bind(vote.is_like())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, target: ReactionTarget, user_id: Snowflake) -> RepoResult<()> {
        let (table, key) = table_of(target.kind);
        let sql = format!("DELETE FROM {table} WHERE {key} = $1 AND user_id = $2");

        sqlx::query(&sql)
            .bind(target.id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn tally(&self, target: ReactionTarget) -> RepoResult<ReactionTally> {
        let tallies = self.tallies(target.kind, &[target.id]).await?;
        Ok(tallies
            .into_iter()
            .next()
            .map(|(_, tally)| tally)
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn tallies(
        &self,
        kind: ReactionKind,
        ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, ReactionTally)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let (table, key) = table_of(kind);
        let sql = format!(
            "SELECT {key} AS target_id, \
                    COUNT(*) FILTER (WHERE is_like) AS like_count, \
                    COUNT(*) FILTER (WHERE NOT is_like) AS dislike_count \
             FROM {table} WHERE {key} = ANY($1) GROUP BY {key}"
        );

        let results = sqlx::query_as::<_, TallyModel>(&sql)
            .bind(raw_ids(ids))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|row| {
                (
                    Snowflake::new(row.target_id),
                    ReactionTally {
                        like_count: row.like_count,
                        dislike_count: row.dislike_count,
                    },
                )
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn votes_of(
        &self,
        kind: ReactionKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, Vote)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let (table, key) = table_of(kind);
        let sql = format!(
            "SELECT {key} AS target_id, is_like FROM {table} WHERE {key} = ANY($1) AND user_id = $2"
        );

        let results = sqlx::query_as::<_, VoteModel>(&sql)
            .bind(raw_ids(ids))
            .bind(user_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|row| (Snowflake::new(row.target_id), Vote::from_is_like(row.is_like)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReactionRepository>();
    }

    #[test]
    fn test_every_kind_has_a_table() {
        let kinds = [
            ReactionKind::Post,
            ReactionKind::PostComment,
            ReactionKind::Review,
            ReactionKind::ReviewComment,
        ];
        for kind in kinds {
            let (table, key) = table_of(kind);
            assert!(table.ends_with("_reactions"));
            assert!(key.ends_with("_id"));
        }
    }
}
