//! PostgreSQL implementation of CommentRepository
//!
//! Post and review comments live in separate tables with the same shape;
//! [`ThreadTables`] selects the table names for a thread kind.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use cine_core::entities::{Comment, CommentThread, CommentWithLikes};
use cine_core::error::DomainError;
use cine_core::traits::{CommentRepository, RepoResult};
use cine_core::value_objects::Snowflake;

use crate::models::{CommentModel, CommentWithLikesModel, CountModel};

use super::error::{map_db_error, map_write_error, raw_ids};

/// Table names backing one thread kind
struct ThreadTables {
    comments: &'static str,
    parent_column: &'static str,
    reactions: &'static str,
}

impl ThreadTables {
    const fn of(thread: CommentThread) -> Self {
        match thread {
            CommentThread::Post => Self {
                comments: "post_comments",
                parent_column: "post_id",
                reactions: "post_comment_reactions",
            },
            CommentThread::Review => Self {
                comments: "review_comments",
                parent_column: "review_id",
                reactions: "review_comment_reactions",
            },
        }
    }
}

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, thread: CommentThread, id: Snowflake) -> RepoResult<Option<Comment>> {
        let t = ThreadTables::of(thread);
        let sql = format!(
            "SELECT id, {parent} AS parent_id, author_id, content, created_at \
             FROM {comments} WHERE id = $1",
            parent = t.parent_column,
            comments = t.comments,
        );

        let result = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(|m| m.into_entity(thread)))
    }

    #[instrument(skip(self))]
    async fn list_with_likes(
        &self,
        thread: CommentThread,
        parent_id: Snowflake,
    ) -> RepoResult<Vec<CommentWithLikes>> {
        let t = ThreadTables::of(thread);
        let sql = format!(
            "SELECT c.id, c.{parent} AS parent_id, c.author_id, c.content, c.created_at, \
                    COUNT(r.user_id) FILTER (WHERE r.is_like) AS like_count \
             FROM {comments} c \
             LEFT JOIN {reactions} r ON r.comment_id = c.id \
             WHERE c.{parent} = $1 \
             GROUP BY c.id \
             ORDER BY c.created_at, c.id",
            parent = t.parent_column,
            comments = t.comments,
            reactions = t.reactions,
        );

        let results = sqlx::query_as::<_, CommentWithLikesModel>(&sql)
            .bind(parent_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(|m| m.into_entity(thread)).collect())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let t = ThreadTables::of(comment.thread);
        let sql = format!(
            "INSERT INTO {comments} (id, {parent}, author_id, content, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
            parent = t.parent_column,
            comments = t.comments,
        );

        sqlx::query(&sql)
            .bind(comment.id.into_inner())
            .bind(comment.parent_id.into_inner())
            .bind(comment.author_id.into_inner())
            .bind(&comment.content)
            .bind(comment.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, thread: CommentThread, id: Snowflake) -> RepoResult<()> {
        let t = ThreadTables::of(thread);
        let sql = format!("DELETE FROM {} WHERE id = $1", t.comments);

        let result = sqlx::query(&sql)
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_parents(
        &self,
        thread: CommentThread,
        parent_ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }

        let t = ThreadTables::of(thread);
        let sql = format!(
            "SELECT {parent} AS parent_id, COUNT(*) AS count \
             FROM {comments} WHERE {parent} = ANY($1) GROUP BY {parent}",
            parent = t.parent_column,
            comments = t.comments,
        );

        let results = sqlx::query_as::<_, CountModel>(&sql)
            .bind(raw_ids(parent_ids))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|row| (Snowflake::new(row.parent_id), row.count))
            .collect())
    }
}
