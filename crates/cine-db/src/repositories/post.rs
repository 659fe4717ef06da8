//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use cine_core::entities::{CategoryFilter, Post, PostAttachment, PostFilter, SearchType};
use cine_core::error::DomainError;
use cine_core::traits::{PostRepository, RepoResult};
use cine_core::value_objects::{Page, PageRequest, Snowflake};

use crate::models::{PostAttachmentModel, PostModel};

use super::error::{contains_pattern, map_db_error, map_write_error, raw_ids};

/// Joins needed by every post list filter
const LIST_FROM: &str = " FROM posts p \
     JOIN users u ON u.id = p.author_id \
     JOIN categories c ON c.id = p.category_id \
     LEFT JOIN LATERAL ( \
         SELECT COUNT(*) AS like_count FROM post_reactions pr \
         WHERE pr.post_id = p.id AND pr.is_like \
     ) l ON TRUE";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause for a post filter; every part is ANDed
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &PostFilter) {
    query.push(" WHERE TRUE");

    match &filter.category {
        CategoryFilter::All => {}
        CategoryFilter::Hot { min_likes } => {
            query.push(" AND l.like_count >= ").push_bind(*min_likes);
        }
        CategoryFilter::Slug(slug) => {
            query.push(" AND c.slug = ").push_bind(slug.clone());
        }
    }

    if let Some((mode, term)) = &filter.search {
        let pattern = contains_pattern(term);
        match mode {
            SearchType::Title => {
                query.push(" AND p.title ILIKE ").push_bind(pattern);
            }
            SearchType::TitleContent => {
                query
                    .push(" AND (p.title ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR p.content ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
            SearchType::Author => {
                query.push(" AND u.username ILIKE ").push_bind(pattern);
            }
        }
    }
}

fn order_clause(filter: &PostFilter) -> &'static str {
    match filter.category {
        CategoryFilter::Hot { .. } => " ORDER BY l.like_count DESC, p.created_at DESC, p.id DESC",
        _ => " ORDER BY p.created_at DESC, p.id DESC",
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, category_id, author_id, title, content, view_count, created_at, updated_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &PostFilter, page: PageRequest) -> RepoResult<Page<Post>> {
        let mut count_query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*)");
        count_query.push(LIST_FROM);
        push_filter(&mut count_query, filter);
        let count = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut select: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT p.id, p.category_id, p.author_id, p.title, p.content, p.view_count, \
             p.created_at, p.updated_at",
        );
        select.push(LIST_FROM);
        push_filter(&mut select, filter);
        select.push(order_clause(filter));
        select.push(" LIMIT ").push_bind(page.limit());
        select.push(" OFFSET ").push_bind(page.offset());

        let models = select
            .build_query_as::<PostModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(
            page,
            count,
            models.into_iter().map(Post::from).collect(),
        ))
    }

    #[instrument(skip(self, post, attachments), fields(post_id = %post.id))]
    async fn create(&self, post: &Post, attachments: &[PostAttachment]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO posts (id, category_id, author_id, title, content, view_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.category_id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.view_count)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        for attachment in attachments {
            sqlx::query(
                r"
                INSERT INTO post_attachments (id, post_id, file_url, file_name, created_at)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(attachment.id.into_inner())
            .bind(attachment.post_id.into_inner())
            .bind(&attachment.file_url)
            .bind(&attachment.file_name)
            .bind(attachment.created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET title = $2, content = $3, category_id = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.category_id.into_inner())
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_views(&self, id: Snowflake) -> RepoResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            r"
            UPDATE posts
            SET view_count = view_count + 1
            WHERE id = $1
            RETURNING view_count
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn attachments_for(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<PostAttachment>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, PostAttachmentModel>(
            r"
            SELECT id, post_id, file_url, file_name, created_at
            FROM post_attachments
            WHERE post_id = ANY($1)
            ORDER BY created_at, id
            ",
        )
        .bind(raw_ids(post_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PostAttachment::from).collect())
    }
}
