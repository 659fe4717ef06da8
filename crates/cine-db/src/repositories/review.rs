//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use cine_core::entities::{Review, ReviewHistory, ReviewImage, ReviewOrdering};
use cine_core::error::DomainError;
use cine_core::traits::{RepoResult, ReviewQuery, ReviewRepository, ReviewUpdate};
use cine_core::value_objects::{Page, PageRequest, Snowflake};

use crate::models::{ReviewHistoryModel, ReviewImageModel, ReviewModel};

use super::error::{map_db_error, map_unique_violation, raw_ids};

const REVIEW_COLUMNS: &str =
    "r.id, r.movie_id, r.author_id, r.rating, r.comment, r.is_spoiler, r.created_at, r.updated_at";

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, movie_id: Option<Snowflake>) {
    query.push(" WHERE TRUE");
    if let Some(movie_id) = movie_id {
        query.push(" AND r.movie_id = ").push_bind(movie_id.into_inner());
    }
}

fn order_clause(ordering: ReviewOrdering) -> &'static str {
    match ordering {
        ReviewOrdering::NewestFirst => " ORDER BY r.created_at DESC, r.id DESC",
        ReviewOrdering::OldestFirst => " ORDER BY r.created_at ASC, r.id ASC",
        ReviewOrdering::RatingDesc => " ORDER BY r.rating DESC, r.created_at DESC, r.id DESC",
        ReviewOrdering::RatingAsc => " ORDER BY r.rating ASC, r.created_at DESC, r.id DESC",
        ReviewOrdering::MostLiked => " ORDER BY l.like_count DESC, r.created_at DESC, r.id DESC",
        ReviewOrdering::LeastLiked => " ORDER BY l.like_count ASC, r.created_at DESC, r.id DESC",
    }
}

async fn insert_images(conn: &mut PgConnection, images: &[ReviewImage]) -> RepoResult<()> {
    for image in images {
        sqlx::query(
            r"
            INSERT INTO review_images (id, review_id, image_url, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(image.id.into_inner())
        .bind(image.review_id.into_inner())
        .bind(&image.image_url)
        .bind(image.created_at)
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;
    }
    Ok(())
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, movie_id, author_id, rating, comment, is_spoiler, created_at, updated_at
            FROM reviews
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Review::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn exists_for(&self, author_id: Snowflake, movie_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM reviews WHERE author_id = $1 AND movie_id = $2)
            ",
        )
        .bind(author_id.into_inner())
        .bind(movie_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: ReviewQuery, page: PageRequest) -> RepoResult<Page<Review>> {
        let mut count_query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM reviews r");
        push_filter(&mut count_query, query.movie_id);
        let count = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut select: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        select.push(REVIEW_COLUMNS).push(" FROM reviews r");
        if matches!(
            query.ordering,
            ReviewOrdering::MostLiked | ReviewOrdering::LeastLiked
        ) {
            select.push(
                " LEFT JOIN LATERAL (SELECT COUNT(*) AS like_count FROM review_reactions rr \
                 WHERE rr.review_id = r.id AND rr.is_like) l ON TRUE",
            );
        }
        push_filter(&mut select, query.movie_id);
        select.push(order_clause(query.ordering));
        select.push(" LIMIT ").push_bind(page.limit());
        select.push(" OFFSET ").push_bind(page.offset());

        let models = select
            .build_query_as::<ReviewModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let reviews = models
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(page, count, reviews))
    }

    #[instrument(skip(self, images), fields(review_id = %review.id))]
    async fn create(&self, review: &Review, images: &[ReviewImage]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO reviews (id, movie_id, author_id, rating, comment, is_spoiler, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(review.id.into_inner())
        .bind(review.movie_id.into_inner())
        .bind(review.author_id.into_inner())
        .bind(review.rating.value())
        .bind(&review.comment)
        .bind(review.is_spoiler)
        .bind(review.created_at)
        .bind(review.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::DuplicateReview))?;

        insert_images(&mut tx, images).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, update), fields(review_id = %update.review.id))]
    async fn update(&self, update: ReviewUpdate<'_>) -> RepoResult<()> {
        let ReviewUpdate {
            review,
            history,
            new_images,
            delete_image_ids,
        } = update;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO review_histories (id, review_id, editor_id, previous_rating, previous_comment, edited_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(history.id.into_inner())
        .bind(history.review_id.into_inner())
        .bind(history.editor_id.into_inner())
        .bind(history.previous_rating.value())
        .bind(&history.previous_comment)
        .bind(history.edited_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE reviews
            SET rating = $2, comment = $3, is_spoiler = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(review.id.into_inner())
        .bind(review.rating.value())
        .bind(&review.comment)
        .bind(review.is_spoiler)
        .bind(review.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ReviewNotFound(review.id));
        }

        insert_images(&mut tx, new_images).await?;

        if !delete_image_ids.is_empty() {
            // Ids belonging to other reviews are ignored
            sqlx::query("DELETE FROM review_images WHERE review_id = $1 AND id = ANY($2)")
                .bind(review.id.into_inner())
                .bind(raw_ids(delete_image_ids))
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ReviewNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn histories(&self, review_id: Snowflake) -> RepoResult<Vec<ReviewHistory>> {
        let results = sqlx::query_as::<_, ReviewHistoryModel>(
            r"
            SELECT id, review_id, editor_id, previous_rating, previous_comment, edited_at
            FROM review_histories
            WHERE review_id = $1
            ORDER BY edited_at DESC, id DESC
            ",
        )
        .bind(review_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(ReviewHistory::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn edited_ids(&self, review_ids: &[Snowflake]) -> RepoResult<Vec<Snowflake>> {
        if review_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_scalar::<_, i64>(
            r"
            SELECT DISTINCT review_id
            FROM review_histories
            WHERE review_id = ANY($1)
            ",
        )
        .bind(raw_ids(review_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn images_for(&self, review_ids: &[Snowflake]) -> RepoResult<Vec<ReviewImage>> {
        if review_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, ReviewImageModel>(
            r"
            SELECT id, review_id, image_url, created_at
            FROM review_images
            WHERE review_id = ANY($1)
            ORDER BY created_at, id
            ",
        )
        .bind(raw_ids(review_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ReviewImage::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_image(&self, image_id: Snowflake) -> RepoResult<Option<ReviewImage>> {
        let result = sqlx::query_as::<_, ReviewImageModel>(
            r"
            SELECT id, review_id, image_url, created_at
            FROM review_images
            WHERE id = $1
            ",
        )
        .bind(image_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ReviewImage::from))
    }

    #[instrument(skip(self))]
    async fn add_image(&self, image: &ReviewImage) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        insert_images(&mut conn, std::slice::from_ref(image)).await
    }

    #[instrument(skip(self))]
    async fn delete_image(&self, image_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM review_images WHERE id = $1")
            .bind(image_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ReviewImageNotFound(image_id));
        }
        Ok(())
    }
}
