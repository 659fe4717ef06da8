//! PostgreSQL implementation of MovieRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use cine_core::entities::{Movie, MovieFilter, MovieStats};
use cine_core::traits::{MovieRepository, RepoResult};
use cine_core::value_objects::Snowflake;

use crate::models::{MovieModel, MovieOttModel, MovieStatsModel};

use super::error::{contains_pattern, map_db_error, raw_ids};

/// PostgreSQL implementation of MovieRepository
#[derive(Clone)]
pub struct PgMovieRepository {
    pool: PgPool,
}

impl PgMovieRepository {
    /// Create a new PgMovieRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load provider links for a set of movies
    async fn ott_links(&self, movie_ids: &[i64]) -> RepoResult<HashMap<i64, Vec<Snowflake>>> {
        if movie_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = sqlx::query_as::<_, MovieOttModel>(
            r"
            SELECT movie_id, ott_id
            FROM movie_otts
            WHERE movie_id = ANY($1)
            ORDER BY ott_id
            ",
        )
        .bind(movie_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut by_movie: HashMap<i64, Vec<Snowflake>> = HashMap::new();
        for link in links {
            by_movie
                .entry(link.movie_id)
                .or_default()
                .push(Snowflake::new(link.ott_id));
        }
        Ok(by_movie)
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Movie>> {
        let result = sqlx::query_as::<_, MovieModel>(
            r"
            SELECT id, title, description, release_date, thumbnail_url, created_at
            FROM movies
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(model) = result else {
            return Ok(None);
        };

        let mut links = self.ott_links(&[model.id]).await?;
        let ott_ids = links.remove(&model.id).unwrap_or_default();
        Ok(Some(model.into_entity(ott_ids)))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &MovieFilter) -> RepoResult<Vec<Movie>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT m.id, m.title, m.description, m.release_date, m.thumbnail_url, m.created_at \
             FROM movies m WHERE TRUE",
        );

        if !filter.ott_ids.is_empty() {
            query
                .push(" AND EXISTS (SELECT 1 FROM movie_otts mo WHERE mo.movie_id = m.id AND mo.ott_id = ANY(")
                .push_bind(raw_ids(&filter.ott_ids))
                .push("))");
        }

        if let Some(title) = filter.title.as_deref().filter(|t| !t.trim().is_empty()) {
            query
                .push(" AND m.title ILIKE ")
                .push_bind(contains_pattern(title.trim()));
        }

        query.push(" ORDER BY m.release_date DESC NULLS LAST, m.id DESC");

        let models = query
            .build_query_as::<MovieModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut links = self.ott_links(&ids).await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let ott_ids = links.remove(&model.id).unwrap_or_default();
                model.into_entity(ott_ids)
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn stats(&self, movie_id: Snowflake) -> RepoResult<MovieStats> {
        let stats = self.stats_for(&[movie_id]).await?;
        Ok(stats.into_iter().next().map(|(_, s)| s).unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn stats_for(&self, movie_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, MovieStats)>> {
        if movie_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, MovieStatsModel>(
            r"
            SELECT movie_id, AVG(rating) AS average_rating, COUNT(*) AS review_count
            FROM reviews
            WHERE movie_id = ANY($1)
            GROUP BY movie_id
            ",
        )
        .bind(raw_ids(movie_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MovieStatsModel::into_pair).collect())
    }

    #[instrument(skip(self))]
    async fn upsert(&self, movie: &Movie) -> RepoResult<Movie> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, MovieModel>(
            r"
            INSERT INTO movies (id, title, description, release_date, thumbnail_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (title) DO UPDATE SET title = EXCLUDED.title
            RETURNING id, title, description, release_date, thumbnail_url, created_at
            ",
        )
        .bind(movie.id.into_inner())
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(movie.release_date)
        .bind(&movie.thumbnail_url)
        .bind(movie.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if !movie.ott_ids.is_empty() {
            sqlx::query(
                r"
                INSERT INTO movie_otts (movie_id, ott_id)
                SELECT $1, UNNEST($2::BIGINT[])
                ON CONFLICT DO NOTHING
                ",
            )
            .bind(model.id)
            .bind(raw_ids(&movie.ott_ids))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        let mut links = self.ott_links(&[model.id]).await?;
        let ott_ids = links.remove(&model.id).unwrap_or_default();
        Ok(model.into_entity(ott_ids))
    }
}
