//! PostgreSQL implementation of OttRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use cine_core::entities::Ott;
use cine_core::traits::{OttRepository, RepoResult};
use cine_core::value_objects::Snowflake;

use crate::models::OttModel;

use super::error::{map_db_error, raw_ids};

/// PostgreSQL implementation of OttRepository
#[derive(Clone)]
pub struct PgOttRepository {
    pool: PgPool,
}

impl PgOttRepository {
    /// Create a new PgOttRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OttRepository for PgOttRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Ott>> {
        let results = sqlx::query_as::<_, OttModel>(
            r"
            SELECT id, name, logo_url, link_url
            FROM otts
            ORDER BY name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Ott::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Ott>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, OttModel>(
            r"
            SELECT id, name, logo_url, link_url
            FROM otts
            WHERE id = ANY($1)
            ORDER BY name
            ",
        )
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Ott::from).collect())
    }

    #[instrument(skip(self))]
    async fn upsert(&self, ott: &Ott) -> RepoResult<Ott> {
        // The no-op update makes RETURNING yield the existing row on conflict
        let result = sqlx::query_as::<_, OttModel>(
            r"
            INSERT INTO otts (id, name, logo_url, link_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, logo_url, link_url
            ",
        )
        .bind(ott.id.into_inner())
        .bind(&ott.name)
        .bind(&ott.logo_url)
        .bind(&ott.link_url)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Ott::from(result))
    }
}
