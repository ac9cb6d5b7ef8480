use async_trait::async_trait;
use shared::types::{CoverageConfig, CoverageConfigRow};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{domain::coverage_config::CoverageConfigRepository, error::DataServiceError};

pub struct PgCoverageConfigRepository {
    pool: PgPool,
}

impl PgCoverageConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CoverageConfigRepository for PgCoverageConfigRepository {
    #[tracing::instrument(skip(self))]
    async fn get(&self, farmacy_id: Uuid) -> Result<Option<CoverageConfigRow>, DataServiceError> {
        let output = sqlx::query_as!(
            CoverageConfigRow,
            r#"
            SELECT farmacy_id, config AS "config: _", updated_at
            FROM coverage_configs
            WHERE farmacy_id = $1
            "#,
            farmacy_id
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn upsert(
        &self,
        farmacy_id: Uuid,
        config: CoverageConfig,
    ) -> Result<CoverageConfigRow, DataServiceError> {
        let output = sqlx::query_as!(
            CoverageConfigRow,
            r#"
            INSERT INTO coverage_configs (farmacy_id, config)
            VALUES ($1, $2)
            ON CONFLICT (farmacy_id) DO UPDATE
                SET config = EXCLUDED.config, updated_at = now()
            RETURNING farmacy_id, config AS "config: _", updated_at
            "#,
            farmacy_id,
            sqlx::types::Json(config) as _,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(output)
    }
}
