use async_trait::async_trait;
use shared::types::Farmacy;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    domain::farmacy::{CreateFarmacy, FarmacyRepository, UpdateFarmacy},
    error::DataServiceError,
};

pub struct PgFarmacyRepository {
    pool: PgPool,
}

impl PgFarmacyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FarmacyRepository for PgFarmacyRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Farmacy>, DataServiceError> {
        let output = sqlx::query_as!(
            Farmacy,
            r#"
            SELECT id, name, created_at, updated_at
            FROM farmacies
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(output)
    }

    async fn find_all(&self) -> Result<Vec<Farmacy>, DataServiceError> {
        let output = sqlx::query_as!(
            Farmacy,
            r#"
            SELECT id, name, created_at, updated_at
            FROM farmacies
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(output)
    }

    async fn create(&self, farmacy: CreateFarmacy) -> Result<Farmacy, DataServiceError> {
        let output = sqlx::query_as!(
            Farmacy,
            r#"
            INSERT INTO farmacies (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
            farmacy.name,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(output)
    }

    async fn batch_create(
        &self,
        farmacies: Vec<CreateFarmacy>,
    ) -> Result<Vec<Farmacy>, DataServiceError> {
        let names: Vec<String> = farmacies.iter().map(|f| f.name.clone()).collect();

        let output = sqlx::query_as!(
            Farmacy,
            r#"
            INSERT INTO farmacies (name)
            SELECT * FROM UNNEST($1::varchar[])
            RETURNING id, name, created_at, updated_at
            "#,
            &names,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(output)
    }

    async fn update(&self, id: Uuid, farmacy: UpdateFarmacy) -> Result<Farmacy, DataServiceError> {
        let output = sqlx::query_as!(
            Farmacy,
            r#"
            UPDATE farmacies
            SET name = COALESCE($2, name),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
            id,
            farmacy.name,
        )
        .fetch_optional(&self.pool)
        .await?;

        output.ok_or_else(|| DataServiceError::NotFound("Farmacy not found".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DataServiceError> {
        let output = sqlx::query!(
            r#"
            DELETE FROM farmacies
            WHERE id = $1
            "#,
            id
        )
        .execute(&self.pool)
        .await?;

        if output.rows_affected() == 0 {
            return Err(DataServiceError::NotFound("Farmacy not found".to_string()));
        }

        Ok(())
    }
}
