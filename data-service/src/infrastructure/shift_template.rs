use async_trait::async_trait;
use shared::types::ShiftTemplate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    domain::shift_template::{CreateShiftTemplate, ShiftTemplateRepository, UpdateShiftTemplate},
    error::DataServiceError,
};

pub struct PgShiftTemplateRepository {
    pool: PgPool,
}

impl PgShiftTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShiftTemplateRepository for PgShiftTemplateRepository {
    #[tracing::instrument(skip(self))]
    async fn find_by_id(
        &self,
        farmacy_id: Uuid,
        id: &str,
    ) -> Result<Option<ShiftTemplate>, DataServiceError> {
        let output = sqlx::query_as!(
            ShiftTemplate,
            r#"
            SELECT id, farmacy_id, name, start_minute, end_minute, duration_hours,
                   kind AS "kind: _", validity AS "validity: _", created_at, updated_at
            FROM shift_templates
            WHERE farmacy_id = $1 AND id = $2
            "#,
            farmacy_id,
            id
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_farmacy(&self, farmacy_id: Uuid) -> Result<Vec<ShiftTemplate>, DataServiceError> {
        let output = sqlx::query_as!(
            ShiftTemplate,
            r#"
            SELECT id, farmacy_id, name, start_minute, end_minute, duration_hours,
                   kind AS "kind: _", validity AS "validity: _", created_at, updated_at
            FROM shift_templates
            WHERE farmacy_id = $1
            "#,
            farmacy_id
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn create(
        &self,
        farmacy_id: Uuid,
        template: CreateShiftTemplate,
    ) -> Result<ShiftTemplate, DataServiceError> {
        let output = sqlx::query_as!(
            ShiftTemplate,
            r#"
            INSERT INTO shift_templates (
                id, farmacy_id, name, start_minute, end_minute, duration_hours, kind, validity
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, farmacy_id, name, start_minute, end_minute, duration_hours,
                      kind AS "kind: _", validity AS "validity: _", created_at, updated_at
            "#,
            template.id,
            farmacy_id,
            template.name,
            template.start_minute,
            template.end_minute,
            template.duration_hours,
            template.kind as _,
            sqlx::types::Json(template.validity) as _,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn update(
        &self,
        farmacy_id: Uuid,
        id: &str,
        template: UpdateShiftTemplate,
    ) -> Result<ShiftTemplate, DataServiceError> {
        let validity = template.validity.map(sqlx::types::Json);

        let output = sqlx::query_as!(
            ShiftTemplate,
            r#"
            UPDATE shift_templates
            SET name = COALESCE($3, name),
                start_minute = COALESCE($4, start_minute),
                end_minute = COALESCE($5, end_minute),
                duration_hours = COALESCE($6, duration_hours),
                kind = COALESCE($7, kind),
                validity = COALESCE($8, validity),
                updated_at = now()
            WHERE farmacy_id = $1 AND id = $2
            RETURNING id, farmacy_id, name, start_minute, end_minute, duration_hours,
                      kind AS "kind: _", validity AS "validity: _", created_at, updated_at
            "#,
            farmacy_id,
            id,
            template.name,
            template.start_minute,
            template.end_minute,
            template.duration_hours,
            template.kind as _,
            validity as _,
        )
        .fetch_optional(&self.pool)
        .await?;

        output.ok_or_else(|| DataServiceError::NotFound("Shift template not found".to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, farmacy_id: Uuid, id: &str) -> Result<(), DataServiceError> {
        let output = sqlx::query!(
            r#"
            DELETE FROM shift_templates
            WHERE farmacy_id = $1 AND id = $2
            "#,
            farmacy_id,
            id
        )
        .execute(&self.pool)
        .await?;

        if output.rows_affected() == 0 {
            return Err(DataServiceError::NotFound(
                "Shift template not found".to_string(),
            ));
        }

        Ok(())
    }
}
