use async_trait::async_trait;
use shared::types::{Employee, Farmacy};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    domain::membership::{AddMembership, MembershipRepository},
    error::DataServiceError,
};

pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[tracing::instrument(skip(self))]
    async fn add_employee_to_farmacy(
        &self,
        farmacy_id: Uuid,
        employee_id: Uuid,
    ) -> Result<(), DataServiceError> {
        let output = sqlx::query!(
            r#"
            INSERT INTO farmacy_memberships (farmacy_id, employee_id) VALUES ($1, $2)
            "#,
            farmacy_id,
            employee_id
        )
        .execute(&self.pool)
        .await;

        match output {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) => {
                let msg = e.message();
                if msg.contains("fk_fm_employee") {
                    Err(DataServiceError::NotFound("Employee not found".to_string()))
                } else if msg.contains("fk_fm_farmacy") {
                    Err(DataServiceError::NotFound("Farmacy not found".to_string()))
                } else if msg.contains("duplicate") || msg.contains("already exists") {
                    Err(DataServiceError::BadRequest(
                        "Employee already in farmacy".to_string(),
                    ))
                } else {
                    Err(sqlx::Error::Database(e).into())
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn remove_employee_from_farmacy(
        &self,
        farmacy_id: Uuid,
        employee_id: Uuid,
    ) -> Result<(), DataServiceError> {
        let output = sqlx::query!(
            r#"
            DELETE FROM farmacy_memberships
            WHERE farmacy_id = $1 AND employee_id = $2
            "#,
            farmacy_id,
            employee_id,
        )
        .execute(&self.pool)
        .await?;

        if output.rows_affected() == 0 {
            return Err(DataServiceError::NotFound(
                "Membership not found".to_string(),
            ));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_farmacy_employees(&self, farmacy_id: Uuid) -> Result<Vec<Employee>, DataServiceError> {
        let output = sqlx::query_as!(
            Employee,
            r#"
            SELECT e.id, e.name, e.email, e.status as "status: _",
                   e.max_daily_hours, e.max_weekly_hours, e.max_monthly_hours,
                   e.personal_holidays, e.favorite_shifts, e.preferred_days_off,
                   e.created_at, e.updated_at
            FROM employees e
            JOIN farmacy_memberships fm ON e.id = fm.employee_id
            WHERE fm.farmacy_id = $1
            "#,
            farmacy_id
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn get_employee_farmacies(&self, employee_id: Uuid) -> Result<Vec<Farmacy>, DataServiceError> {
        let output = sqlx::query_as!(
            Farmacy,
            r#"
            SELECT f.id, f.name, f.created_at, f.updated_at
            FROM farmacies f
            JOIN farmacy_memberships fm ON f.id = fm.farmacy_id
            WHERE fm.employee_id = $1
            "#,
            employee_id
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn batch_add_members(
        &self,
        memberships: Vec<AddMembership>,
    ) -> Result<(), DataServiceError> {
        let employee_ids: Vec<Uuid> = memberships.iter().map(|m| m.employee_id).collect();
        let farmacy_ids: Vec<Uuid> = memberships.iter().map(|m| m.farmacy_id).collect();

        sqlx::query!(
            r#"
            INSERT INTO farmacy_memberships (employee_id, farmacy_id)
            SELECT * FROM UNNEST($1::uuid[], $2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
            &employee_ids,
            &farmacy_ids
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
