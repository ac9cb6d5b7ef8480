use async_trait::async_trait;
use shared::types::Employee;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    domain::employee::{CreateEmployee, EmployeeRepository, UpdateEmployee},
    error::DataServiceError,
};

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, DataServiceError> {
        let output = sqlx::query_as!(
            Employee,
            r#"
            SELECT id, name, email, status AS "status: _",
                   max_daily_hours, max_weekly_hours, max_monthly_hours,
                   personal_holidays, favorite_shifts, preferred_days_off,
                   created_at, updated_at
            FROM employees
            WHERE id = $1
        "#,
            id
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Employee>, DataServiceError> {
        let output = sqlx::query_as!(
            Employee,
            r#"
            SELECT id, name, email, status AS "status: _",
                   max_daily_hours, max_weekly_hours, max_monthly_hours,
                   personal_holidays, favorite_shifts, preferred_days_off,
                   created_at, updated_at
            FROM employees
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, employee: CreateEmployee) -> Result<Employee, DataServiceError> {
        let output = sqlx::query_as!(
            Employee,
            r#"
            INSERT INTO employees (
                name, email, max_daily_hours, max_weekly_hours, max_monthly_hours,
                personal_holidays, favorite_shifts, preferred_days_off
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, status AS "status: _",
                      max_daily_hours, max_weekly_hours, max_monthly_hours,
                      personal_holidays, favorite_shifts, preferred_days_off,
                      created_at, updated_at
            "#,
            employee.name,
            employee.email,
            employee.max_daily_hours,
            employee.max_weekly_hours,
            employee.max_monthly_hours,
            &employee.personal_holidays,
            &employee.favorite_shifts,
            &employee.preferred_days_off,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self, employees))]
    async fn batch_create(
        &self,
        employees: Vec<CreateEmployee>,
    ) -> Result<Vec<Employee>, DataServiceError> {
        let mut created = Vec::with_capacity(employees.len());
        for employee in employees {
            created.push(self.create(employee).await?);
        }
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    async fn update(
        &self,
        id: Uuid,
        employee: UpdateEmployee,
    ) -> Result<Employee, DataServiceError> {
        let output = sqlx::query_as!(
            Employee,
            r#"
            UPDATE employees
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                status = COALESCE($4, status),
                max_daily_hours = COALESCE($5, max_daily_hours),
                max_weekly_hours = COALESCE($6, max_weekly_hours),
                max_monthly_hours = COALESCE($7, max_monthly_hours),
                personal_holidays = COALESCE($8, personal_holidays),
                favorite_shifts = COALESCE($9, favorite_shifts),
                preferred_days_off = COALESCE($10, preferred_days_off),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, status AS "status: _",
                      max_daily_hours, max_weekly_hours, max_monthly_hours,
                      personal_holidays, favorite_shifts, preferred_days_off,
                      created_at, updated_at
            "#,
            id,
            employee.name,
            employee.email,
            employee.status as _,
            employee.max_daily_hours,
            employee.max_weekly_hours,
            employee.max_monthly_hours,
            employee.personal_holidays.as_deref(),
            employee.favorite_shifts.as_deref(),
            employee.preferred_days_off.as_deref(),
        )
        .fetch_optional(&self.pool)
        .await?;

        output.ok_or_else(|| DataServiceError::NotFound("Employee not found".to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn deactivate(&self, id: Uuid) -> Result<(), DataServiceError> {
        let output = sqlx::query!(
            r#"
            UPDATE employees
            SET status = 'INACTIVE', updated_at = now()
            WHERE id = $1
            "#,
            id
        )
        .execute(&self.pool)
        .await?;

        if output.rows_affected() == 0 {
            return Err(DataServiceError::NotFound("Employee not found".to_string()));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), DataServiceError> {
        let output = sqlx::query!(
            r#"
            DELETE FROM employees
            WHERE id = $1
            "#,
            id
        )
        .execute(&self.pool)
        .await?;

        if output.rows_affected() == 0 {
            return Err(DataServiceError::NotFound("Employee not found".to_string()));
        }

        Ok(())
    }
}
