use async_trait::async_trait;
use shared::types::{JobOutcome, JobStatus, PersistedAssignment, ScheduleJob, ShiftKind};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    domain::job::{JobRepository, NewShiftAssignment},
    error::SchedulingServiceError,
};

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    #[tracing::instrument(skip(self))]
    async fn create_job(
        &self,
        farmacy_id: Uuid,
        month: String,
    ) -> Result<ScheduleJob, SchedulingServiceError> {
        let output = sqlx::query_as!(ScheduleJob,
            r#"
            INSERT INTO schedule_jobs (farmacy_id, month)
            VALUES ($1, $2)
            RETURNING id, farmacy_id, month, status AS "status: _", outcome AS "outcome: _", created_at, updated_at
            "#,
            farmacy_id,
            month
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScheduleJob>, SchedulingServiceError> {
        let output = sqlx::query_as!(
            ScheduleJob,
            r#"
            SELECT id, farmacy_id, month, status AS "status: _", outcome AS "outcome: _", created_at, updated_at
            FROM schedule_jobs
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(
        &self,
        id: Uuid,
        status: JobStatus,
    ) -> Result<(), SchedulingServiceError> {
        let output = sqlx::query!(
            r#"
            UPDATE schedule_jobs
            SET status = $2, updated_at = now()
            WHERE id = $1
            "#,
            id,
            status as _,
        )
        .execute(&self.pool)
        .await?;

        if output.rows_affected() == 0 {
            return Err(SchedulingServiceError::NotFound(format!(
                "Schedule job {id} not found"
            )));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn complete_job(
        &self,
        id: Uuid,
        outcome: JobOutcome,
    ) -> Result<(), SchedulingServiceError> {
        let output = sqlx::query!(
            r#"
            UPDATE schedule_jobs
            SET status = $2, outcome = $3, updated_at = now()
            WHERE id = $1
            "#,
            id,
            JobStatus::Completed as _,
            outcome as _,
        )
        .execute(&self.pool)
        .await?;

        if output.rows_affected() == 0 {
            return Err(SchedulingServiceError::NotFound(format!(
                "Schedule job {id} not found"
            )));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, assignments))]
    async fn save_assignments(
        &self,
        job_id: Uuid,
        assignments: Vec<NewShiftAssignment>,
    ) -> Result<(), SchedulingServiceError> {
        let job_ids: Vec<Uuid> = vec![job_id; assignments.len()];
        let employee_ids: Vec<Uuid> = assignments.iter().map(|a| a.employee_id).collect();
        let dates: Vec<chrono::NaiveDate> = assignments.iter().map(|a| a.date).collect();
        let shift_ids: Vec<String> = assignments.iter().map(|a| a.shift_id.clone()).collect();
        let start_minutes: Vec<i32> = assignments.iter().map(|a| a.start_minute).collect();
        let end_minutes: Vec<i32> = assignments.iter().map(|a| a.end_minute).collect();
        let duration_minutes: Vec<i32> = assignments.iter().map(|a| a.duration_minutes).collect();
        let kinds: Vec<ShiftKind> = assignments.iter().map(|a| a.kind).collect();

        sqlx::query(
            r#"
            INSERT INTO persisted_assignments
                (job_id, employee_id, date, shift_id, start_minute, end_minute, duration_minutes, kind, state)
            SELECT *, 'CONFIRMED'::assignment_state
            FROM UNNEST(
                $1::uuid[], $2::uuid[], $3::date[], $4::text[],
                $5::int[], $6::int[], $7::int[], $8::shift_kind[]
            )
            "#,
        )
        .bind(&job_ids)
        .bind(&employee_ids)
        .bind(&dates)
        .bind(&shift_ids)
        .bind(&start_minutes)
        .bind(&end_minutes)
        .bind(&duration_minutes)
        .bind(&kinds)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_assignments(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<PersistedAssignment>, SchedulingServiceError> {
        let output = sqlx::query_as!(
            PersistedAssignment,
            r#"
            SELECT id, job_id, employee_id, date, shift_id, start_minute, end_minute,
                   duration_minutes, kind AS "kind: _", state AS "state: _"
            FROM persisted_assignments
            WHERE job_id = $1
            ORDER BY employee_id, date
            "#,
            job_id
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_status(
        &self,
        status: JobStatus,
    ) -> Result<Vec<ScheduleJob>, SchedulingServiceError> {
        let output = sqlx::query_as!(
            ScheduleJob,
            r#"
            SELECT id, farmacy_id, month, status AS "status: _", outcome AS "outcome: _", created_at, updated_at
            FROM schedule_jobs
            WHERE status = $1
            ORDER BY created_at ASC
            "#,
            status as _,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_assignments(&self, job_id: Uuid) -> Result<(), SchedulingServiceError> {
        sqlx::query!(
            r#"
            DELETE FROM persisted_assignments
            WHERE job_id = $1
            "#,
            job_id
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
