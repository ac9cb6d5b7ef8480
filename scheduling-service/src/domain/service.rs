use std::sync::Arc;
use std::time::Duration;

use chrono::Datelike;
use shared::types::{
    JobOutcome, JobStatus, PinnedAssignment, ScheduleJob, ScheduleResult, ValidationReport,
};
use tokio_util::task::TaskTracker;
use tracing::Instrument;
use uuid::Uuid;

use crate::domain::client::DataServiceClient;
use crate::domain::config::SchedulingConfig;
use crate::domain::engine::calendar::days_of;
use crate::domain::engine::catalog::Catalog;
use crate::domain::engine::model::build_and_solve;
use crate::domain::job::{JobRepository, NewShiftAssignment};
use crate::domain::job_state::PendingJob;
use crate::domain::validate::validate_configuration;
use crate::error::SchedulingServiceError;

/// Orchestrates schedule job lifecycle: submission (generate/adjust), status
/// queries, advisory validation, and recovery of stale or retry-waiting jobs.
pub struct SchedulingService {
    job_repo: Arc<dyn JobRepository>,
    data_client: Arc<dyn DataServiceClient>,
    config: SchedulingConfig,
    task_tracker: TaskTracker,
}

impl SchedulingService {
    pub fn new(
        job_repo: Arc<dyn JobRepository>,
        data_client: Arc<dyn DataServiceClient>,
        config: SchedulingConfig,
    ) -> Self {
        Self {
            job_repo,
            data_client,
            config,
            task_tracker: TaskTracker::new(),
        }
    }

    pub fn task_tracker(&self) -> &TaskTracker {
        &self.task_tracker
    }

    /// *generate*: submit a new schedule build with no pins.
    #[tracing::instrument(skip(self))]
    pub async fn submit_generate(
        &self,
        farmacy_id: Uuid,
        month: String,
    ) -> Result<ScheduleJob, SchedulingServiceError> {
        self.submit(farmacy_id, month, Vec::new(), JobOutcome::Generated)
            .await
    }

    /// *adjust*: submit a schedule build carrying pinned assignments; the
    /// completed job is tagged `outcome = modified` (spec.md §6).
    #[tracing::instrument(skip(self, pins))]
    pub async fn submit_adjust(
        &self,
        farmacy_id: Uuid,
        month: String,
        pins: Vec<PinnedAssignment>,
    ) -> Result<ScheduleJob, SchedulingServiceError> {
        self.submit(farmacy_id, month, pins, JobOutcome::Modified)
            .await
    }

    async fn submit(
        &self,
        farmacy_id: Uuid,
        month: String,
        pins: Vec<PinnedAssignment>,
        outcome: JobOutcome,
    ) -> Result<ScheduleJob, SchedulingServiceError> {
        validate_month_not_in_the_past(&month, &self.config)?;

        let job = self.job_repo.create_job(farmacy_id, month).await?;

        let pending_job = PendingJob::from_schedule_job(job.clone()).ok_or_else(|| {
            let job_id = job.id;
            let job_status = job.status;
            SchedulingServiceError::Internal(format!(
                "Newly created job {job_id} has unexpected status {job_status:?}"
            ))
        })?;

        self.spawn_process_job(pending_job, pins, outcome);

        Ok(job)
    }

    /// Spawns a background task to process the given pending job.
    pub fn spawn_process_job(
        &self,
        pending_job: PendingJob,
        pins: Vec<PinnedAssignment>,
        outcome: JobOutcome,
    ) {
        let job_id = pending_job.id();
        let farmacy_id = pending_job.inner().farmacy_id;
        let repo = Arc::clone(&self.job_repo);
        let client = Arc::clone(&self.data_client);
        let config = self.config.clone();

        let span = tracing::info_span!("process_job", %job_id, %farmacy_id);
        self.task_tracker.spawn(
            async move {
                if let Err(e) = process_job(pending_job, pins, outcome, repo, client, config).await
                {
                    tracing::error!("Job {job_id} failed: {e}");
                }
            }
            .instrument(span),
        );
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_status(&self, job_id: Uuid) -> Result<ScheduleJob, SchedulingServiceError> {
        self.job_repo.find_by_id(job_id).await?.ok_or_else(|| {
            SchedulingServiceError::NotFound(format!("Schedule job {job_id} not found"))
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_result(&self, job_id: Uuid) -> Result<ScheduleResult, SchedulingServiceError> {
        let job = self.get_status(job_id).await?;

        if job.status != JobStatus::Completed {
            let status = job.status;
            return Err(SchedulingServiceError::BadRequest(format!(
                "Job is not completed, current status: {status:?}"
            )));
        }

        let assignments = self.job_repo.get_assignments(job_id).await?;

        Ok(ScheduleResult {
            schedule_id: job.id,
            farmacy_id: job.farmacy_id,
            month: job.month,
            assignments,
        })
    }

    /// *validate*: advisory feasibility check for a (farmacy, month); never
    /// calls the solver (spec.md §6).
    #[tracing::instrument(skip(self))]
    pub async fn validate(
        &self,
        farmacy_id: Uuid,
        month: String,
    ) -> Result<ValidationReport, SchedulingServiceError> {
        let days = days_of(&month)?;
        let employees = self.data_client.get_employees(farmacy_id).await?;
        let templates = self.data_client.get_shift_catalog(farmacy_id).await?;
        let coverage = self.data_client.get_coverage_config(farmacy_id).await?;

        let catalog = Catalog::build(templates)?;
        Ok(validate_configuration(&employees, &catalog, &coverage, &days))
    }

    /// Recovers jobs left in `Processing` state (e.g., from a previous crash) by resetting
    /// them to `Pending` and re-spawning processing. Also retries any `WaitingForRetry` jobs.
    ///
    /// Pins carried by an in-flight `adjust` job are not persisted on the job row
    /// (spec.md §6's persistence layout has no such field), so a recovered `adjust`
    /// job is re-run as a plain `generate`.
    #[tracing::instrument(skip(self))]
    pub async fn recover_stale_jobs(&self) -> Result<(), SchedulingServiceError> {
        let stale_jobs = self.job_repo.find_by_status(JobStatus::Processing).await?;

        if stale_jobs.is_empty() {
            tracing::info!("No stale jobs to recover");
        } else {
            tracing::info!(count = stale_jobs.len(), "Recovering stale jobs");
            for job in stale_jobs {
                let job_id = job.id;
                tracing::info!(%job_id, "Recovering stale job");

                self.job_repo.delete_assignments(job_id).await?;
                self.job_repo
                    .update_status(job_id, JobStatus::Pending)
                    .await?;

                self.respawn_as_pending(job_id).await?;
            }
        }

        self.retry_waiting_jobs().await?;

        Ok(())
    }

    /// Resets all `WaitingForRetry` jobs to `Pending` and re-spawns processing.
    /// Called by the health check when the data service recovers.
    #[tracing::instrument(skip(self))]
    pub async fn retry_waiting_jobs(&self) -> Result<(), SchedulingServiceError> {
        let waiting_jobs = self
            .job_repo
            .find_by_status(JobStatus::WaitingForRetry)
            .await?;

        if waiting_jobs.is_empty() {
            tracing::info!("No waiting-for-retry jobs to retry");
            return Ok(());
        }

        tracing::info!(
            count = waiting_jobs.len(),
            "Retrying waiting-for-retry jobs"
        );

        for job in waiting_jobs {
            let job_id = job.id;
            tracing::info!(%job_id, "Retrying waiting job");

            self.job_repo
                .update_status(job_id, JobStatus::Pending)
                .await?;

            self.respawn_as_pending(job_id).await?;
        }

        Ok(())
    }

    /// Reloads a job from the database and spawns processing if it is in `Pending` status.
    async fn respawn_as_pending(&self, job_id: Uuid) -> Result<(), SchedulingServiceError> {
        let Some(job) = self.job_repo.find_by_id(job_id).await? else {
            return Ok(());
        };
        if let Some(pending) = PendingJob::from_schedule_job(job) {
            self.spawn_process_job(pending, Vec::new(), JobOutcome::Generated);
        } else {
            tracing::warn!(%job_id, "Job no longer in Pending status after reset");
        }
        Ok(())
    }
}

fn validate_month_not_in_the_past(
    month: &str,
    config: &SchedulingConfig,
) -> Result<(), SchedulingServiceError> {
    let days = days_of(month)?;
    let first_of_month = days[0];
    let today = shared::time::today_in(config.timezone());
    let today_first_of_month = today.with_day(1).expect("day 1 always exists");

    if first_of_month < today_first_of_month {
        return Err(SchedulingServiceError::BadRequest(
            "month must not be in the past".into(),
        ));
    }
    Ok(())
}

/// Processes a single schedule job: transitions to `Processing`, fetches the
/// roster/catalog/coverage config from the data service, builds and solves
/// the model, and saves assignments.
///
/// On data-service connectivity errors (`CircuitOpen`, `DataServiceUnavailable`), the job
/// is moved to `WaitingForRetry` instead of `Failed`.
#[tracing::instrument(skip(pending_job, pins, repo, client, config), fields(job_id = %pending_job.id()))]
async fn process_job(
    pending_job: PendingJob,
    pins: Vec<PinnedAssignment>,
    outcome: JobOutcome,
    repo: Arc<dyn JobRepository>,
    client: Arc<dyn DataServiceClient>,
    config: SchedulingConfig,
) -> Result<(), SchedulingServiceError> {
    tracing::info!("Processing job");

    let (processing_job, job_id, status) = pending_job.start_processing();
    repo.update_status(job_id, status).await?;

    let farmacy_id = processing_job.farmacy_id();
    let month = processing_job.month().to_string();

    let fetch_result = fetch_inputs(&client, farmacy_id).await;
    let (employees, templates, coverage) = match fetch_result {
        Ok(inputs) => inputs,
        Err(
            e @ (SchedulingServiceError::CircuitOpen
            | SchedulingServiceError::DataServiceUnavailable(_)),
        ) => {
            let (_waiting, id, status) = processing_job.wait_for_retry();
            if let Err(e) = repo.update_status(id, status).await {
                tracing::error!(%id, "Failed to mark job as waiting for retry: {e}");
            }
            tracing::warn!(%id, "Job marked as waiting for retry due to data service unavailability");
            return Err(e);
        }
        Err(e) => {
            let (_failed, id, status) = processing_job.fail();
            if let Err(e) = repo.update_status(id, status).await {
                tracing::error!(%id, "Failed to mark job as failed: {e}");
            }
            return Err(e);
        }
    };

    let active_employees: Vec<_> = employees
        .into_iter()
        .filter(|e| e.status == shared::types::EmployeeStatus::Active)
        .collect();

    let build_result = build_and_solve(
        active_employees,
        templates,
        coverage,
        &month,
        config.min_rest_days_per_week,
        &config.weights,
        pins,
        Duration::from_secs(u64::from(config.timeout_seconds)),
    );

    match build_result {
        Ok((generation, warnings)) => {
            for warning in &warnings {
                tracing::warn!(%job_id, "{}", warning.0);
            }

            if generation.status == shared::types::GenerationStatus::Success {
                let catalog = rebuild_catalog_for_persistence(&client, farmacy_id).await?;
                let new_assignments = flatten_schedule(&generation.schedule, &catalog);
                repo.save_assignments(job_id, new_assignments).await?;
                let (_completed, id, status, _outcome) = processing_job.complete(outcome);
                repo.update_status(id, status).await?;
                tracing::info!("Job completed");
            } else {
                tracing::warn!(
                    %job_id,
                    suggestions = ?generation.suggestions,
                    "Model build was infeasible"
                );
                let (_failed, id, status) = processing_job.fail();
                repo.update_status(id, status).await?;
            }
        }
        Err(e) => {
            let (_failed, id, status) = processing_job.fail();
            if let Err(update_err) = repo.update_status(id, status).await {
                tracing::error!(%id, "Failed to mark job as failed: {update_err}");
            }
            tracing::error!("Model build failed: {e}");
            return Err(SchedulingServiceError::from(e));
        }
    }

    Ok(())
}

async fn fetch_inputs(
    client: &Arc<dyn DataServiceClient>,
    farmacy_id: Uuid,
) -> Result<
    (
        Vec<shared::types::Employee>,
        Vec<shared::types::ShiftTemplate>,
        shared::types::CoverageConfig,
    ),
    SchedulingServiceError,
> {
    let employees = client.get_employees(farmacy_id).await?;
    let templates = client.get_shift_catalog(farmacy_id).await?;
    let coverage = client.get_coverage_config(farmacy_id).await?;
    Ok((employees, templates, coverage))
}

/// Re-fetches the catalog to resolve each assigned shift id back to its
/// time window and kind for persistence (the reducer's output only carries
/// shift ids, per spec.md §3's "employeeId -> (date -> shiftId)" contract).
async fn rebuild_catalog_for_persistence(
    client: &Arc<dyn DataServiceClient>,
    farmacy_id: Uuid,
) -> Result<Catalog, SchedulingServiceError> {
    let templates = client.get_shift_catalog(farmacy_id).await?;
    Ok(Catalog::build(templates)?)
}

fn flatten_schedule(
    schedule: &shared::types::Schedule,
    catalog: &Catalog,
) -> Vec<NewShiftAssignment> {
    let mut assignments = Vec::new();
    for (&employee_id, per_date) in schedule {
        for (&date, shift_id) in per_date {
            let Some(template) = catalog.get(shift_id) else {
                continue;
            };
            assignments.push(NewShiftAssignment {
                employee_id,
                date,
                shift_id: shift_id.clone(),
                start_minute: template.start_minute,
                end_minute: template.end_minute,
                duration_minutes: template.end_minute - template.start_minute,
                kind: template.kind,
            });
        }
    }
    assignments
}
