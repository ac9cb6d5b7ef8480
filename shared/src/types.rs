use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

// region: Data Service Types

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "employee_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

/// A worker who can be assigned to shifts. `id` is the stable identifier
/// referenced by `PinnedAssignment` and the generated schedule.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: EmployeeStatus,
    pub max_daily_hours: i32,
    pub max_weekly_hours: i32,
    pub max_monthly_hours: i32,
    /// ISO dates the employee must not be scheduled on.
    pub personal_holidays: Vec<NaiveDate>,
    /// Shift template ids the employee favors, in preference order.
    pub favorite_shifts: Vec<String>,
    /// Preferred days off, 0=Sunday..6=Saturday (coverage-rule weekday encoding).
    pub preferred_days_off: Vec<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A pharmacy (or other small workforce) that owns a roster, a shift
/// catalog and coverage rules. Scheduling is always scoped to one farmacy
/// and one month.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Farmacy {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FarmacyMembership {
    pub employee_id: Uuid,
    pub farmacy_id: Uuid,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "shift_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftKind {
    Regular,
    Guard,
    Holiday,
}

/// Either a recurring weekday pattern (ISO 1=Mon..7=Sun) or a single fixed
/// calendar date (guard-duty shifts). Never both, never neither — enforced
/// at construction, see `domain::engine::catalog`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ShiftValidity {
    Weekdays(Vec<i16>),
    FixedDate(NaiveDate),
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ShiftTemplate {
    pub id: String,
    pub farmacy_id: Uuid,
    pub name: String,
    /// Minutes since midnight, `[0, 1440]`.
    pub start_minute: i32,
    /// Minutes since midnight, `[0, 1440]`, strictly greater than `start_minute`.
    pub end_minute: i32,
    pub duration_hours: f64,
    pub kind: ShiftKind,
    /// JSON-encoded `ShiftValidity`; stored as a column so sqlx::FromRow can
    /// derive the simple fields above, decoded at the domain boundary.
    #[sqlx(json)]
    pub validity: sqlx::types::Json<ShiftValidity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum CoverageConfig {
    Default(i32),
    /// Per-slot rules plus the global floor a (day, shift) falls back to when
    /// no rule matches (spec.md §3/§4.3 — the `Rules` variant is never floor-less).
    Rules {
        rules: Vec<CoverageRule>,
        default: i32,
    },
}

/// One per-slot coverage rule. `weekdays` uses the coverage-rule encoding
/// (0=Sun..6=Sat, spec.md §6); `hour_start`/`hour_end` bound the shift's
/// start hour, half-open `[hour_start, hour_end)`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoverageRule {
    pub weekdays: Vec<i16>,
    pub hour_start: i32,
    pub hour_end: i32,
    pub min_workers: i32,
}

/// A user-specified (employee, date, shift) the builder must honor, spec.md §3.
/// Pins that fail validation (unknown employee, template invalid that date, or
/// date outside the target month) are silently discarded with a warning.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PinnedAssignment {
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub shift_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CoverageConfigRow {
    pub farmacy_id: Uuid,
    #[sqlx(json)]
    pub config: sqlx::types::Json<CoverageConfig>,
    pub updated_at: DateTime<Utc>,
}

// endregion: Data Service Types

// region: Scheduling Service Types

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "job_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    WaitingForRetry,
}

/// Whether a completed job was an initial `generate` or a pin-carrying
/// `adjust` (spec.md §6: "generate... adjust (generate with pins, then
/// persist state 'modified')"). `None` until the job reaches `Completed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "job_outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobOutcome {
    Generated,
    Modified,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScheduleJob {
    pub id: Uuid,
    pub farmacy_id: Uuid,
    /// "YYYY-MM", validated at the API boundary (spec.md §6).
    pub month: String,
    pub status: JobStatus,
    pub outcome: Option<JobOutcome>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "assignment_state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentState {
    Confirmed,
}

/// One persisted (employee, date, shift) tuple, as written to `turnos` in
/// spec.md §6's persistence layout.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PersistedAssignment {
    pub id: Uuid,
    pub job_id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub shift_id: String,
    pub start_minute: i32,
    pub end_minute: i32,
    pub duration_minutes: i32,
    pub kind: ShiftKind,
    pub state: AssignmentState,
}

/// employeeId -> (date -> shiftId); the builder's output mapping, spec.md §3.
pub type Schedule = HashMap<Uuid, HashMap<NaiveDate, String>>;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeMetrics {
    pub total_hours: i32,
    pub guard_count: i32,
    pub holiday_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleMetrics {
    pub per_employee: HashMap<Uuid, EmployeeMetrics>,
    pub equity_score: f64,
    pub solver_status: String,
    pub wall_clock_seconds: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Success,
    Infeasible,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerationResult {
    pub status: GenerationStatus,
    pub schedule: Schedule,
    pub metrics: ScheduleMetrics,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleResult {
    pub schedule_id: Uuid,
    pub farmacy_id: Uuid,
    pub month: String,
    pub assignments: Vec<PersistedAssignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ObjectiveWeights {
    pub equity_guards: f64,
    pub equity_hours: f64,
    pub preferences: f64,
    /// Read from configuration, never consumed by the objective — spec.md §9
    /// Open Question 1.
    pub continuity: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            equity_guards: 10.0,
            equity_hours: 8.0,
            preferences: 5.0,
            continuity: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationReport {
    pub feasible: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

// endregion: Scheduling Service Types
