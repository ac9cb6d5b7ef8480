use std::time::{Duration, Instant};

use highs::RowProblem;
use shared::types::{
    CoverageConfig, Employee, GenerationResult, ObjectiveWeights, PinnedAssignment, ShiftTemplate,
};

use crate::error::ModelBuildError;

use super::calendar::{days_of, weeks_of};
use super::catalog::Catalog;
use super::constraints::{self, BuildWarning};
use super::coverage::CoverageResolver;
use super::objective;
use super::reducer::{reduce_infeasible, reduce_success};
use super::solver::{self, SolverStatus};
use super::variables::VariableSpace;

/// The C1→C8 pipeline entry point: builds the model for one (farmacy, month)
/// request and solves it. Returns `Ok` with either a success or infeasible
/// [`GenerationResult`] in all cases except input errors, which fail fast per
/// spec.md §7.
#[allow(clippy::too_many_arguments)]
pub fn build_and_solve(
    employees: Vec<Employee>,
    templates: Vec<ShiftTemplate>,
    coverage: CoverageConfig,
    month: &str,
    min_rest_days_per_week: i32,
    weights: &ObjectiveWeights,
    pins: Vec<PinnedAssignment>,
    timeout: Duration,
) -> Result<(GenerationResult, Vec<BuildWarning>), ModelBuildError> {
    if employees.is_empty() {
        return Err(ModelBuildError::NoEmployees);
    }
    if templates.is_empty() {
        return Err(ModelBuildError::NoTemplates);
    }
    validate_caps(&employees)?;

    let days = days_of(month)?;
    let weeks = weeks_of(&days);
    let catalog = Catalog::build(templates)?;
    let coverage_resolver = CoverageResolver::new(&coverage);

    let mut pb = RowProblem::default();
    let vars = VariableSpace::build(&mut pb, &employees, &days, &catalog, weights.preferences);

    let warnings = constraints::apply(
        &mut pb,
        &vars,
        &employees,
        &days,
        &weeks,
        &catalog,
        &coverage_resolver,
        min_rest_days_per_week,
        &pins,
    );

    objective::apply(&mut pb, &vars, &employees, &days, &catalog, weights);

    let started = Instant::now();
    let (status, solved) = solver::solve(pb, timeout);
    let wall_clock = started.elapsed();

    let employee_ids: Vec<_> = employees.iter().map(|e| e.id).collect();

    let result = if status.has_solution() {
        let solution = solved.get_solution();
        reduce_success(
            &vars,
            solution.columns(),
            &employee_ids,
            &catalog,
            status,
            wall_clock,
        )
    } else {
        reduce_infeasible(status, wall_clock)
    };

    Ok((result, warnings))
}

/// spec.md §7: "negative caps" is an Input error, rejected before the model
/// is ever built (unlike modeling anomalies, which are discarded with a
/// warning).
fn validate_caps(employees: &[Employee]) -> Result<(), ModelBuildError> {
    for employee in employees {
        if employee.max_daily_hours < 0
            || employee.max_weekly_hours < 0
            || employee.max_monthly_hours < 0
        {
            return Err(ModelBuildError::InvalidCaps(format!(
                "employee {}: daily/weekly/monthly hour caps must be non-negative",
                employee.id
            )));
        }
    }
    Ok(())
}
