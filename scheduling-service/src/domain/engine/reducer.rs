use std::collections::HashMap;
use std::time::Duration;

use shared::types::{
    EmployeeMetrics, GenerationResult, GenerationStatus, Schedule, ScheduleMetrics, ShiftKind,
};
use uuid::Uuid;

use super::catalog::Catalog;
use super::solver::SolverStatus;
use super::variables::VariableSpace;

/// Fixed, advisory remediation hints for an infeasible/unknown build
/// (spec.md §4.8 — "not computed from an IIS").
const INFEASIBILITY_SUGGESTIONS: [&str; 5] = [
    "Increase the number of available employees",
    "Lower the minimum coverage required per shift",
    "Increase the maximum hours allowed (enable overtime)",
    "Review personal holidays that may be blocking assignments",
    "Relax the mandatory weekly rest-day floor",
];

/// On optimal/feasible: reconstructs the assignment mapping from the raw
/// solution and recomputes hour/guard/holiday tallies from ground truth
/// (never from the objective), per spec.md §4.8.
pub fn reduce_success(
    vars: &VariableSpace,
    solution_values: &[f64],
    employee_ids: &[Uuid],
    catalog: &Catalog,
    status: SolverStatus,
    wall_clock: Duration,
) -> GenerationResult {
    let mut schedule: Schedule = HashMap::new();
    let mut per_employee: HashMap<Uuid, EmployeeMetrics> = employee_ids
        .iter()
        .map(|&id| (id, EmployeeMetrics {
            total_hours: 0,
            guard_count: 0,
            holiday_count: 0,
        }))
        .collect();

    for (emp_idx, date, shift_id, col) in vars.iter() {
        let idx: usize = col.into();
        let Some(&value) = solution_values.get(idx) else {
            continue;
        };
        if value < 0.5 {
            continue;
        }

        let Some(&employee_id) = employee_ids.get(emp_idx) else {
            continue;
        };
        let Some(template) = catalog.get(shift_id) else {
            continue;
        };

        schedule
            .entry(employee_id)
            .or_default()
            .insert(date, shift_id.to_string());

        let metrics = per_employee.entry(employee_id).or_default();
        metrics.total_hours += template.duration_hours.floor() as i32;
        match template.kind {
            ShiftKind::Guard => metrics.guard_count += 1,
            ShiftKind::Holiday => metrics.holiday_count += 1,
            ShiftKind::Regular => {}
        }
    }

    let equity_score = equity_score(&per_employee);

    GenerationResult {
        status: GenerationStatus::Success,
        schedule,
        metrics: ScheduleMetrics {
            per_employee,
            equity_score,
            solver_status: status.name().to_string(),
            wall_clock_seconds: wall_clock.as_secs_f64(),
        },
        suggestions: Vec::new(),
    }
}

/// On infeasible/unknown: empty assignment, zeroed equity, fixed suggestions.
pub fn reduce_infeasible(status: SolverStatus, wall_clock: Duration) -> GenerationResult {
    GenerationResult {
        status: GenerationStatus::Infeasible,
        schedule: HashMap::new(),
        metrics: ScheduleMetrics {
            per_employee: HashMap::new(),
            equity_score: 0.0,
            solver_status: status.name().to_string(),
            wall_clock_seconds: wall_clock.as_secs_f64(),
        },
        suggestions: INFEASIBILITY_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

/// `max(0, 1 - σ/μ)` over the per-employee hour vector; 1 if μ = 0.
fn equity_score(per_employee: &HashMap<Uuid, EmployeeMetrics>) -> f64 {
    if per_employee.is_empty() {
        return 1.0;
    }

    let hours: Vec<f64> = per_employee
        .values()
        .map(|m| f64::from(m.total_hours))
        .collect();
    let mean = hours.iter().sum::<f64>() / hours.len() as f64;
    if mean == 0.0 {
        return 1.0;
    }

    let variance = hours.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / hours.len() as f64;
    let std_dev = variance.sqrt();

    (1.0 - std_dev / mean).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(hours: i32) -> EmployeeMetrics {
        EmployeeMetrics {
            total_hours: hours,
            guard_count: 0,
            holiday_count: 0,
        }
    }

    #[test]
    fn equity_score_is_one_when_hours_are_equal() {
        let mut per_employee = HashMap::new();
        per_employee.insert(Uuid::new_v4(), metrics(40));
        per_employee.insert(Uuid::new_v4(), metrics(40));
        assert_eq!(equity_score(&per_employee), 1.0);
    }

    #[test]
    fn equity_score_is_one_when_empty() {
        let per_employee: HashMap<Uuid, EmployeeMetrics> = HashMap::new();
        assert_eq!(equity_score(&per_employee), 1.0);
    }

    #[test]
    fn equity_score_drops_with_spread() {
        let mut per_employee = HashMap::new();
        per_employee.insert(Uuid::new_v4(), metrics(10));
        per_employee.insert(Uuid::new_v4(), metrics(50));
        let score = equity_score(&per_employee);
        assert!(score < 1.0);
        assert!(score >= 0.0);
    }

    #[test]
    fn reduce_infeasible_carries_the_fixed_suggestions() {
        let result = reduce_infeasible(SolverStatus::Infeasible, Duration::from_secs(1));
        assert_eq!(result.suggestions.len(), 5);
        assert!(result.schedule.is_empty());
        assert_eq!(result.metrics.equity_score, 0.0);
    }
}
