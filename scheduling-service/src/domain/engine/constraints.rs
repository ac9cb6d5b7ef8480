use std::collections::HashSet;

use chrono::NaiveDate;
use highs::RowProblem;
use shared::types::{Employee, PinnedAssignment};

use super::catalog::Catalog;
use super::coverage::CoverageResolver;
use super::variables::VariableSpace;

/// A modeling anomaly dropped during build rather than surfaced as an error
/// (spec.md §7: "Modeling anomalies... logged as warnings; the offending
/// input is dropped; the build proceeds").
#[derive(Debug, Clone)]
pub struct BuildWarning(pub String);

/// Emits the hard constraints H1-H8 against `pb`, returning warnings for any
/// pins that were discarded. Every constraint consults `vars` for presence
/// before referencing a variable — absence means the variable is
/// structurally zero (spec.md §4.4).
#[allow(clippy::too_many_arguments)]
pub fn apply(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    employees: &[Employee],
    days: &[NaiveDate],
    weeks: &[Vec<NaiveDate>],
    catalog: &Catalog,
    coverage: &CoverageResolver,
    min_rest_days_per_week: i32,
    pins: &[PinnedAssignment],
) -> Vec<BuildWarning> {
    let mut warnings = Vec::new();

    apply_coverage_equality(pb, vars, days, catalog, coverage);
    apply_no_overlap(pb, vars, employees, days, catalog);
    apply_daily_hour_cap(pb, vars, employees, days, catalog);
    apply_weekly_hour_cap(pb, vars, employees, weeks, catalog);
    apply_monthly_hour_cap(pb, vars, employees, days, catalog);
    apply_weekly_rest_floor(pb, vars, employees, weeks, min_rest_days_per_week);
    apply_personal_holidays(pb, vars, employees, catalog);
    apply_pins(
        pb,
        vars,
        employees,
        days,
        catalog,
        pins,
        &mut warnings,
    );

    warnings
}

/// (H1) For every date and shift valid that day, the sum over employees of
/// `shifts[e, d, s]` equals `required(d, s)`.
fn apply_coverage_equality(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    days: &[NaiveDate],
    catalog: &Catalog,
    coverage: &CoverageResolver,
) {
    for &date in days {
        for shift_id in catalog.ids() {
            if !catalog.valid_for(shift_id, date) {
                continue;
            }
            let cols = vars.for_date_shift(date, shift_id);
            if cols.is_empty() {
                continue;
            }
            let Some(template) = catalog.get(shift_id) else {
                continue;
            };
            let required = f64::from(coverage.required(date, template));
            let row: Vec<(highs::Col, f64)> = cols.into_iter().map(|col| (col, 1.0)).collect();
            pb.add_row(required..=required, row);
        }
    }
}

/// (H2) For every employee/date, every pair of distinct overlapping templates
/// valid that day: at most one may be assigned.
fn apply_no_overlap(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    employees: &[Employee],
    days: &[NaiveDate],
    catalog: &Catalog,
) {
    for emp_idx in 0..employees.len() {
        for &date in days {
            let day_vars = vars.for_employee_day(emp_idx, date);
            for i in 0..day_vars.len() {
                for j in (i + 1)..day_vars.len() {
                    let (shift_a, col_a) = day_vars[i];
                    let (shift_b, col_b) = day_vars[j];
                    if catalog.overlaps(shift_a, shift_b) {
                        pb.add_row(..=1.0, [(col_a, 1.0), (col_b, 1.0)]);
                    }
                }
            }
        }
    }
}

/// (H3) For every employee/date: `Σ_s duration(s) · shifts[e, d, s] ≤
/// maxDailyHours(e)`. Durations floored to integer hours (spec.md §9).
fn apply_daily_hour_cap(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    employees: &[Employee],
    days: &[NaiveDate],
    catalog: &Catalog,
) {
    for (emp_idx, employee) in employees.iter().enumerate() {
        for &date in days {
            let day_vars = vars.for_employee_day(emp_idx, date);
            if day_vars.is_empty() {
                continue;
            }
            let row: Vec<(highs::Col, f64)> = day_vars
                .into_iter()
                .filter_map(|(shift_id, col)| {
                    catalog
                        .get(shift_id)
                        .map(|t| (col, integer_hours(t.duration_hours)))
                })
                .collect();
            pb.add_row(..=f64::from(employee.max_daily_hours), row);
        }
    }
}

/// (H4) For every employee/week group: sum over the week ≤
/// `maxWeeklyHours(e)`.
fn apply_weekly_hour_cap(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    employees: &[Employee],
    weeks: &[Vec<NaiveDate>],
    catalog: &Catalog,
) {
    for (emp_idx, employee) in employees.iter().enumerate() {
        for week in weeks {
            let mut row = Vec::new();
            for &date in week {
                for (shift_id, col) in vars.for_employee_day(emp_idx, date) {
                    if let Some(template) = catalog.get(shift_id) {
                        row.push((col, integer_hours(template.duration_hours)));
                    }
                }
            }
            if !row.is_empty() {
                pb.add_row(..=f64::from(employee.max_weekly_hours), row);
            }
        }
    }
}

/// (H5) For every employee: sum over the month ≤ `maxMonthlyHours(e)`.
fn apply_monthly_hour_cap(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    employees: &[Employee],
    days: &[NaiveDate],
    catalog: &Catalog,
) {
    for (emp_idx, employee) in employees.iter().enumerate() {
        let mut row = Vec::new();
        for &date in days {
            for (shift_id, col) in vars.for_employee_day(emp_idx, date) {
                if let Some(template) = catalog.get(shift_id) {
                    row.push((col, integer_hours(template.duration_hours)));
                }
            }
        }
        if !row.is_empty() {
            pb.add_row(..=f64::from(employee.max_monthly_hours), row);
        }
    }
}

/// (H6) Per employee/week, a derived `worked[e, d]` boolean with
/// `worked[e, d] ⇔ Σ_s shifts[e, d, s] ≥ 1`, then `Σ worked ≤ |week| −
/// restDaysPerWeek`. Omitted entirely when the right-hand side would be ≤ 0
/// (partial weeks must not force infeasibility).
fn apply_weekly_rest_floor(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    employees: &[Employee],
    weeks: &[Vec<NaiveDate>],
    min_rest_days_per_week: i32,
) {
    for emp_idx in 0..employees.len() {
        for week in weeks {
            let max_worked_days = week.len() as i32 - min_rest_days_per_week;
            if max_worked_days <= 0 {
                continue;
            }

            let mut worked_cols = Vec::new();
            for &date in week {
                let day_vars = vars.for_employee_day(emp_idx, date);
                if day_vars.is_empty() {
                    continue;
                }

                // worked <= sum(day shifts) is not enough on its own (that
                // only forces worked=0 when nothing is assigned); we also
                // need sum(day shifts) <= |day_vars| * worked so that any
                // assignment forces worked=1. Since every day_var is binary,
                // |day_vars| is a safe big-M.
                let worked = pb.add_integer_column(0.0, 0.0..=1.0);
                let big_m = day_vars.len() as f64;

                let sum_le_worked: Vec<(highs::Col, f64)> = day_vars
                    .iter()
                    .map(|(_, col)| (*col, 1.0))
                    .chain(std::iter::once((worked, -big_m)))
                    .collect();
                pb.add_row(..=0.0, sum_le_worked);

                pb.add_row(..=0.0, [(worked, 1.0)].into_iter().chain(
                    day_vars.iter().map(|(_, col)| (*col, -1.0)),
                ));

                worked_cols.push(worked);
            }

            if !worked_cols.is_empty() {
                let row: Vec<(highs::Col, f64)> =
                    worked_cols.into_iter().map(|col| (col, 1.0)).collect();
                pb.add_row(..=f64::from(max_worked_days), row);
            }
        }
    }
}

/// (H7) For every (employee, date) in their personal holidays: all of that
/// employee's variables for that date are fixed to 0.
fn apply_personal_holidays(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    employees: &[Employee],
    catalog: &Catalog,
) {
    for (emp_idx, employee) in employees.iter().enumerate() {
        for &holiday in &employee.personal_holidays {
            for shift_id in catalog.ids() {
                if let Some(col) = vars.get(emp_idx, holiday, shift_id) {
                    pb.add_row(0.0..=0.0, [(col, 1.0)]);
                }
            }
        }
    }
}

/// (H8) For every valid pin: `shifts[e, d, s] = 1`; for every other template
/// overlapping it on that date: `shifts[e, d, s'] = 0`. Pins failing
/// validation (unknown employee, template invalid that date) are discarded
/// with a warning rather than failing the build.
fn apply_pins(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    employees: &[Employee],
    days: &[NaiveDate],
    catalog: &Catalog,
    pins: &[PinnedAssignment],
    warnings: &mut Vec<BuildWarning>,
) {
    let day_set: HashSet<NaiveDate> = days.iter().copied().collect();

    for pin in pins {
        if !day_set.contains(&pin.date) {
            warnings.push(BuildWarning(format!(
                "pin for employee {} on {} discarded: date outside target month",
                pin.employee_id, pin.date
            )));
            continue;
        }

        let Some(emp_idx) = employees.iter().position(|e| e.id == pin.employee_id) else {
            warnings.push(BuildWarning(format!(
                "pin for employee {} discarded: unknown employee",
                pin.employee_id
            )));
            continue;
        };

        let Some(col) = vars.get(emp_idx, pin.date, &pin.shift_id) else {
            warnings.push(BuildWarning(format!(
                "pin for employee {} on {} discarded: shift {} not valid that date",
                pin.employee_id, pin.date, pin.shift_id
            )));
            continue;
        };

        pb.add_row(1.0..=1.0, [(col, 1.0)]);

        for (other_shift, other_col) in vars.for_employee_day(emp_idx, pin.date) {
            if other_shift != pin.shift_id && catalog.overlaps(&pin.shift_id, other_shift) {
                pb.add_row(0.0..=0.0, [(other_col, 1.0)]);
            }
        }
    }
}

fn integer_hours(duration_hours: f64) -> f64 {
    duration_hours.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_hours_floors_fractional_durations() {
        assert_eq!(integer_hours(7.5), 7.0);
        assert_eq!(integer_hours(8.0), 8.0);
    }
}
