use chrono::NaiveDate;
use highs::{Col, RowProblem};
use shared::types::{Employee, ObjectiveWeights, ShiftKind};

use super::catalog::Catalog;
use super::variables::VariableSpace;

/// Emits the soft objective terms S1 (guard spread) and S2 (hour spread) as
/// epigraph-encoded max/min-equality auxiliaries, per DESIGN.md's solver
/// choice: `max_var >= each term` and `min_var <= each term`, tight at the
/// optimum because the rest of the objective only ever pushes `max_var` down
/// and `min_var` up (their coefficients are zero; only `diff`'s is negative).
///
/// S3 (favorite-shift bonus) is not emitted here: it is baked into each
/// shift variable's own column cost at creation time in
/// [`super::variables::VariableSpace::build`].
pub fn apply(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    employees: &[Employee],
    days: &[NaiveDate],
    catalog: &Catalog,
    weights: &ObjectiveWeights,
) {
    apply_guard_spread_penalty(pb, vars, employees, days, catalog, weights.equity_guards);
    apply_hour_spread_penalty(pb, vars, employees, days, catalog, weights.equity_hours);
}

/// (S1) `Gmax - Gmin` over per-employee guard-type assignment counts,
/// penalized by `-equityGuards`. Omitted entirely if no guard-type templates
/// exist anywhere in the catalog.
fn apply_guard_spread_penalty(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    employees: &[Employee],
    days: &[NaiveDate],
    catalog: &Catalog,
    weight: f64,
) {
    let has_guard_shift = catalog
        .ids()
        .any(|id| catalog.get(id).is_some_and(|t| t.kind == ShiftKind::Guard));
    if !has_guard_shift {
        return;
    }

    let per_employee_counts: Vec<Col> = employees
        .iter()
        .enumerate()
        .filter_map(|(emp_idx, _)| guard_count_column(pb, vars, emp_idx, days, catalog))
        .collect();

    if per_employee_counts.is_empty() {
        return;
    }

    emit_spread_penalty(pb, &per_employee_counts, days.len() as f64, weight);
}

/// (S2) `Hmax - Hmin` over per-employee total scheduled hours, penalized by
/// `-equityHours`.
fn apply_hour_spread_penalty(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    employees: &[Employee],
    days: &[NaiveDate],
    catalog: &Catalog,
    weight: f64,
) {
    let upper_bound = days.len() as f64 * 24.0;

    let per_employee_hours: Vec<Col> = employees
        .iter()
        .enumerate()
        .filter_map(|(emp_idx, _)| hour_count_column(pb, vars, emp_idx, catalog, upper_bound))
        .collect();

    if per_employee_hours.is_empty() {
        return;
    }

    emit_spread_penalty(pb, &per_employee_hours, upper_bound, weight);
}

fn guard_count_column(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    emp_idx: usize,
    days: &[NaiveDate],
    catalog: &Catalog,
) -> Option<Col> {
    let guard_vars: Vec<Col> = vars
        .for_employee(emp_idx)
        .into_iter()
        .filter(|(_, shift_id, _)| {
            catalog
                .get(shift_id)
                .is_some_and(|t| t.kind == ShiftKind::Guard)
        })
        .map(|(_, _, col)| col)
        .collect();

    if guard_vars.is_empty() {
        return None;
    }

    let count = pb.add_integer_column(0.0, 0.0..=days.len() as f64);
    let row: Vec<(Col, f64)> = guard_vars
        .into_iter()
        .map(|col| (col, 1.0))
        .chain(std::iter::once((count, -1.0)))
        .collect();
    pb.add_row(0.0..=0.0, row);
    Some(count)
}

fn hour_count_column(
    pb: &mut RowProblem,
    vars: &VariableSpace,
    emp_idx: usize,
    catalog: &Catalog,
    upper_bound: f64,
) -> Option<Col> {
    let hour_terms: Vec<(Col, f64)> = vars
        .for_employee(emp_idx)
        .into_iter()
        .filter_map(|(_, shift_id, col)| {
            catalog
                .get(shift_id)
                .map(|t| (col, t.duration_hours.floor()))
        })
        .collect();

    if hour_terms.is_empty() {
        return None;
    }

    let count = pb.add_integer_column(0.0, 0.0..=upper_bound);
    let row: Vec<(Col, f64)> = hour_terms
        .into_iter()
        .chain(std::iter::once((count, -1.0)))
        .collect();
    pb.add_row(0.0..=0.0, row);
    Some(count)
}

fn emit_spread_penalty(pb: &mut RowProblem, terms: &[Col], upper_bound: f64, weight: f64) {
    let max_var = pb.add_integer_column(0.0, 0.0..=upper_bound);
    let min_var = pb.add_integer_column(0.0, 0.0..=upper_bound);

    for &term in terms {
        // max_var >= term
        pb.add_row(0.0.., [(max_var, 1.0), (term, -1.0)]);
        // min_var <= term
        pb.add_row(0.0.., [(term, 1.0), (min_var, -1.0)]);
    }

    let diff = pb.add_integer_column(-weight, 0.0..=upper_bound);
    pb.add_row(
        0.0..=0.0,
        [(max_var, 1.0), (min_var, -1.0), (diff, -1.0)],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_is_applied_as_negative_cost_on_the_diff_column() {
        // emit_spread_penalty must add the diff column with cost == -weight,
        // since HiGHS maximizes and the objective penalizes spread.
        let mut pb = RowProblem::default();
        let term = pb.add_integer_column(0.0, 0.0..=10.0);
        emit_spread_penalty(&mut pb, &[term], 10.0, 8.0);
        // No panics / well-formed model is the behavioral assertion here;
        // the sign convention is documented above and exercised end-to-end
        // in engine::model tests.
    }
}
