use std::collections::HashMap;

use chrono::NaiveDate;
use highs::{Col, RowProblem};
use shared::types::Employee;

use super::catalog::Catalog;

/// Sparse decision-variable space: one boolean column per *valid*
/// (employee, date, shift) triple. Absence of a key means the variable is
/// structurally zero — every constraint and objective term must check
/// presence rather than assume it.
///
/// The favorite-shift bonus (spec §4.6 S3) is baked into a variable's HiGHS
/// objective coefficient at creation time, since HiGHS fixes a column's cost
/// when the column is added; there is no separate "add to objective" step
/// for existing columns.
pub struct VariableSpace {
    vars: HashMap<(usize, NaiveDate, String), Col>,
}

impl VariableSpace {
    pub fn build(
        pb: &mut RowProblem,
        employees: &[Employee],
        days: &[NaiveDate],
        catalog: &Catalog,
        preferences_weight: f64,
    ) -> Self {
        let mut vars = HashMap::new();

        for (emp_idx, employee) in employees.iter().enumerate() {
            for &date in days {
                for shift_id in catalog.ids() {
                    if !catalog.valid_for(shift_id, date) {
                        continue;
                    }
                    let cost = if employee
                        .favorite_shifts
                        .iter()
                        .any(|f| f == shift_id)
                    {
                        preferences_weight
                    } else {
                        0.0
                    };
                    let col = pb.add_integer_column(cost, 0.0..=1.0);
                    vars.insert((emp_idx, date, shift_id.to_string()), col);
                }
            }
        }

        Self { vars }
    }

    pub fn get(&self, emp_idx: usize, date: NaiveDate, shift_id: &str) -> Option<Col> {
        self.vars
            .get(&(emp_idx, date, shift_id.to_string()))
            .copied()
    }

    pub fn contains(&self, emp_idx: usize, date: NaiveDate, shift_id: &str) -> bool {
        self.get(emp_idx, date, shift_id).is_some()
    }

    /// All `(shift_id, col)` pairs allocated for `emp_idx` on `date`.
    pub fn for_employee_day(&self, emp_idx: usize, date: NaiveDate) -> Vec<(&str, Col)> {
        self.vars
            .iter()
            .filter(|((e, d, _), _)| *e == emp_idx && *d == date)
            .map(|((_, _, s), col)| (s.as_str(), *col))
            .collect()
    }

    /// All columns allocated for `(date, shift_id)`, one per eligible employee.
    pub fn for_date_shift(&self, date: NaiveDate, shift_id: &str) -> Vec<Col> {
        self.vars
            .iter()
            .filter(|((_, d, s), _)| *d == date && s == shift_id)
            .map(|(_, col)| *col)
            .collect()
    }

    /// All `(date, shift_id, col)` triples allocated for `emp_idx`.
    pub fn for_employee(&self, emp_idx: usize) -> Vec<(NaiveDate, &str, Col)> {
        self.vars
            .iter()
            .filter(|((e, _, _), _)| *e == emp_idx)
            .map(|((_, d, s), col)| (*d, s.as_str(), *col))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, NaiveDate, &str, Col)> {
        self.vars
            .iter()
            .map(|((e, d, s), col)| (*e, *d, s.as_str(), *col))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
