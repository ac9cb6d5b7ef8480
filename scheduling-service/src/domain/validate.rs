use chrono::NaiveDate;
use shared::types::{CoverageConfig, Employee, ShiftTemplate, ValidationReport};

use super::engine::catalog::Catalog;
use super::engine::coverage::CoverageResolver;

/// Advisory feasibility check (spec.md §6): never calls the solver. Three
/// checks, each appending to `errors` (hard) or `warnings` (soft):
/// sufficient headcount, monthly hour supply vs. demand, and personal
/// holiday load per employee.
pub fn validate_configuration(
    employees: &[Employee],
    catalog: &Catalog,
    coverage: &CoverageConfig,
    days: &[NaiveDate],
) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let resolver = CoverageResolver::new(coverage);

    let mut max_required = 0;
    let mut monthly_hour_demand = 0.0;
    for &date in days {
        for shift_id in catalog.ids() {
            if !catalog.valid_for(shift_id, date) {
                continue;
            }
            let Some(template) = catalog.get(shift_id) else {
                continue;
            };
            let required = resolver.required(date, template);
            max_required = max_required.max(required);
            monthly_hour_demand += f64::from(required) * template.duration_hours.floor();
        }
    }

    if (employees.len() as i32) < max_required {
        errors.push(format!(
            "only {} employees available, but coverage requires up to {max_required} on a single (date, shift)",
            employees.len()
        ));
    }

    let monthly_hour_supply: i32 = employees.iter().map(|e| e.max_monthly_hours).sum();
    if f64::from(monthly_hour_supply) < 0.8 * monthly_hour_demand {
        warnings.push(format!(
            "monthly hour supply ({monthly_hour_supply}h) is less than 80% of estimated demand ({monthly_hour_demand}h)"
        ));
    }

    let month_len = days.len().max(1) as f64;
    for employee in employees {
        let holiday_count = employee
            .personal_holidays
            .iter()
            .filter(|d| days.contains(d))
            .count();
        if (holiday_count as f64) / month_len > 0.3 {
            warnings.push(format!(
                "employee {} holds more than 30% of the month as personal holidays",
                employee.id
            ));
        }
    }

    ValidationReport {
        feasible: errors.is_empty(),
        errors,
        warnings,
    }
}
