use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use shared::types::{ShiftTemplate, ShiftValidity};

use crate::error::ModelBuildError;

/// Normalized shift catalog: templates keyed by id, plus a precomputed overlap
/// relation (symmetric, anti-reflexive — see `overlaps`).
pub struct Catalog {
    templates: HashMap<String, ShiftTemplate>,
    /// Unordered pairs `(a, b)` with `a < b` that overlap in time.
    overlapping_pairs: HashSet<(String, String)>,
}

impl Catalog {
    pub fn build(templates: Vec<ShiftTemplate>) -> Result<Self, ModelBuildError> {
        let mut by_id = HashMap::with_capacity(templates.len());
        for template in templates {
            validate_template(&template)?;
            by_id.insert(template.id.clone(), template);
        }

        let ids: Vec<String> = by_id.keys().cloned().collect();
        let mut overlapping_pairs = HashSet::new();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let a = &by_id[&ids[i]];
                let b = &by_id[&ids[j]];
                if intervals_overlap(a.start_minute, a.end_minute, b.start_minute, b.end_minute) {
                    overlapping_pairs.insert(pair_key(&ids[i], &ids[j]));
                }
            }
        }

        Ok(Self {
            templates: by_id,
            overlapping_pairs,
        })
    }

    pub fn get(&self, shift_id: &str) -> Option<&ShiftTemplate> {
        self.templates.get(shift_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// True iff `shift_id` is a valid assignment target on `date`. Fixed-date
    /// (guard) templates are valid only on that date; weekday templates are
    /// valid on any date whose ISO weekday is in the mask.
    pub fn valid_for(&self, shift_id: &str, date: NaiveDate) -> bool {
        let Some(template) = self.templates.get(shift_id) else {
            return false;
        };
        match &template.validity.0 {
            ShiftValidity::FixedDate(fixed) => *fixed == date,
            ShiftValidity::Weekdays(weekdays) => {
                weekdays.contains(&shared::time::iso_weekday(date))
            }
        }
    }

    /// True iff the two templates' `[start, end)` minute intervals intersect.
    /// Independent of weekday; a touching boundary (`endA == startB`) does not
    /// count as overlap.
    pub fn overlaps(&self, shift_id_a: &str, shift_id_b: &str) -> bool {
        if shift_id_a == shift_id_b {
            return false;
        }
        self.overlapping_pairs
            .contains(&pair_key(shift_id_a, shift_id_b))
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a < b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn intervals_overlap(start_a: i32, end_a: i32, start_b: i32, end_b: i32) -> bool {
    !(end_a <= start_b || end_b <= start_a)
}

fn validate_template(template: &ShiftTemplate) -> Result<(), ModelBuildError> {
    if !(0..=1440).contains(&template.start_minute) || !(0..=1440).contains(&template.end_minute) {
        return Err(ModelBuildError::InvalidTemplate(format!(
            "shift {}: start/end minute must be within [0, 1440]",
            template.id
        )));
    }
    if template.end_minute <= template.start_minute {
        return Err(ModelBuildError::InvalidTemplate(format!(
            "shift {}: end must be strictly after start (overnight shifts are unsupported)",
            template.id
        )));
    }

    let expected_hours = f64::from(template.end_minute - template.start_minute) / 60.0;
    if (template.duration_hours - expected_hours).abs() > 0.5 {
        return Err(ModelBuildError::InvalidTemplate(format!(
            "shift {}: duration_hours ({}) does not match start/end span ({expected_hours}h) within half an hour",
            template.id, template.duration_hours
        )));
    }

    match &template.validity.0 {
        ShiftValidity::Weekdays(weekdays) => {
            if weekdays.is_empty() {
                return Err(ModelBuildError::InvalidTemplate(format!(
                    "shift {}: weekday mask must not be empty",
                    template.id
                )));
            }
            if weekdays.iter().any(|&w| !(1..=7).contains(&w)) {
                return Err(ModelBuildError::InvalidTemplate(format!(
                    "shift {}: weekday mask must use ISO weekdays 1..7",
                    template.id
                )));
            }
        }
        ShiftValidity::FixedDate(_) => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::types::ShiftKind;
    use sqlx::types::Json;

    fn template(
        id: &str,
        start_minute: i32,
        end_minute: i32,
        validity: ShiftValidity,
        kind: ShiftKind,
    ) -> ShiftTemplate {
        ShiftTemplate {
            id: id.to_string(),
            farmacy_id: uuid::Uuid::new_v4(),
            name: id.to_string(),
            start_minute,
            end_minute,
            duration_hours: f64::from(end_minute - start_minute) / 60.0,
            kind,
            validity: Json(validity),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn rejects_overnight_shift() {
        let t = template(
            "night",
            22 * 60,
            6 * 60,
            ShiftValidity::Weekdays(vec![1]),
            ShiftKind::Regular,
        );
        assert!(Catalog::build(vec![t]).is_err());
    }

    #[test]
    fn rejects_empty_weekday_mask() {
        let t = template(
            "ghost",
            0,
            60,
            ShiftValidity::Weekdays(vec![]),
            ShiftKind::Regular,
        );
        assert!(Catalog::build(vec![t]).is_err());
    }

    #[test]
    fn rejects_duration_mismatch() {
        let mut t = template(
            "t1",
            9 * 60,
            17 * 60,
            ShiftValidity::Weekdays(vec![1, 2, 3, 4, 5]),
            ShiftKind::Regular,
        );
        t.duration_hours = 2.0;
        assert!(Catalog::build(vec![t]).is_err());
    }

    #[test]
    fn fixed_date_valid_only_on_that_date() {
        let guard_date = NaiveDate::from_ymd_opt(2025, 11, 16).unwrap();
        let t = template(
            "G",
            9 * 60,
            22 * 60,
            ShiftValidity::FixedDate(guard_date),
            ShiftKind::Guard,
        );
        let catalog = Catalog::build(vec![t]).unwrap();

        assert!(catalog.valid_for("G", guard_date));
        assert!(!catalog.valid_for("G", guard_date.succ_opt().unwrap()));
    }

    #[test]
    fn weekday_mask_matches_iso_weekday() {
        let t = template(
            "T1",
            9 * 60,
            17 * 60,
            ShiftValidity::Weekdays(vec![1, 2, 3, 4, 5]),
            ShiftKind::Regular,
        );
        let catalog = Catalog::build(vec![t]).unwrap();

        let monday = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2025, 2, 8).unwrap();
        assert!(catalog.valid_for("T1", monday));
        assert!(!catalog.valid_for("T1", saturday));
    }

    #[test]
    fn adjacent_shifts_do_not_overlap() {
        let morning = template(
            "M",
            9 * 60,
            13 * 60,
            ShiftValidity::Weekdays(vec![1]),
            ShiftKind::Regular,
        );
        let afternoon = template(
            "A",
            13 * 60,
            17 * 60,
            ShiftValidity::Weekdays(vec![1]),
            ShiftKind::Regular,
        );
        let catalog = Catalog::build(vec![morning, afternoon]).unwrap();
        assert!(!catalog.overlaps("M", "A"));
    }

    #[test]
    fn intersecting_shifts_overlap() {
        let morning = template(
            "M",
            9 * 60,
            13 * 60,
            ShiftValidity::Weekdays(vec![1]),
            ShiftKind::Regular,
        );
        let overlapping = template(
            "X",
            11 * 60,
            15 * 60,
            ShiftValidity::Weekdays(vec![1]),
            ShiftKind::Regular,
        );
        let catalog = Catalog::build(vec![morning, overlapping]).unwrap();
        assert!(catalog.overlaps("M", "X"));
        assert!(catalog.overlaps("X", "M"));
    }
}
