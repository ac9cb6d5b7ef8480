use chrono::{Datelike, NaiveDate};
use shared::types::{CoverageConfig, CoverageRule, ShiftTemplate};

/// Resolves the headcount required for a (date, shift) pair from either a flat
/// floor or an ordered list of per-slot rules, first-hit in declaration order.
pub struct CoverageResolver<'a> {
    config: &'a CoverageConfig,
}

impl<'a> CoverageResolver<'a> {
    pub fn new(config: &'a CoverageConfig) -> Self {
        Self { config }
    }

    /// `required(date, shift)`: walk the per-slot rules (declaration order);
    /// return the headcount of the first whose weekday set contains `date`'s
    /// weekday (0=Sun..6=Sat) and whose `[hourStart, hourEnd)` window contains
    /// the shift's start hour. Falls back to the global floor.
    pub fn required(&self, date: NaiveDate, shift: &ShiftTemplate) -> i32 {
        match self.config {
            CoverageConfig::Default(n_min) => *n_min,
            CoverageConfig::Rules { rules, default } => {
                let weekday = date.weekday().num_days_from_sunday() as i16;
                let start_hour = shift.start_minute / 60;
                rules
                    .iter()
                    .find(|rule| rule_matches(rule, weekday, start_hour))
                    .map_or(*default, |rule| rule.min_workers)
            }
        }
    }
}

fn rule_matches(rule: &CoverageRule, weekday: i16, start_hour: i32) -> bool {
    rule.weekdays.contains(&weekday) && start_hour >= rule.hour_start && start_hour < rule.hour_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::types::ShiftKind;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn shift(start_minute: i32, end_minute: i32) -> ShiftTemplate {
        ShiftTemplate {
            id: "s".to_string(),
            farmacy_id: Uuid::new_v4(),
            name: "s".to_string(),
            start_minute,
            end_minute,
            duration_hours: f64::from(end_minute - start_minute) / 60.0,
            kind: ShiftKind::Regular,
            validity: Json(shared::types::ShiftValidity::Weekdays(vec![1, 2, 3, 4, 5])),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn default_floor_applies_everywhere() {
        let config = CoverageConfig::Default(3);
        let resolver = CoverageResolver::new(&config);
        let monday = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        assert_eq!(resolver.required(monday, &shift(9 * 60, 17 * 60)), 3);
    }

    #[test]
    fn first_matching_rule_wins() {
        let config = CoverageConfig::Rules {
            rules: vec![
                CoverageRule {
                    weekdays: vec![1, 2, 3, 4, 5],
                    hour_start: 9,
                    hour_end: 14,
                    min_workers: 2,
                },
                CoverageRule {
                    weekdays: vec![1, 2, 3, 4, 5],
                    hour_start: 14,
                    hour_end: 19,
                    min_workers: 1,
                },
            ],
            default: 0,
        };
        let resolver = CoverageResolver::new(&config);
        let monday = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();

        assert_eq!(resolver.required(monday, &shift(9 * 60, 14 * 60)), 2);
        assert_eq!(resolver.required(monday, &shift(14 * 60, 19 * 60)), 1);
    }

    #[test]
    fn sunday_maps_to_coverage_weekday_zero() {
        let config = CoverageConfig::Rules {
            rules: vec![CoverageRule {
                weekdays: vec![0],
                hour_start: 0,
                hour_end: 24,
                min_workers: 5,
            }],
            default: 0,
        };
        let resolver = CoverageResolver::new(&config);
        let sunday = NaiveDate::from_ymd_opt(2025, 2, 9).unwrap();
        assert_eq!(resolver.required(sunday, &shift(9 * 60, 17 * 60)), 5);
    }

    #[test]
    fn unmatched_slot_falls_back_to_the_rules_default_floor() {
        let config = CoverageConfig::Rules {
            rules: vec![CoverageRule {
                weekdays: vec![1, 2, 3, 4, 5],
                hour_start: 9,
                hour_end: 14,
                min_workers: 2,
            }],
            default: 1,
        };
        let resolver = CoverageResolver::new(&config);
        let saturday = NaiveDate::from_ymd_opt(2025, 2, 8).unwrap();
        assert_eq!(resolver.required(saturday, &shift(9 * 60, 14 * 60)), 1);
    }
}
