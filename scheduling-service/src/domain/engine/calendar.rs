use chrono::{Datelike, NaiveDate};

use crate::error::ModelBuildError;

/// Every calendar date of `month` ("YYYY-MM"), ascending, inclusive of both ends.
pub fn days_of(month: &str) -> Result<Vec<NaiveDate>, ModelBuildError> {
    let (year_str, month_str) = month
        .split_once('-')
        .ok_or_else(|| ModelBuildError::InvalidMonth(month.to_string()))?;
    let year: i32 = year_str
        .parse()
        .map_err(|_| ModelBuildError::InvalidMonth(month.to_string()))?;
    let month_num: u32 = month_str
        .parse()
        .map_err(|_| ModelBuildError::InvalidMonth(month.to_string()))?;

    if !(1..=12).contains(&month_num) || year <= 1970 {
        return Err(ModelBuildError::InvalidMonth(month.to_string()));
    }

    let first = NaiveDate::from_ymd_opt(year, month_num, 1)
        .ok_or_else(|| ModelBuildError::InvalidMonth(month.to_string()))?;
    let next_month_first = if month_num == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month_num + 1, 1)
    }
    .expect("month + 1 is always a valid calendar date");

    let mut days = Vec::new();
    let mut current = first;
    while current < next_month_first {
        days.push(current);
        current += chrono::Duration::days(1);
    }

    Ok(days)
}

/// Groups `days` into contiguous weeks, closing a week after an ISO Sunday or after
/// the last date, whichever comes first. The first/last groups may be short.
pub fn weeks_of(days: &[NaiveDate]) -> Vec<Vec<NaiveDate>> {
    let mut weeks = Vec::new();
    let mut current_week = Vec::new();

    for (i, &day) in days.iter().enumerate() {
        current_week.push(day);
        let is_sunday = day.weekday() == chrono::Weekday::Sun;
        let is_last = i == days.len() - 1;
        if is_sunday || is_last {
            weeks.push(std::mem::take(&mut current_week));
        }
    }

    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_of_february_2025_has_28_days() {
        let days = days_of("2025-02").unwrap();
        assert_eq!(days.len(), 28);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(days[27], NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn days_of_leap_february_2024_has_29_days() {
        let days = days_of("2024-02").unwrap();
        assert_eq!(days.len(), 29);
    }

    #[test]
    fn days_of_march_2025_has_31_days() {
        let days = days_of("2025-03").unwrap();
        assert_eq!(days.len(), 31);
    }

    #[test]
    fn rejects_malformed_month() {
        assert!(days_of("not-a-month").is_err());
        assert!(days_of("2025-13").is_err());
        assert!(days_of("2025-00").is_err());
        assert!(days_of("1970-01").is_err());
    }

    #[test]
    fn weeks_of_keeps_partial_first_and_last_weeks_short() {
        let days = days_of("2025-02").unwrap();
        let weeks = weeks_of(&days);

        // 2025-02-01 is a Saturday, so the first week is Sat+Sun only.
        assert_eq!(weeks.first().unwrap().len(), 2);
        // every full week has 7 days
        for week in &weeks[1..weeks.len() - 1] {
            assert_eq!(week.len(), 7);
        }
        let total: usize = weeks.iter().map(Vec::len).sum();
        assert_eq!(total, days.len());
    }

    #[test]
    fn weeks_of_covers_every_day_exactly_once() {
        let days = days_of("2025-03").unwrap();
        let weeks = weeks_of(&days);
        let flattened: Vec<NaiveDate> = weeks.into_iter().flatten().collect();
        assert_eq!(flattened, days);
    }
}
