use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// Return the date in given timezone
///
/// This function mainly to help solving the problem with the DATE type in postgres
///
/// # Example
///```
/// use shared::time::today_in;
/// use chrono_tz::Asia::Ho_Chi_Minh;
/// let today = today_in(Ho_Chi_Minh);
/// ```
pub fn today_in(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}

/// ISO weekday of `date`, 1=Monday..7=Sunday — the encoding shift templates'
/// weekday masks use.
pub fn iso_weekday(date: NaiveDate) -> i16 {
    date.weekday().number_from_monday() as i16
}

/// Converts a coverage-rule weekday (0=Sunday..6=Saturday) to the ISO
/// weekday encoding (1=Monday..7=Sunday) shift templates use.
///
/// spec.md §6: "Weekday encoding quirk: the coverage rules use 0=Sun…6=Sat;
/// shift weekday masks use 1=Mon…7=Sun (ISO). Conversion: `iso = (cov == 0) ?
/// 7 : cov`."
pub fn coverage_weekday_to_iso(coverage_weekday: i16) -> i16 {
    if coverage_weekday == 0 {
        7
    } else {
        coverage_weekday
    }
}
