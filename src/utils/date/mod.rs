// Date helpers shared by the timeline services

use chrono::{DateTime, Datelike, Local, NaiveDate};

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Promotes a calendar date to local midnight.
pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    date.and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(Local)
        .unwrap()
}
