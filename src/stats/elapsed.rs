//! Whole-day distances between a reference date and an explicitly supplied "now".

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Midnight UTC at the start of `date`, which is how bare dataset dates are read.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Ceiling of `|now - reference|` in days. Never negative, whichever side of `now` the reference is on.
pub fn days_since(reference: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - reference).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Floor of `now - reference` in days; negative for future references.
pub fn days_ago(reference: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - reference).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}
