//! Turning wall-clock dates and times into zone-aware instants.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Resolve a local wall-clock time in `tz`.
///
/// Ambiguous times (clocks going back) resolve to the earlier instant.
/// Times inside a gap (clocks going forward) are moved one hour later.
pub fn resolve(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => match tz.from_local_datetime(&(naive + Duration::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
            LocalResult::None => tz.from_utc_datetime(&naive),
        },
    }
}

/// `date` at `time` in `tz`.
pub fn at(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    resolve(tz, date.and_time(time))
}

/// Start of `date` in `tz`.
pub fn midnight(tz: Tz, date: NaiveDate) -> DateTime<Tz> {
    at(tz, date, NaiveTime::MIN)
}
