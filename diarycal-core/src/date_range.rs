//! Display windows for calendar queries.

use chrono::{DateTime, Datelike, Days, NaiveDate};
use chrono_tz::Tz;

use crate::error::{DiaryError, DiaryResult};
use crate::local_time;

/// Half-open window `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl DateRange {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        DateRange { start, end }
    }

    /// From `date` until the Monday `num_weeks` weeks on from the start of its week.
    ///
    /// The window always closes on a week boundary, so a Wednesday start with
    /// `num_weeks = 1` covers Wednesday through Sunday.
    pub fn weeks_from(date: NaiveDate, num_weeks: u32, tz: Tz) -> DiaryResult<Self> {
        let monday = date
            .checked_sub_days(Days::new(date.weekday().num_days_from_monday().into()))
            .ok_or_else(|| out_of_range(date))?;
        let end = monday
            .checked_add_days(Days::new(7 * u64::from(num_weeks)))
            .ok_or_else(|| out_of_range(date))?;

        Ok(DateRange {
            start: local_time::midnight(tz, date),
            end: local_time::midnight(tz, end),
        })
    }

    /// The whole calendar year containing `date`.
    pub fn year_of(date: NaiveDate, tz: Tz) -> DiaryResult<Self> {
        let first = NaiveDate::from_ymd_opt(date.year(), 1, 1).ok_or_else(|| out_of_range(date))?;
        let next = NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).ok_or_else(|| out_of_range(date))?;

        Ok(DateRange {
            start: local_time::midnight(tz, first),
            end: local_time::midnight(tz, next),
        })
    }

    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        &self.start <= instant && instant < &self.end
    }
}

fn out_of_range(date: NaiveDate) -> DiaryError {
    DiaryError::DateOutOfRange(format!("cannot build a range around {}", date))
}
