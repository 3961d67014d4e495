//! Calendar events produced from diary lines.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

/// One calendar occurrence.
///
/// Events order by `start` (as an instant), then `description`, `location`
/// and `active`, which is the order used when a calendar is filtered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Event {
    start: DateTime<Tz>,
    description: String,
    location: String,
    active: bool,
}

/// How an event should be presented relative to the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStyle {
    /// Starts today (takes precedence over `Inactive`)
    Today,
    Active,
    /// Cancelled with a leading `--`
    Inactive,
}

impl Event {
    pub fn new(
        start: DateTime<Tz>,
        description: impl Into<String>,
        location: impl Into<String>,
        active: bool,
    ) -> Self {
        Event {
            start,
            description: description.into(),
            location: location.into(),
            active,
        }
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    /// The diary text after the date token, markers included.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Date of the event in its own time zone.
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date() == date
    }

    pub fn style(&self, today: NaiveDate) -> EventStyle {
        if self.is_on(today) {
            EventStyle::Today
        } else if self.active {
            EventStyle::Active
        } else {
            EventStyle::Inactive
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}   {}",
            self.start.format("%a %Y-%m-%d"),
            self.description
        )
    }
}
