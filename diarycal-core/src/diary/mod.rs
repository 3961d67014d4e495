//! Parsing of diary text into events.
//!
//! A diary has one entry per line: a date token, a tab, and a description.
//!
//! ```text
//! 20240115	09:00 Meeting @ Room 1, m bring notes
//! 20240101#03	Trip
//! 20240120	--Cancelled dinner
//! ```

pub mod date_token;
pub mod description;

use chrono::NaiveTime;
use chrono_tz::Tz;

use crate::error::{DiaryError, DiaryResult};
use crate::event::Event;
use crate::local_time;

/// Parses diary text with event times in a fixed time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiaryParser {
    tz: Tz,
}

impl DiaryParser {
    pub fn new(tz: Tz) -> Self {
        DiaryParser { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Parse every line of `text`.
    ///
    /// Events come out in line order, and within a line in date order. Blank
    /// lines are skipped. The first malformed date token aborts the parse.
    pub fn parse(&self, text: &str) -> DiaryResult<Vec<Event>> {
        let mut events = Vec::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            events.extend(self.parse_line(index + 1, line)?);
        }

        Ok(events)
    }

    fn parse_line(&self, line_number: usize, line: &str) -> DiaryResult<Vec<Event>> {
        // No tab leaves an empty date token, which is rejected below
        let (token, text) = line.split_once('\t').unwrap_or(("", line));

        let dates = date_token::expand(token).map_err(|fault| DiaryError::MalformedDateToken {
            line_number,
            line: line.to_string(),
            token: token.to_string(),
            fault,
        })?;

        let parts = description::parse(text);
        let time = parts.start_time.unwrap_or(NaiveTime::MIN);
        let location = parts.location.unwrap_or_default();
        let active = !description::is_cancelled(text);

        Ok(dates
            .map(|date| Event::new(local_time::at(self.tz, date, time), text, location, active))
            .collect())
    }
}

/// Parse `text` with event times in `tz`.
pub fn parse(text: &str, tz: Tz) -> DiaryResult<Vec<Event>> {
    DiaryParser::new(tz).parse(text)
}
