//! Expansion of a date token (`YYYYMMDD` or `YYYYMMDD#SUFFIX`) into dates.

use chrono::{Days, NaiveDate};

use crate::error::TokenFault;

const DATE_LEN: usize = 8;
const DATE_FORMAT: &str = "%Y%m%d";

/// Every day from `first` to `last`, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSpan {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl DateSpan {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        DateSpan {
            next: (first <= last).then_some(first),
            last,
        }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self::new(date, date)
    }
}

impl Iterator for DateSpan {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current
            .checked_add_days(Days::new(1))
            .filter(|next| *next <= self.last);
        Some(current)
    }
}

/// Parse a date token into the span of dates it covers.
///
/// The end date of `START#SUFFIX` is `START` with its last `SUFFIX.len()`
/// characters replaced by `SUFFIX`, so `20240101#03` runs to 2024-01-03 and
/// `20240128#0203` to 2024-02-03. An empty suffix means a single day.
pub fn expand(token: &str) -> Result<DateSpan, TokenFault> {
    let (start_str, suffix) = match token.split_once('#') {
        Some((start, suffix)) => (start, suffix),
        None => (token, ""),
    };

    let start = parse_date(start_str)?;
    if suffix.is_empty() {
        return Ok(DateSpan::single(start));
    }

    let keep = DATE_LEN.saturating_sub(suffix.len());
    let end_str = format!("{}{}", &start_str[..keep], suffix);
    let end = parse_date(&end_str)?;

    if end < start {
        return Err(TokenFault::EndBeforeStart);
    }

    Ok(DateSpan::new(start, end))
}

fn parse_date(s: &str) -> Result<NaiveDate, TokenFault> {
    if s.len() != DATE_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TokenFault::NotEightDigits);
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| TokenFault::InvalidDate)
}
