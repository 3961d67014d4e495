//! Core of diarycal: the diary-line parser and the calendar model.
//!
//! Everything here is pure. Callers hand in the diary text and get events
//! back; fetching and caching the text is up to them.

pub mod calendar;
pub mod date_range;
pub mod diary;
pub mod error;
pub mod event;
pub mod local_time;

pub use calendar::Calendar;
pub use date_range::DateRange;
pub use diary::{DiaryParser, parse};
pub use error::{DiaryError, DiaryResult, TokenFault};
pub use event::{Event, EventStyle};
