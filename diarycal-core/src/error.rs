//! Error types for diary parsing.

use thiserror::Error;

/// Why a date token could not be turned into a list of dates.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFault {
    #[error("expected eight digits (YYYYMMDD)")]
    NotEightDigits,

    #[error("not a calendar date")]
    InvalidDate,

    #[error("end date is before the start date")]
    EndBeforeStart,
}

/// Errors that can occur while parsing a diary or building a date range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiaryError {
    #[error("Malformed date token '{token}' on line {line_number} ({fault}): {line}")]
    MalformedDateToken {
        line_number: usize,
        line: String,
        token: String,
        fault: TokenFault,
    },

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

/// Result type alias for diary operations.
pub type DiaryResult<T> = Result<T, DiaryError>;
