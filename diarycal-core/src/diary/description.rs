//! Ordered patterns for the free-text part of a diary line.

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Leading marker of a cancelled entry.
pub const CANCELLED_MARKER: &str = "--";

/// Strongest first. The last pattern matches anything.
const PATTERN_SOURCES: [&str; 6] = [
    r"^(?P<start_time>\d{1,2}:\d{2}) .+? @ (?P<location>.+?), (?i:m) .+?$",
    r"^(?P<start_time>\d{1,2}:\d{2}) .+? @ (?P<location>.+?)$",
    r"^(?P<start_time>\d{1,2}:\d{2}) .+?$",
    r"^.+? @ (?P<location>.+?), (?i:m) .+?$",
    r"^.+? @ (?P<location>.+?)$",
    r"(?s)^.*$",
];

static DESCRIPTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    PATTERN_SOURCES
        .iter()
        .map(|source| Regex::new(source).expect("description pattern should compile"))
        .collect()
});

/// Time and location pulled out of a description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescriptionParts<'a> {
    pub start_time: Option<NaiveTime>,
    pub location: Option<&'a str>,
}

pub fn is_cancelled(description: &str) -> bool {
    description.starts_with(CANCELLED_MARKER)
}

/// Match `description` against the pattern table, first match wins.
///
/// A leading cancellation marker is ignored while matching. A pattern whose
/// time is not a real time of day (`25:00`) does not match.
pub fn parse(description: &str) -> DescriptionParts<'_> {
    let text = description
        .strip_prefix(CANCELLED_MARKER)
        .unwrap_or(description);

    DESCRIPTION_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text).and_then(|caps| parts_from(&caps)))
        .unwrap_or_default()
}

fn parts_from<'a>(caps: &Captures<'a>) -> Option<DescriptionParts<'a>> {
    let start_time = match caps.name("start_time") {
        Some(m) => Some(parse_time(m.as_str())?),
        None => None,
    };

    Some(DescriptionParts {
        start_time,
        location: caps.name("location").map(|m| m.as_str()),
    })
}

/// `H:MM` or `HH:MM`.
fn parse_time(s: &str) -> Option<NaiveTime> {
    let (hours, minutes) = s.split_once(':')?;
    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}
