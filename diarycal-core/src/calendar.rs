//! A query-time view over parsed events.

use chrono::{DateTime, TimeZone};

use crate::date_range::DateRange;
use crate::event::Event;

/// Events in the order the diary produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    events: Vec<Event>,
}

impl Calendar {
    pub fn new(events: Vec<Event>) -> Self {
        Calendar { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events starting in `[start, end)`, sorted.
    pub fn filter<Z: TimeZone>(&self, start: &DateTime<Z>, end: &DateTime<Z>) -> Vec<&Event> {
        let mut selected: Vec<&Event> = self
            .events
            .iter()
            .filter(|event| start <= event.start() && event.start() < end)
            .collect();

        selected.sort();
        selected
    }

    pub fn in_range(&self, range: &DateRange) -> Vec<&Event> {
        self.filter(&range.start, &range.end)
    }
}

impl FromIterator<Event> for Calendar {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Calendar::new(iter.into_iter().collect())
    }
}

impl Extend<Event> for Calendar {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::Europe::Oslo;

    fn event(day: u32, hour: u32, description: &str) -> Event {
        let start = Oslo.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap();
        Event::new(start, description, "", true)
    }

    #[test]
    fn test_filter_is_half_open_and_sorted() {
        let calendar = Calendar::new(vec![
            event(3, 0, "excluded end"),
            event(2, 12, "second"),
            event(1, 0, "first"),
            event(2, 12, "a tie"),
            event(31, 0, "way out"),
        ]);

        let start = Oslo.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Oslo.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let selected: Vec<_> = calendar
            .filter(&start, &end)
            .into_iter()
            .map(|e| e.description())
            .collect();

        assert_eq!(selected, vec!["first", "a tie", "second"]);
    }

    #[test]
    fn test_filter_bounds_in_other_zone() {
        // Oslo midnight on the 2nd is 23:00 UTC on the 1st
        let calendar = Calendar::new(vec![event(2, 0, "midnight")]);

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 22, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap();
        assert!(calendar.filter(&start, &end).is_empty());

        let end = Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 1).unwrap();
        assert_eq!(calendar.filter(&start, &end).len(), 1);
    }

    #[test]
    fn test_filter_empty_calendar() {
        let calendar = Calendar::default();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        assert!(calendar.filter(&start, &end).is_empty());
    }

    #[test]
    fn test_filter_leaves_insertion_order_untouched() {
        let calendar: Calendar = vec![event(2, 0, "later"), event(1, 0, "earlier")]
            .into_iter()
            .collect();

        let start = Oslo.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Oslo.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let _ = calendar.filter(&start, &end);

        assert_eq!(calendar.events()[0].description(), "later");
    }
}
