//! Colored terminal rendering for diarycal-core types.

use chrono::NaiveDate;
use diarycal_core::{Event, EventStyle};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering relative to the current date.
pub trait Render {
    fn render(&self, today: NaiveDate) -> String;
}

impl Render for Event {
    fn render(&self, today: NaiveDate) -> String {
        let line = self.to_string();

        match self.style(today) {
            EventStyle::Today => line.red().to_string(),
            EventStyle::Active => line.white().to_string(),
            EventStyle::Inactive => line.bright_black().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Oslo;

    #[test]
    fn test_render_keeps_text_and_colors_by_style() {
        let start = Oslo.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let other_day = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();

        let active = Event::new(start, "Walk", "", true);
        let cancelled = Event::new(start, "--Walk", "", false);

        assert!(active.render(today).contains("Mon 2024-01-15   Walk"));
        assert_eq!(active.render(today), cancelled.render(today).replace("--", ""));
        assert_ne!(
            active.render(other_day),
            cancelled.render(other_day).replace("--", "")
        );
    }
}
