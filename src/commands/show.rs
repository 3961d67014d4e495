use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use diarycal_core::{Calendar, DateRange, DiaryParser};
use diarycal_dropbox::{DiaryStore, ReadOptions, RemoteFiles};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::config::Config;
use crate::render::Render;

pub struct ShowArgs {
    /// First date shown (defaults to today)
    pub date: Option<NaiveDate>,
    pub num_weeks: u32,
    pub full_year: bool,
    /// Bypass the cache
    pub fresh: bool,
}

pub async fn run(config: &Config, args: ShowArgs) -> Result<()> {
    let tz = config.timezone;
    let today = Utc::now().with_timezone(&tz).date_naive();
    let date = args.date.unwrap_or(today);

    let range = if args.full_year {
        DateRange::year_of(date, tz)?
    } else {
        DateRange::weeks_from(date, args.num_weeks, tz)?
    };
    debug!("Time range: {} - {}", range.start, range.end);

    let store = DiaryStore::dropbox(&config.dropbox, &config.paths.cache)?;
    let options = ReadOptions {
        fresh: args.fresh,
        allow_stale: true,
        missing_ok: false,
    };
    let calendar = load_calendar(&store, &config.diaries, DiaryParser::new(tz), options).await?;

    let events = calendar.in_range(&range);
    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in events {
        println!("{}", event.render(today));
    }

    Ok(())
}

/// Read and parse every diary into one calendar.
async fn load_calendar<R: RemoteFiles>(
    store: &DiaryStore<R>,
    diaries: &[String],
    parser: DiaryParser,
    options: ReadOptions,
) -> Result<Calendar> {
    let mut calendar = Calendar::default();

    for name in diaries {
        let text = store.read(name, options).await?;
        let events = parser
            .parse(&text)
            .with_context(|| format!("Could not parse diary file {}", name))?;

        debug!("{} events in {}", events.len(), name);
        calendar.extend(events);
    }

    Ok(calendar)
}
