//! Logging setup: `tracing` events written to stderr.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LogLevel};

/// Overrides the configured level with full `EnvFilter` directives.
const FILTER_ENV: &str = "DIARYCAL_LOG";

fn directives(level: LogLevel) -> String {
    let level = level.as_directive();
    format!("warn,diarycal={level},diarycal_core={level},diarycal_dropbox={level}")
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(level: LogLevel, format: LogFormat) {
    let filter =
        EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(directives(level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Full => builder.try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_scope_level_to_own_crates() {
        let directives = directives(LogLevel::Debug);

        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("diarycal_dropbox=debug"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_warning_maps_to_warn() {
        assert_eq!(LogLevel::Warning.as_directive(), "warn");
    }
}
