//! diarycal configuration at ~/.config/diarycal/config.toml
//!
//! Values come from built-in defaults, then the config file, then a few
//! environment variables:
//!
//! | variable                | key                     |
//! |-------------------------|-------------------------|
//! | `DIARYCAL_LOG_LEVEL`    | `log.level`             |
//! | `DIARYCAL_TIMEZONE`     | `timezone`              |
//! | `DROPBOX_CLIENT_KEY`    | `dropbox.client_key`    |
//! | `DROPBOX_CLIENT_SECRET` | `dropbox.client_secret` |

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::ValueEnum;
use diarycal_dropbox::DropboxConfig;
use serde::{Deserialize, Serialize};

const ENV_OVERRIDES: [(&str, &str); 4] = [
    ("DIARYCAL_LOG_LEVEL", "log.level"),
    ("DIARYCAL_TIMEZONE", "timezone"),
    ("DROPBOX_CLIENT_KEY", "dropbox.client_key"),
    ("DROPBOX_CLIENT_SECRET", "dropbox.client_secret"),
];

const REDACTED: &str = "********";

fn default_timezone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC)
}

fn default_diaries() -> Vec<String> {
    vec!["diary.txt".to_string()]
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("diarycal"))
        .unwrap_or_else(|| PathBuf::from(".diarycal-cache"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Zone that diary times are written in
    #[serde(default = "default_timezone")]
    pub timezone: Tz,

    /// Diary files in Dropbox, read in order
    #[serde(default = "default_diaries")]
    pub diaries: Vec<String>,

    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub dropbox: DropboxConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathConfig {
    #[serde(default = "default_cache_dir")]
    pub cache: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig {
            cache: default_cache_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timezone: default_timezone(),
            diaries: default_diaries(),
            paths: PathConfig::default(),
            log: LogConfig::default(),
            dropbox: DropboxConfig::default(),
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("diarycal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/diarycal/config.toml, creating a commented template first if needed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path, |name| std::env::var(name).ok())
    }

    /// Load from `path` (which may be missing) with overrides looked up through `env`.
    pub fn load_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder =
            ::config::Config::builder().add_source(::config::File::from(path).required(false));

        for (variable, key) in ENV_OVERRIDES {
            builder = builder
                .set_override_option(key, env(variable))
                .with_context(|| format!("Invalid value in {}", variable))?;
        }

        let mut config: Config = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        config.paths.cache = expand_tilde(&config.paths.cache);
        config.dropbox.token_path = expand_tilde(&config.dropbox.token_path);

        Ok(config)
    }

    /// A copy that is safe to print.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if !config.dropbox.client_secret.is_empty() {
            config.dropbox.client_secret = REDACTED.to_string();
        }
        config
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = "\
# diarycal configuration

# Zone that diary times are written in (defaults to the system zone):
# timezone = \"Europe/Oslo\"

# Diary files in your Dropbox app folder:
# diaries = [\"diary.txt\"]

# [log]
# level = \"warning\"   # trace, debug, info, warning, error
# format = \"compact\"  # compact, full, pretty, json

# [dropbox]
# client_key = \"your-app-key\"
# client_secret = \"your-app-secret\"
# cache_timeout = 3600     # seconds a downloaded diary is reused
# requests_timeout = 30
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create config directory {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Could not write config file {}", path.display()))?;

        Ok(())
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
