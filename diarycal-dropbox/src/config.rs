//! Settings for talking to Dropbox.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

static DEFAULT_AUTH_URL: &str = "https://www.dropbox.com/oauth2/authorize";
static DEFAULT_TOKEN_URL: &str = "https://api.dropboxapi.com/oauth2/token";
static DEFAULT_CONTENT_URL: &str = "https://content.dropboxapi.com/2/";

fn default_auth_url() -> Url {
    Url::parse(DEFAULT_AUTH_URL).expect("default auth url is valid")
}

fn default_token_url() -> Url {
    Url::parse(DEFAULT_TOKEN_URL).expect("default token url is valid")
}

fn default_content_url() -> Url {
    Url::parse(DEFAULT_CONTENT_URL).expect("default content url is valid")
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("diarycal").join("dropbox-session.toml"))
        .unwrap_or_else(|| PathBuf::from("dropbox-session.toml"))
}

fn default_requests_timeout() -> u64 {
    30
}

fn default_cache_timeout() -> u64 {
    3600
}

/// The `[dropbox]` section of the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DropboxConfig {
    /// App key from the Dropbox app console
    #[serde(default)]
    pub client_key: String,

    #[serde(default)]
    pub client_secret: String,

    #[serde(default = "default_auth_url")]
    pub auth_url: Url,

    #[serde(default = "default_token_url")]
    pub token_url: Url,

    /// Base of the content API, with a trailing slash
    #[serde(default = "default_content_url")]
    pub content_url: Url,

    /// Where the OAuth session is persisted
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,

    /// Seconds before an HTTP request is abandoned
    #[serde(default = "default_requests_timeout")]
    pub requests_timeout: u64,

    /// Seconds a cached diary is served without asking Dropbox; 0 disables the cache
    #[serde(default = "default_cache_timeout")]
    pub cache_timeout: u64,
}

impl Default for DropboxConfig {
    fn default() -> Self {
        DropboxConfig {
            client_key: String::new(),
            client_secret: String::new(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            content_url: default_content_url(),
            token_path: default_token_path(),
            requests_timeout: default_requests_timeout(),
            cache_timeout: default_cache_timeout(),
        }
    }
}

impl DropboxConfig {
    pub fn ensure_credentials(&self) -> anyhow::Result<()> {
        if self.client_key.is_empty() || self.client_secret.is_empty() {
            anyhow::bail!(
                "Dropbox credentials not configured.\n\n\
                Add them to the [dropbox] section of the config file:\n\n\
                client_key = \"your-app-key\"\n\
                client_secret = \"your-app-secret\"\n\n\
                or set DROPBOX_CLIENT_KEY and DROPBOX_CLIENT_SECRET.\n\
                See https://www.dropbox.com/developers/apps for setup."
            );
        }
        Ok(())
    }
}
