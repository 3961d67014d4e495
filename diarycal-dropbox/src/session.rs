//! Creates a valid Dropbox session (access token) that we can use to call the API

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DropboxConfig;

/// Tokens are treated as expired this long before Dropbox says they are.
const EXPIRY_MARGIN_SECONDS: i64 = 10;

pub struct Session {
    path: PathBuf,
    data: SessionData,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionData {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

/// Body of a successful response from the token endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl SessionData {
    pub fn new(access_token: String, refresh_token: String, expires_at: DateTime<Utc>) -> Self {
        SessionData {
            access_token,
            refresh_token,
            expires_at,
        }
    }

    /// Build session data from a token response.
    ///
    /// Dropbox only sends a refresh token on the initial exchange, so the
    /// previous one is kept unless a new one arrives.
    pub(crate) fn from_response(
        response: TokenResponse,
        previous_refresh_token: Option<&str>,
    ) -> Result<Self> {
        let refresh_token = response
            .refresh_token
            .filter(|token| !token.is_empty())
            .or_else(|| previous_refresh_token.map(str::to_string))
            .context("Dropbox did not return a refresh token")?;

        Ok(SessionData {
            access_token: response.access_token,
            refresh_token,
            expires_at: Utc::now() + Duration::seconds(response.expires_in),
        })
    }
}

impl Session {
    pub fn new(path: impl Into<PathBuf>, data: SessionData) -> Self {
        Session {
            path: path.into(),
            data,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.data.access_token
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    // Load a session and refresh it if expired:
    pub async fn load_valid(config: &DropboxConfig, http: &reqwest::Client) -> Result<Self> {
        let mut session = Self::load(&config.token_path)?;

        if session.is_expired() {
            session.refresh(config, http).await?;
        }

        Ok(session)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Dropbox session not found at {}.\n\
                Run `diarycal auth` first.",
                path.display()
            );
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read Dropbox session from {}", path.display()))?;

        let data: SessionData = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse Dropbox session from {}", path.display()))?;

        Ok(Session {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(&self.data).context("Failed to serialize session")?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))?;

        // Set to owner-only (0600) since file contains OAuth tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", self.path.display()))?;
        }

        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.data.expires_at < now + Duration::seconds(EXPIRY_MARGIN_SECONDS)
    }

    async fn refresh(&mut self, config: &DropboxConfig, http: &reqwest::Client) -> Result<()> {
        info!("Refreshing the Dropbox token");
        config.ensure_credentials()?;

        let response = request_tokens(
            config,
            http,
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.data.refresh_token.as_str()),
            ],
        )
        .await?;

        self.data = SessionData::from_response(response, Some(self.data.refresh_token.as_str()))?;
        self.save()?;

        Ok(())
    }
}

/// POST a grant to the token endpoint with the app credentials.
pub(crate) async fn request_tokens(
    config: &DropboxConfig,
    http: &reqwest::Client,
    grant: &[(&str, &str)],
) -> Result<TokenResponse> {
    let mut form = grant.to_vec();
    form.push(("client_id", config.client_key.as_str()));
    form.push(("client_secret", config.client_secret.as_str()));

    let response = http
        .post(config.token_url.clone())
        .form(&form)
        .send()
        .await
        .context("Failed to send token request to Dropbox")?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        anyhow::bail!("Dropbox token request failed ({}): {}", status, error_text);
    }

    response
        .json()
        .await
        .context("Failed to parse token response from Dropbox")
}
