//! Dropbox content API: downloading and uploading named files.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::info;

use crate::config::DropboxConfig;
use crate::session::Session;

/// A remote store of text files addressed by name.
pub trait RemoteFiles {
    /// `Ok(None)` when the file does not exist.
    fn download(&self, name: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    fn upload(&self, name: &str, content: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Files in the app folder of a Dropbox account.
pub struct DropboxRemote {
    config: DropboxConfig,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ApiError {
    error_summary: String,
}

pub fn http_client(config: &DropboxConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.requests_timeout))
        .build()
        .context("Failed to build HTTP client")
}

impl DropboxRemote {
    pub fn new(config: DropboxConfig) -> Result<Self> {
        let http = http_client(&config)?;
        Ok(DropboxRemote { config, http })
    }

    async fn session(&self) -> Result<Session> {
        Session::load_valid(&self.config, &self.http).await
    }

    async fn call(&self, endpoint: &str, arg: serde_json::Value, body: String) -> Result<reqwest::Response> {
        let session = self.session().await?;
        let url = self
            .config
            .content_url
            .join(endpoint)
            .with_context(|| format!("Invalid Dropbox endpoint {}", endpoint))?;

        self.http
            .post(url)
            .bearer_auth(session.access_token())
            .header("Dropbox-API-Arg", header_safe_json(&arg))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach Dropbox ({})", endpoint))
    }
}

impl RemoteFiles for DropboxRemote {
    async fn download(&self, name: &str) -> Result<Option<String>> {
        info!("Downloading {} from Dropbox", name);

        let arg = serde_json::json!({ "path": dropbox_path(name) });
        let response = self.call("files/download", arg, String::new()).await?;
        let status = response.status();

        if status.is_success() {
            let content = response
                .text()
                .await
                .with_context(|| format!("Failed to read {} from Dropbox", name))?;
            return Ok(Some(content));
        }

        let body = response.text().await.unwrap_or_default();
        if is_not_found(status, &body) {
            return Ok(None);
        }

        anyhow::bail!("Failed to download {} from Dropbox ({}): {}", name, status, body)
    }

    async fn upload(&self, name: &str, content: &str) -> Result<()> {
        info!("Writing {} to Dropbox", name);

        let arg = serde_json::json!({ "path": dropbox_path(name), "mode": "overwrite" });
        let response = self.call("files/upload", arg, content.to_string()).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Failed to upload {} to Dropbox ({}): {}", name, status, body);
        }

        Ok(())
    }
}

fn dropbox_path(name: &str) -> String {
    format!("/{}", name.trim_start_matches('/'))
}

/// Dropbox answers 409 with a `path/not_found/...` summary for missing files.
fn is_not_found(status: StatusCode, body: &str) -> bool {
    status == StatusCode::CONFLICT
        && serde_json::from_str::<ApiError>(body)
            .is_ok_and(|err| err.error_summary.starts_with("path/not_found"))
}

/// JSON for an HTTP header: non-ASCII characters become `\uXXXX` escapes.
fn header_safe_json(value: &serde_json::Value) -> String {
    let json = value.to_string();
    let mut escaped = String::with_capacity(json.len());

    for c in json.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            for unit in c.encode_utf16(&mut [0; 2]) {
                escaped.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }

    escaped
}
