//! First-time authorization with Dropbox (no-redirect code flow).

use anyhow::Result;
use tracing::info;
use url::Url;

use crate::config::DropboxConfig;
use crate::session::{Session, SessionData, request_tokens};

/// URL the user opens to grant access; Dropbox then shows a code to paste back.
pub fn authorize_url(config: &DropboxConfig) -> Url {
    let mut url = config.auth_url.clone();
    url.query_pairs_mut()
        .append_pair("client_id", &config.client_key)
        .append_pair("response_type", "code")
        .append_pair("token_access_type", "offline");
    url
}

/// Exchange an authorization code for tokens and persist the session.
pub async fn exchange_code(
    config: &DropboxConfig,
    http: &reqwest::Client,
    code: &str,
) -> Result<Session> {
    config.ensure_credentials()?;

    let code = code.trim();
    if code.is_empty() {
        anyhow::bail!("No authorization code given");
    }

    let response = request_tokens(
        config,
        http,
        &[("grant_type", "authorization_code"), ("code", code)],
    )
    .await?;

    let session = Session::new(&config.token_path, SessionData::from_response(response, None)?);
    session.save()?;
    info!("Saved Dropbox session to {}", config.token_path.display());

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_asks_for_offline_access() {
        let config = DropboxConfig {
            client_key: "my key".into(),
            ..DropboxConfig::default()
        };

        let url = authorize_url(&config);

        assert_eq!(url.host_str(), Some("www.dropbox.com"));
        assert_eq!(url.path(), "/oauth2/authorize");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("client_id".to_string(), "my key".to_string()),
                ("response_type".to_string(), "code".to_string()),
                ("token_access_type".to_string(), "offline".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_exchange_requires_credentials() {
        let http = reqwest::Client::new();
        let err = exchange_code(&DropboxConfig::default(), &http, "code")
            .await
            .err()
            .unwrap();

        assert!(err.to_string().contains("credentials"));
    }
}
