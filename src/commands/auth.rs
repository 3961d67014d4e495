use anyhow::Result;
use diarycal_dropbox::{auth, http_client};
use owo_colors::OwoColorize;

use crate::config::Config;

/// Connect diarycal to a Dropbox account and store the session.
pub async fn run(config: &Config) -> Result<()> {
    let dropbox = &config.dropbox;
    dropbox.ensure_credentials()?;

    let url = auth::authorize_url(dropbox);

    println!("1. Go to: {}", url);
    if open::that(url.as_str()).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }
    println!("2. Click 'Allow' (you might have to log in first).");
    println!("3. Copy the authorization code.");

    let code: String = dialoguer::Input::new()
        .with_prompt("Enter the authorization code")
        .interact_text()?;

    let http = http_client(dropbox)?;
    auth::exchange_code(dropbox, &http, &code).await?;

    println!("{}", "Authentication successful!".green());
    Ok(())
}
