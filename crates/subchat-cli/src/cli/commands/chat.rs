//! Dashboard command handler.

use anyhow::{Context, Result};
use subchat_core::auth::{AuthClient, SessionStore, restore_session};
use subchat_core::config::Config;

/// Restores the stored session and opens the dashboard.
///
/// Without a session the dashboard starts on the sign-in form.
pub async fn run(config: &Config, initial_chat: Option<String>) -> Result<()> {
    let auth = AuthClient::new(config.backend.auth_url()?);
    let session = restore_session(&SessionStore::default(), &auth)
        .await
        .context("restore session")?;

    subchat_tui::run_interactive(config, session, initial_chat)
        .await
        .context("dashboard failed")
}
