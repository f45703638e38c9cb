//! Account command handlers.

use anyhow::{Context, Result, bail};
use chrono::Local;
use subchat_core::auth::{AuthClient, Session, SessionStore, SignUpOutcome, restore_session};
use subchat_core::config::Config;

fn validate(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() || password.is_empty() {
        bail!("Email and password are required");
    }
    Ok(())
}

fn save(session: &Session) -> Result<()> {
    let store = SessionStore::default();
    store
        .save(session)
        .with_context(|| format!("save session to {}", store.path().display()))
}

pub async fn login(config: &Config, email: &str, password: &str) -> Result<()> {
    validate(email, password)?;
    let client = AuthClient::new(config.backend.auth_url()?);
    let session = client
        .sign_in_email_password(email.trim(), password)
        .await
        .context("sign in")?;
    save(&session)?;
    println!("Signed in as {}", session.user.label());
    Ok(())
}

pub async fn signup(config: &Config, email: &str, password: &str) -> Result<()> {
    validate(email, password)?;
    let client = AuthClient::new(config.backend.auth_url()?);
    let outcome = client
        .sign_up_email_password(email.trim(), password)
        .await
        .context("sign up")?;
    match outcome {
        SignUpOutcome::SignedIn(session) => {
            save(&session)?;
            println!("Account created. Signed in as {}", session.user.label());
        }
        SignUpOutcome::VerificationPending => {
            println!("Account created. Check your email to verify it, then run `subchat login`.");
        }
    }
    Ok(())
}

/// Revokes the session server-side (best effort) and deletes it locally.
pub async fn logout(config: &Config) -> Result<()> {
    let store = SessionStore::default();
    let Some(session) = store.load().context("load session")? else {
        println!("Not signed in.");
        return Ok(());
    };

    let client = AuthClient::new(config.backend.auth_url()?);
    if let Err(e) = client.sign_out(&session).await {
        tracing::warn!(error = %e, "server sign-out failed");
        eprintln!("Warning: server sign-out failed: {e}");
    }
    store.clear().context("clear session")?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
    let client = AuthClient::new(config.backend.auth_url()?);
    let Some(session) = restore_session(&SessionStore::default(), &client)
        .await
        .context("restore session")?
    else {
        println!("Not signed in.");
        return Ok(());
    };

    println!("{}", session.user.label());
    if let Some(email) = &session.user.email {
        println!("Email: {email}");
    }
    println!(
        "Token expires: {}",
        session
            .expires_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
    );
    Ok(())
}
