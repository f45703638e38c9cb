//! Authentication: the auth service client and local session storage.

pub mod client;
pub mod store;

use anyhow::Result;
use chrono::{Duration, Utc};
pub use client::{AuthClient, AuthError, SignUpOutcome, display_name_from_email};
pub use store::{Session, SessionStore, SessionUser};

/// Access tokens closer than this many seconds to expiry are refreshed.
pub const REFRESH_WINDOW_SECS: i64 = 60;

/// Loads the stored session, refreshing it when it is about to expire.
///
/// A rejected refresh clears the stored session and returns `None`. A
/// transport failure keeps the stored session so offline startup still
/// reaches the dashboard (requests will fail until the network returns).
///
/// # Errors
/// Returns an error if the session file cannot be read or written.
pub async fn restore_session(store: &SessionStore, client: &AuthClient) -> Result<Option<Session>> {
    let Some(session) = store.load()? else {
        return Ok(None);
    };
    if !session.expires_within(Duration::seconds(REFRESH_WINDOW_SECS), Utc::now()) {
        return Ok(Some(session));
    }

    match client.refresh(&session).await {
        Ok(fresh) => {
            store.save(&fresh)?;
            Ok(Some(fresh))
        }
        Err(AuthError::Transport(e)) => {
            tracing::warn!(error = %e, "session refresh unreachable, keeping stored session");
            Ok(Some(session))
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored session rejected, signing out");
            store.clear()?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::store::test_session;

    #[tokio::test]
    async fn test_restore_without_stored_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let client = AuthClient::new(Url::parse("http://127.0.0.1:9/v1").unwrap());
        assert!(restore_session(&store, &client).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_restore_fresh_session_skips_refresh() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let session = test_session(Utc::now() + Duration::hours(1));
        store.save(&session).unwrap();

        let client = AuthClient::new(Url::parse("http://127.0.0.1:9/v1").unwrap());
        let restored = restore_session(&store, &client).await.unwrap();
        assert_eq!(restored, Some(session));
    }

    #[tokio::test]
    async fn test_restore_refreshes_expired_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "at-new",
                "accessTokenExpiresIn": 900,
                "refreshToken": "rt-new"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store
            .save(&test_session(Utc::now() - Duration::minutes(5)))
            .unwrap();

        let client = AuthClient::new(Url::parse(&format!("{}/v1", server.uri())).unwrap());
        let restored = restore_session(&store, &client).await.unwrap().unwrap();
        assert_eq!(restored.access_token, "at-new");
        assert_eq!(store.load().unwrap().unwrap().access_token, "at-new");
    }

    #[tokio::test]
    async fn test_restore_clears_rejected_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": 401,
                "message": "Invalid or expired refresh token",
                "error": "invalid-refresh-token"
            })))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store
            .save(&test_session(Utc::now() - Duration::minutes(5)))
            .unwrap();

        let client = AuthClient::new(Url::parse(&format!("{}/v1", server.uri())).unwrap());
        assert!(restore_session(&store, &client).await.unwrap().is_none());
        assert!(store.load().unwrap().is_none());
    }
}
