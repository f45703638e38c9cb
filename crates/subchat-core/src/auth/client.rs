//! Client for the hosted auth service (email/password flow).

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::store::{Session, SessionUser};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The service rejected the request (bad credentials, user exists, ...).
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode auth response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("This account requires multi-factor sign in, which subchat does not support")]
    MfaRequired,

    #[error("Auth service returned no session")]
    NoSession,
}

/// Result of a sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The project signs new users in immediately.
    SignedIn(Session),
    /// The project requires email verification first.
    VerificationPending,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSession {
    access_token: String,
    access_token_expires_in: i64,
    refresh_token: String,
    user: Option<WireUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct SessionPayload {
    session: Option<WireSession>,
    #[serde(default)]
    mfa: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct WireError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl WireSession {
    fn into_session(self, now: DateTime<Utc>, fallback_user: Option<&SessionUser>) -> Session {
        let user = match (self.user, fallback_user) {
            (Some(user), _) => SessionUser {
                id: user.id,
                email: user.email,
                display_name: user.display_name.unwrap_or_default(),
            },
            (None, Some(user)) => user.clone(),
            (None, None) => SessionUser {
                id: String::new(),
                email: None,
                display_name: String::new(),
            },
        };
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: now + Duration::seconds(self.access_token_expires_in),
            user,
        }
    }
}

/// Display name used at sign-up: the local part of the email.
pub fn display_name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn sign_in_email_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let payload: SessionPayload = self
            .post(
                "signin/email-password",
                &json!({ "email": email, "password": password }),
            )
            .await?;
        if payload.session.is_none() && payload.mfa.as_ref().is_some_and(|m| !m.is_null()) {
            return Err(AuthError::MfaRequired);
        }
        let session = payload.session.ok_or(AuthError::NoSession)?;
        tracing::info!("signed in");
        Ok(session.into_session(Utc::now(), None))
    }

    pub async fn sign_up_email_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let payload: SessionPayload = self
            .post(
                "signup/email-password",
                &json!({
                    "email": email,
                    "password": password,
                    "options": { "displayName": display_name_from_email(email) }
                }),
            )
            .await?;
        Ok(match payload.session {
            Some(session) => SignUpOutcome::SignedIn(session.into_session(Utc::now(), None)),
            None => SignUpOutcome::VerificationPending,
        })
    }

    /// Exchanges the refresh token for a new access token.
    pub async fn refresh(&self, session: &Session) -> Result<Session, AuthError> {
        let wire: WireSession = self
            .post(
                "token",
                &json!({ "refreshToken": session.refresh_token }),
            )
            .await?;
        tracing::debug!("session refreshed");
        Ok(wire.into_session(Utc::now(), Some(&session.user)))
    }

    /// Revokes the refresh token server-side.
    pub async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint("signout"))
            .json(&json!({ "refreshToken": session.refresh_token }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, AuthError> {
        tracing::debug!(path, "auth request");
        let response = self.http.post(self.endpoint(path)).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let err = api_error(status.as_u16(), &text);
            tracing::warn!(path, status = status.as_u16(), error = %err, "auth request failed");
            return Err(err);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

fn api_error(status: u16, body: &str) -> AuthError {
    let parsed = serde_json::from_str::<WireError>(body).ok();
    let code = parsed.as_ref().and_then(|e| e.error.clone());
    let message = parsed
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Auth request failed (HTTP {status})"));
    AuthError::Api {
        status,
        message,
        code,
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::store::test_session;

    fn session_json() -> serde_json::Value {
        json!({
            "accessToken": "at-1",
            "accessTokenExpiresIn": 900,
            "refreshToken": "rt-1",
            "refreshTokenId": "rid",
            "user": { "id": "u-1", "email": "ada@example.com", "displayName": "ada" }
        })
    }

    fn client_for(server: &MockServer) -> AuthClient {
        AuthClient::new(Url::parse(&format!("{}/v1", server.uri())).unwrap())
    }

    #[test]
    fn test_display_name_from_email() {
        assert_eq!(display_name_from_email("ada@example.com"), "ada");
        assert_eq!(display_name_from_email("no-at-sign"), "no-at-sign");
    }

    #[tokio::test]
    async fn test_sign_in_returns_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/signin/email-password"))
            .and(body_json(json!({ "email": "ada@example.com", "password": "pw" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "session": session_json(), "mfa": null })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let before = Utc::now();
        let session = client_for(&server)
            .sign_in_email_password("ada@example.com", "pw")
            .await
            .unwrap();
        assert_eq!(session.access_token, "at-1");
        assert_eq!(session.user.display_name, "ada");
        assert!(session.expires_at >= before + Duration::seconds(900));
    }

    #[tokio::test]
    async fn test_sign_in_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/signin/email-password"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": 401,
                "message": "Incorrect email or password",
                "error": "invalid-email-password"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .sign_in_email_password("ada@example.com", "bad")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Incorrect email or password");
        assert!(matches!(
            err,
            AuthError::Api { status: 401, code: Some(ref c), .. } if c == "invalid-email-password"
        ));
    }

    #[tokio::test]
    async fn test_sign_in_mfa_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/signin/email-password"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "session": null, "mfa": { "ticket": "t" } })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .sign_in_email_password("ada@example.com", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MfaRequired));
    }

    #[tokio::test]
    async fn test_sign_up_sends_display_name_and_detects_verification() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/signup/email-password"))
            .and(body_json(json!({
                "email": "grace@example.com",
                "password": "pw",
                "options": { "displayName": "grace" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "session": null })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .sign_up_email_password("grace@example.com", "pw")
            .await
            .unwrap();
        assert_eq!(outcome, SignUpOutcome::VerificationPending);
    }

    #[tokio::test]
    async fn test_refresh_keeps_user_when_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/token"))
            .and(body_json(json!({ "refreshToken": "refresh-secret" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "at-2",
                "accessTokenExpiresIn": 900,
                "refreshToken": "rt-2",
                "user": null
            })))
            .mount(&server)
            .await;

        let old = test_session(Utc::now());
        let fresh = client_for(&server).refresh(&old).await.unwrap();
        assert_eq!(fresh.access_token, "at-2");
        assert_eq!(fresh.refresh_token, "rt-2");
        assert_eq!(fresh.user, old.user);
    }

    #[tokio::test]
    async fn test_sign_out_posts_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/signout"))
            .and(body_json(json!({ "refreshToken": "refresh-secret" })))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .sign_out(&test_session(Utc::now()))
            .await
            .unwrap();
    }

    #[test]
    fn test_api_error_without_json_body() {
        let err = api_error(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Auth request failed (HTTP 502)");
    }
}
