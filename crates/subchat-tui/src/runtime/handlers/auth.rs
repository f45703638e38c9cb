use subchat_core::auth::{AuthClient, Session};

use crate::events::{AuthUiEvent, UiEvent};

/// Signs in with email and password.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn sign_in(client: AuthClient, email: String, password: String) -> UiEvent {
    UiEvent::Auth(match client.sign_in_email_password(&email, &password).await {
        Ok(session) => AuthUiEvent::SignedIn { session },
        Err(e) => AuthUiEvent::SignInFailed {
            error: e.to_string(),
        },
    })
}

pub async fn sign_up(client: AuthClient, email: String, password: String) -> UiEvent {
    UiEvent::Auth(match client.sign_up_email_password(&email, &password).await {
        Ok(outcome) => AuthUiEvent::SignedUp { outcome },
        Err(e) => AuthUiEvent::SignUpFailed {
            error: e.to_string(),
        },
    })
}

pub async fn session_refresh(client: AuthClient, session: Session) -> UiEvent {
    UiEvent::Auth(match client.refresh(&session).await {
        Ok(session) => AuthUiEvent::Refreshed { session },
        Err(e) => AuthUiEvent::RefreshFailed {
            error: e.to_string(),
        },
    })
}

/// Revokes the refresh token. Local state is already cleared, so a failure
/// is only logged.
pub async fn sign_out(client: AuthClient, session: Session) -> UiEvent {
    let error = match client.sign_out(&session).await {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(error = %e, "server-side sign out failed");
            Some(e.to_string())
        }
    };
    UiEvent::Auth(AuthUiEvent::SignedOut { error })
}
