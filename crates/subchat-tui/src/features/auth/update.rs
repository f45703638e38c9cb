//! Auth feature reducer.

use chrono::{DateTime, Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use subchat_core::auth::{REFRESH_WINDOW_SECS, Session, SignUpOutcome};

use super::state::{AuthField, AuthForm, AuthMode, AuthState};
use crate::effects::UiEffect;
use crate::events::AuthUiEvent;
use crate::mutations::{ChatsMutation, StateMutation};

pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";
pub const EMPTY_CREDENTIALS: &str = "Email and password are required.";
pub const VERIFY_EMAIL_NOTICE: &str = "Account created! Please check your email to verify.";

/// What the main reducer must do with the session after an auth event.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionAction {
    Keep,
    /// The session can no longer be refreshed; sign out locally.
    Expired { error: String },
}

/// Handles a key on the sign-in / sign-up form.
pub fn handle_form_key(form: &mut AuthForm, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('n') if ctrl => {
            if !form.submitting {
                form.mode = form.mode.toggled();
                form.error = None;
                form.notice = None;
            }
            vec![]
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.focus = match form.focus {
                AuthField::Email => AuthField::Password,
                AuthField::Password => AuthField::Email,
            };
            vec![]
        }
        KeyCode::Enter => submit(form),
        KeyCode::Backspace => {
            form.focused_mut().backspace();
            vec![]
        }
        KeyCode::Delete => {
            form.focused_mut().delete();
            vec![]
        }
        KeyCode::Left => {
            form.focused_mut().move_left();
            vec![]
        }
        KeyCode::Right => {
            form.focused_mut().move_right();
            vec![]
        }
        KeyCode::Home => {
            form.focused_mut().move_home();
            vec![]
        }
        KeyCode::End => {
            form.focused_mut().move_end();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            form.error = None;
            form.focused_mut().insert(c);
            vec![]
        }
        _ => vec![],
    }
}

fn submit(form: &mut AuthForm) -> Vec<UiEffect> {
    if form.submitting {
        return vec![];
    }
    let email = form.email.value().trim().to_string();
    let password = form.password.value().to_string();
    if email.is_empty() || password.is_empty() {
        form.error = Some(EMPTY_CREDENTIALS.to_string());
        return vec![];
    }

    form.submitting = true;
    form.error = None;
    form.notice = None;
    match form.mode {
        AuthMode::SignIn => vec![UiEffect::SignIn {
            task: None,
            email,
            password,
        }],
        AuthMode::SignUp => vec![UiEffect::SignUp {
            task: None,
            email,
            password,
        }],
    }
}

/// Handles auth service results.
pub fn handle_auth_event(
    auth: &mut AuthState,
    event: AuthUiEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>, SessionAction) {
    match event {
        AuthUiEvent::SignedIn { session }
        | AuthUiEvent::SignedUp {
            outcome: SignUpOutcome::SignedIn(session),
        } => {
            let (effects, mutations) = signed_in(auth, session);
            (effects, mutations, SessionAction::Keep)
        }
        AuthUiEvent::SignedUp {
            outcome: SignUpOutcome::VerificationPending,
        } => {
            auth.form.submitting = false;
            auth.form.mode = AuthMode::SignIn;
            auth.form.password.clear();
            auth.form.focus = AuthField::Password;
            auth.form.notice = Some(VERIFY_EMAIL_NOTICE.to_string());
            (vec![], vec![], SessionAction::Keep)
        }
        AuthUiEvent::SignInFailed { error } | AuthUiEvent::SignUpFailed { error } => {
            auth.form.submitting = false;
            auth.form.error = Some(if error.trim().is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                error
            });
            (vec![], vec![], SessionAction::Keep)
        }
        AuthUiEvent::Refreshed { session } => {
            auth.refreshing = false;
            // Signed out while the refresh was in flight.
            if auth.session.is_none() {
                return (vec![], vec![], SessionAction::Keep);
            }
            auth.session = Some(session.clone());
            (
                vec![UiEffect::PersistSession {
                    session: Some(session),
                }],
                vec![],
                SessionAction::Keep,
            )
        }
        AuthUiEvent::RefreshFailed { error } => {
            auth.refreshing = false;
            if auth.session.is_none() {
                return (vec![], vec![], SessionAction::Keep);
            }
            (vec![], vec![], SessionAction::Expired { error })
        }
        AuthUiEvent::SignedOut { .. } => (vec![], vec![], SessionAction::Keep),
    }
}

fn signed_in(auth: &mut AuthState, session: Session) -> (Vec<UiEffect>, Vec<StateMutation>) {
    auth.session = Some(session.clone());
    auth.refreshing = false;
    auth.form.submitting = false;
    auth.form.password.clear();
    auth.form.error = None;
    auth.form.notice = None;
    (
        vec![
            UiEffect::PersistSession {
                session: Some(session),
            },
            UiEffect::FetchChats { task: None },
        ],
        vec![StateMutation::Chats(ChatsMutation::StartInitialLoad)],
    )
}

/// Starts a token refresh when the session is about to expire.
pub fn refresh_due(auth: &mut AuthState, now: DateTime<Utc>) -> Option<UiEffect> {
    if auth.refreshing {
        return None;
    }
    let session = auth.session.as_ref()?;
    if !session.expires_within(Duration::seconds(REFRESH_WINDOW_SECS), now) {
        return None;
    }
    auth.refreshing = true;
    Some(UiEffect::RefreshSession {
        task: None,
        session: session.clone(),
    })
}
