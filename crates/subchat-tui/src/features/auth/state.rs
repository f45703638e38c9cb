use subchat_core::auth::Session;

use crate::common::TextField;
use crate::mutations::AuthMutation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Sign Up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Email,
    Password,
}

/// Email/password form shown while signed out.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: TextField,
    pub password: TextField,
    pub focus: AuthField,
    /// Inline error from validation or the auth service.
    pub error: Option<String>,
    /// Informational message (verification pending, session expired).
    pub notice: Option<String>,
    pub submitting: bool,
}

impl AuthForm {
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    /// Clears the form after a session ends, keeping the email for convenience.
    pub fn reset_keep_email(&mut self) {
        let email = std::mem::take(&mut self.email);
        *self = Self {
            email,
            focus: AuthField::Password,
            ..Self::default()
        };
        if self.email.is_empty() {
            self.focus = AuthField::Email;
        }
    }
}

/// Authentication state. The dashboard renders only while a session exists.
#[derive(Debug, Default)]
pub struct AuthState {
    pub session: Option<Session>,
    pub form: AuthForm,
    /// A token refresh is in flight.
    pub refreshing: bool,
}

impl AuthState {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn apply(&mut self, mutation: AuthMutation) {
        match mutation {
            AuthMutation::SignOut => {
                self.session = None;
                self.refreshing = false;
                self.form.reset_keep_email();
            }
            AuthMutation::SetNotice(notice) => {
                self.form.notice = Some(notice);
            }
        }
    }
}
