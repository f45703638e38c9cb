//! Cross-slice state mutations.
//!
//! Feature reducers and overlays return these mutations to request changes
//! outside their own slice. The main reducer applies them in order.

use crate::toast::ToastKind;

/// Mutations for cross-slice state changes.
#[derive(Debug)]
pub enum StateMutation {
    Toast(ToastMutation),
    Chats(ChatsMutation),
    Auth(AuthMutation),
}

#[derive(Debug)]
pub enum ToastMutation {
    Push { kind: ToastKind, text: String },
}

/// Chat list slice mutations requested by other slices.
#[derive(Debug)]
pub enum ChatsMutation {
    /// Forget the cached list and show Loading (initial fetch).
    StartInitialLoad,
    /// Drop everything (sign-out).
    Reset,
}

/// Auth slice mutations requested by other slices.
#[derive(Debug)]
pub enum AuthMutation {
    /// Drop the session and reset the form.
    SignOut,
    /// Show a notice on the sign-in form (e.g. why the user was signed out).
    SetNotice(String),
}

impl StateMutation {
    pub fn success(text: impl Into<String>) -> Self {
        StateMutation::Toast(ToastMutation::Push {
            kind: ToastKind::Success,
            text: text.into(),
        })
    }

    pub fn error(text: impl Into<String>) -> Self {
        StateMutation::Toast(ToastMutation::Push {
            kind: ToastKind::Error,
            text: text.into(),
        })
    }
}
