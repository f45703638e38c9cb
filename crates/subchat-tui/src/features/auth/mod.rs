//! Auth feature slice: session gate, sign-in / sign-up form, refresh timing.

mod render;
mod state;
mod update;

pub use render::render_auth_screen;
pub use state::{AuthField, AuthForm, AuthMode, AuthState};
pub use update::{
    EMPTY_CREDENTIALS, SessionAction, UNKNOWN_ERROR, VERIFY_EMAIL_NOTICE, handle_auth_event,
    handle_form_key, refresh_due,
};
