//! Toast notifications (transient success/error messages).

mod render;
mod state;

pub use render::render_toasts;
pub use state::{TOAST_TTL, Toast, ToastKind, ToastState};
