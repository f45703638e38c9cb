use std::time::{Duration, Instant};

use crate::mutations::ToastMutation;

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// At most this many toasts are kept; older ones are dropped first.
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    pub created_at: Instant,
}

#[derive(Debug, Default)]
pub struct ToastState {
    items: Vec<Toast>,
}

impl ToastState {
    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) {
        self.push_at(kind, text, Instant::now());
    }

    pub fn push_at(&mut self, kind: ToastKind, text: impl Into<String>, now: Instant) {
        self.items.push(Toast {
            kind,
            text: text.into(),
            created_at: now,
        });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
    }

    /// Drops toasts older than `TOAST_TTL`.
    pub fn expire(&mut self, now: Instant) {
        self.items
            .retain(|toast| now.saturating_duration_since(toast.created_at) < TOAST_TTL);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.items.last()
    }

    pub fn apply(&mut self, mutation: ToastMutation) {
        let ToastMutation::Push { kind, text } = mutation;
        self.push(kind, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_drops_old_toasts() {
        let start = Instant::now();
        let mut toasts = ToastState::default();
        toasts.push_at(ToastKind::Success, "old", start);
        toasts.push_at(ToastKind::Error, "new", start + Duration::from_secs(3));

        toasts.expire(start + Duration::from_secs(5));
        let texts: Vec<_> = toasts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["new"]);
    }

    #[test]
    fn test_apply_pushes_toast() {
        let mut toasts = ToastState::default();
        toasts.apply(ToastMutation::Push {
            kind: ToastKind::Error,
            text: "Error deleting chat: offline".to_string(),
        });
        let toast = toasts.latest().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.text, "Error deleting chat: offline");
    }

    #[test]
    fn test_push_caps_stack() {
        let mut toasts = ToastState::default();
        for i in 0..6 {
            toasts.push(ToastKind::Success, format!("t{i}"));
        }
        let texts: Vec<_> = toasts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["t2", "t3", "t4", "t5"]);
    }
}
