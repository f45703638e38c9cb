//! UI event types.
//!
//! All external inputs (terminal, async results) are converted to `UiEvent`
//! before being processed by the reducer.
//!
//! ## Task Lifecycle Events
//!
//! Network work uses a uniform lifecycle:
//! - The runtime emits `UiEvent::TaskStarted` once a task is actually spawned
//! - The runtime emits `UiEvent::TaskCompleted` with the result event when done
//! - The reducer is the only place that mutates `TaskState`

use crossterm::event::Event as CrosstermEvent;
use subchat_core::auth::{Session, SignUpOutcome};
use subchat_core::chats::{ChatId, Conversation, Message};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Results of chat list and chat mutation requests.
#[derive(Debug)]
pub enum ChatsUiEvent {
    ListLoaded { chats: Vec<Conversation> },
    ListFailed { error: String },

    Created { id: ChatId },
    CreateFailed { error: String },

    /// Rename acknowledged; carries the server's copy of the row.
    Renamed { chat: Conversation },
    RenameFailed { error: String },

    Deleted { id: ChatId },
    DeleteFailed { error: String },
}

/// Results of message fetches.
#[derive(Debug)]
pub enum MessagesUiEvent {
    Loaded {
        chat_id: ChatId,
        messages: Vec<Message>,
    },
    Failed {
        chat_id: ChatId,
        error: String,
    },
}

/// Results of auth service requests.
#[derive(Debug)]
pub enum AuthUiEvent {
    SignedIn { session: Session },
    SignInFailed { error: String },

    SignedUp { outcome: SignUpOutcome },
    SignUpFailed { error: String },

    Refreshed { session: Session },
    RefreshFailed { error: String },

    /// Server-side sign-out finished (local state was already reset).
    SignedOut { error: Option<String> },
}

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (toast expiry, session refresh checks).
    Tick,

    /// Emitted once per loop iteration before other events, with the
    /// current terminal size.
    Frame { width: u16, height: u16 },

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// Task lifecycle: runtime started a task.
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// Task lifecycle: runtime completed a task (wraps the result event).
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    Chats(ChatsUiEvent),
    Messages(MessagesUiEvent),
    Auth(AuthUiEvent),
}
