//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── auth: AuthState          (session, sign-in form)
//! │   ├── chats: ChatsState        (list load state, collection, edit)
//! │   ├── selection: Option<ChatId>
//! │   ├── messages: MessagesState  (transcript of the selection)
//! │   ├── toasts: ToastState
//! │   ├── task_seq: TaskSeq (async task id generator)
//! │   └── tasks: Tasks (task lifecycle state)
//! └── overlay: Option<Overlay>     (modal overlays)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can take `&mut self` while the reducer holds `&mut TuiState`.

use subchat_core::auth::Session;
use subchat_core::chats::ChatId;
use subchat_core::theme::Theme;

use crate::auth::AuthState;
use crate::chats::ChatsState;
use crate::common::{Palette, TaskSeq, Tasks};
use crate::messages::MessagesState;
use crate::overlays::Overlay;
use crate::toast::ToastState;

// ============================================================================
// AppState (Combined State)
// ============================================================================

pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// Creates the initial state. `initial_chat` is an id or id prefix to
    /// select once the first chat list arrives.
    pub fn new(theme: Theme, session: Option<Session>, initial_chat: Option<String>) -> Self {
        Self {
            tui: TuiState::new(theme, session, initial_chat),
            overlay: None,
        }
    }
}

// ============================================================================
// TuiState
// ============================================================================

/// Which dashboard pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Sidebar,
    Messages,
}

pub struct TuiState {
    pub should_quit: bool,
    pub theme: Theme,
    pub auth: AuthState,
    pub chats: ChatsState,
    /// The conversation whose messages are shown.
    pub selection: Option<ChatId>,
    pub messages: MessagesState,
    pub sidebar_open: bool,
    pub focus: Focus,
    pub toasts: ToastState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Terminal size from the last `Frame` event.
    pub viewport: (u16, u16),
}

impl TuiState {
    fn new(theme: Theme, session: Option<Session>, initial_chat: Option<String>) -> Self {
        Self {
            should_quit: false,
            theme,
            auth: AuthState::new(session),
            chats: ChatsState::with_pending_selection(initial_chat),
            selection: None,
            messages: MessagesState::default(),
            sidebar_open: true,
            focus: Focus::Sidebar,
            toasts: ToastState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            viewport: (0, 0),
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    /// Title of the selected conversation, if it is cached.
    pub fn selected_title(&self) -> Option<&str> {
        let id = self.selection?;
        self.chats.collection.get(id).map(|chat| chat.title.as_str())
    }
}
