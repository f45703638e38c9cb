//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! Effects that spawn a task carry `task: Option<TaskId>`. Feature code
//! leaves it `None`; the top-level reducer stamps ids from `TaskSeq` before
//! handing effects to the runtime.

use subchat_core::auth::Session;
use subchat_core::chats::ChatId;
use subchat_core::theme::Theme;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fetch the chat list.
    FetchChats { task: Option<TaskId> },

    CreateChat {
        task: Option<TaskId>,
        title: String,
    },

    RenameChat {
        task: Option<TaskId>,
        id: ChatId,
        title: String,
    },

    DeleteChat {
        task: Option<TaskId>,
        id: ChatId,
    },

    FetchMessages {
        task: Option<TaskId>,
        chat_id: ChatId,
    },

    SignIn {
        task: Option<TaskId>,
        email: String,
        password: String,
    },

    SignUp {
        task: Option<TaskId>,
        email: String,
        password: String,
    },

    /// Best-effort server-side sign-out.
    SignOut {
        task: Option<TaskId>,
        session: Session,
    },

    RefreshSession {
        task: Option<TaskId>,
        session: Session,
    },

    /// Write the session file (`None` removes it).
    PersistSession { session: Option<Session> },

    /// Persist the theme preference to config.
    PersistTheme { theme: Theme },
}

impl UiEffect {
    /// The task id slot of effects that spawn a task.
    pub fn task_slot(&mut self) -> Option<&mut Option<TaskId>> {
        match self {
            UiEffect::FetchChats { task }
            | UiEffect::CreateChat { task, .. }
            | UiEffect::RenameChat { task, .. }
            | UiEffect::DeleteChat { task, .. }
            | UiEffect::FetchMessages { task, .. }
            | UiEffect::SignIn { task, .. }
            | UiEffect::SignUp { task, .. }
            | UiEffect::SignOut { task, .. }
            | UiEffect::RefreshSession { task, .. } => Some(task),
            UiEffect::Quit | UiEffect::PersistSession { .. } | UiEffect::PersistTheme { .. } => {
                None
            }
        }
    }
}
