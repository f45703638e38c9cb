use subchat_core::chats::{ChatCollection, ChatId, Conversation};

use crate::common::TextField;
use crate::mutations::ChatsMutation;

/// Retrieval state of the chat list.
///
/// `Error` has no way out except a full re-fetch. Background re-fetches
/// (after a create) never leave `Ready`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListLoad {
    #[default]
    Loading,
    Error(String),
    Ready,
}

/// Change to the dashboard's selected chat requested by the chat list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    Keep,
    Select(ChatId),
    Clear,
}

/// Inline title edit for one row.
#[derive(Debug, Clone)]
pub struct RenameEdit {
    pub id: ChatId,
    pub field: TextField,
}

#[derive(Debug, Default)]
pub struct ChatsState {
    pub load: ListLoad,
    pub collection: ChatCollection,
    /// Highlighted row in the sidebar.
    pub cursor: usize,
    pub edit: Option<RenameEdit>,
    /// A create request is in flight; further creates are ignored.
    pub creating: bool,
    /// Id or id prefix to select once the first list arrives.
    pub pending_selection: Option<String>,
}

impl ChatsState {
    pub fn with_pending_selection(pending_selection: Option<String>) -> Self {
        Self {
            pending_selection,
            ..Self::default()
        }
    }

    /// The conversation under the cursor.
    pub fn highlighted(&self) -> Option<&Conversation> {
        self.collection.get_index(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.collection.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.collection.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.collection.len().saturating_sub(1));
    }

    pub fn apply(&mut self, mutation: ChatsMutation) {
        match mutation {
            ChatsMutation::StartInitialLoad => {
                self.load = ListLoad::Loading;
                self.collection = ChatCollection::default();
                self.cursor = 0;
                self.edit = None;
            }
            ChatsMutation::Reset => *self = Self::default(),
        }
    }
}
