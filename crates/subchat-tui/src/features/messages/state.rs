use std::cell::Cell;

use subchat_core::chats::{ChatId, Message};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MessagesLoad {
    /// No chat selected.
    #[default]
    Idle,
    Loading {
        chat_id: ChatId,
    },
    Error {
        chat_id: ChatId,
        error: String,
    },
    Ready {
        chat_id: ChatId,
        messages: Vec<Message>,
    },
}

#[derive(Debug, Default)]
pub struct MessagesState {
    pub load: MessagesLoad,
    /// Lines scrolled up from the bottom (0 = latest message visible).
    pub scroll: usize,
    /// Largest useful `scroll`, recorded during render.
    pub max_scroll: Cell<usize>,
}

impl MessagesState {
    pub fn chat_id(&self) -> Option<ChatId> {
        match &self.load {
            MessagesLoad::Idle => None,
            MessagesLoad::Loading { chat_id }
            | MessagesLoad::Error { chat_id, .. }
            | MessagesLoad::Ready { chat_id, .. } => Some(*chat_id),
        }
    }

    pub fn start_loading(&mut self, chat_id: ChatId) {
        self.load = MessagesLoad::Loading { chat_id };
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.load = MessagesLoad::Idle;
        self.scroll = 0;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self
            .scroll
            .saturating_add(lines)
            .min(self.max_scroll.get());
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }
}
