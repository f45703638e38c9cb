use crossterm::event::{KeyCode, KeyEvent};
use subchat_core::chats::ChatId;

use super::state::{MessagesLoad, MessagesState};
use crate::events::MessagesUiEvent;

/// Applies a message fetch result. Results for a chat that is no longer
/// selected are dropped.
pub fn handle_messages_event(
    messages: &mut MessagesState,
    selection: Option<ChatId>,
    event: MessagesUiEvent,
) {
    match event {
        MessagesUiEvent::Loaded {
            chat_id,
            messages: list,
        } if selection == Some(chat_id) => {
            messages.load = MessagesLoad::Ready {
                chat_id,
                messages: list,
            };
            messages.scroll = 0;
        }
        MessagesUiEvent::Failed { chat_id, error } if selection == Some(chat_id) => {
            messages.load = MessagesLoad::Error { chat_id, error };
        }
        MessagesUiEvent::Loaded { chat_id, .. } | MessagesUiEvent::Failed { chat_id, .. } => {
            tracing::debug!(chat = %chat_id, "dropping messages for unselected chat");
        }
    }
}

/// Scroll keys for the message pane. Returns false when the key is not a
/// scroll key.
pub fn handle_scroll_key(messages: &mut MessagesState, key: KeyEvent, page: usize) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => messages.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => messages.scroll_down(1),
        KeyCode::PageUp => messages.scroll_up(page.max(1)),
        KeyCode::PageDown => messages.scroll_down(page.max(1)),
        KeyCode::Home | KeyCode::Char('g') => messages.scroll_up(usize::MAX),
        KeyCode::End | KeyCode::Char('G') => messages.scroll = 0,
        _ => return false,
    }
    true
}
