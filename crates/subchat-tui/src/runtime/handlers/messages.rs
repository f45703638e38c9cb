use subchat_core::chats::{ChatId, ChatsClient};

use crate::events::{MessagesUiEvent, UiEvent};

/// Fetches the messages of one chat.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn messages_load(client: ChatsClient, chat_id: ChatId) -> UiEvent {
    UiEvent::Messages(match client.list_messages(chat_id).await {
        Ok(messages) => MessagesUiEvent::Loaded { chat_id, messages },
        Err(e) => {
            tracing::warn!(chat = %chat_id, error = %e, "failed to load messages");
            MessagesUiEvent::Failed {
                chat_id,
                error: e.to_string(),
            }
        }
    })
}
