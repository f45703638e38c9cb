use subchat_core::chats::{ChatId, ChatsClient};

use crate::events::{ChatsUiEvent, UiEvent};

/// Fetches the chat list.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn chat_list(client: ChatsClient) -> UiEvent {
    UiEvent::Chats(match client.list_chats().await {
        Ok(chats) => ChatsUiEvent::ListLoaded { chats },
        Err(e) => {
            tracing::warn!(error = %e, "failed to load chats");
            ChatsUiEvent::ListFailed {
                error: e.to_string(),
            }
        }
    })
}

/// Creates a chat with the given title.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn chat_create(client: ChatsClient, title: String) -> UiEvent {
    UiEvent::Chats(match client.create_chat(&title).await {
        Ok(id) => ChatsUiEvent::Created { id },
        Err(e) => {
            tracing::warn!(error = %e, "failed to create chat");
            ChatsUiEvent::CreateFailed {
                error: e.to_string(),
            }
        }
    })
}

pub async fn chat_rename(client: ChatsClient, id: ChatId, title: String) -> UiEvent {
    UiEvent::Chats(match client.update_chat_title(id, &title).await {
        Ok(chat) => ChatsUiEvent::Renamed { chat },
        Err(e) => {
            tracing::warn!(chat = %id, error = %e, "failed to rename chat");
            ChatsUiEvent::RenameFailed {
                error: e.to_string(),
            }
        }
    })
}

pub async fn chat_delete(client: ChatsClient, id: ChatId) -> UiEvent {
    UiEvent::Chats(match client.delete_chat(id).await {
        Ok(id) => ChatsUiEvent::Deleted { id },
        Err(e) => {
            tracing::warn!(chat = %id, error = %e, "failed to delete chat");
            ChatsUiEvent::DeleteFailed {
                error: e.to_string(),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use subchat_core::graphql::GraphqlClient;
    use url::Url;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_becomes_create_failed() {
        // Nothing listens on the discard port.
        let url = Url::parse("http://127.0.0.1:9/v1/graphql").unwrap();
        let client = ChatsClient::new(GraphqlClient::new(url));

        let event = chat_create(client, "Chat".to_string()).await;
        assert!(matches!(
            event,
            UiEvent::Chats(ChatsUiEvent::CreateFailed { ref error }) if !error.is_empty()
        ));
    }

    #[tokio::test]
    async fn test_delete_of_missing_row_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "delete_chats_by_pk": null }
            })))
            .mount(&server)
            .await;

        let client = ChatsClient::new(GraphqlClient::new(Url::parse(&server.uri()).unwrap()));
        let id: ChatId = "11111111-1111-4111-8111-111111111111".parse().unwrap();
        let event = chat_delete(client, id).await;
        assert!(matches!(
            event,
            UiEvent::Chats(ChatsUiEvent::DeleteFailed { ref error }) if error.contains("not found")
        ));
    }
}
