//! Typed chat operations over the GraphQL transport.

use serde::Deserialize;
use serde_json::json;

use super::types::{ChatId, Conversation, Message};
use crate::graphql::{GraphqlClient, GraphqlError, operations};

#[derive(Debug, thiserror::Error)]
pub enum ChatsError {
    #[error(transparent)]
    Graphql(#[from] GraphqlError),

    /// The mutation matched no row (deleted elsewhere or not visible).
    #[error("Chat {0} not found")]
    NotFound(ChatId),
}

impl ChatsError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ChatsError::Graphql(e) if e.is_unauthorized())
    }
}

#[derive(Deserialize)]
struct ChatsData {
    chats: Vec<Conversation>,
}

#[derive(Deserialize)]
struct MessagesData {
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct IdRow {
    id: ChatId,
}

#[derive(Deserialize)]
struct InsertData {
    insert_chats_one: IdRow,
}

#[derive(Deserialize)]
struct UpdateData {
    update_chats_by_pk: Option<Conversation>,
}

#[derive(Deserialize)]
struct DeleteData {
    delete_chats_by_pk: Option<IdRow>,
}

/// Chat and message operations for the signed-in user.
#[derive(Debug, Clone)]
pub struct ChatsClient {
    graphql: GraphqlClient,
}

impl ChatsClient {
    pub fn new(graphql: GraphqlClient) -> Self {
        Self { graphql }
    }

    /// Fetches every chat visible to the session, newest first.
    pub async fn list_chats(&self) -> Result<Vec<Conversation>, ChatsError> {
        let data: ChatsData = self
            .graphql
            .execute(&operations::GET_CHATS, &json!({}))
            .await?;
        tracing::debug!(count = data.chats.len(), "chats loaded");
        Ok(data.chats)
    }

    /// Fetches a chat's messages, oldest first.
    pub async fn list_messages(&self, chat_id: ChatId) -> Result<Vec<Message>, ChatsError> {
        let data: MessagesData = self
            .graphql
            .execute(&operations::GET_MESSAGES, &json!({ "chat_id": chat_id }))
            .await?;
        Ok(data.messages)
    }

    pub async fn create_chat(&self, title: &str) -> Result<ChatId, ChatsError> {
        let data: InsertData = self
            .graphql
            .execute(&operations::CREATE_CHAT, &json!({ "title": title }))
            .await?;
        tracing::info!(chat = %data.insert_chats_one.id, "chat created");
        Ok(data.insert_chats_one.id)
    }

    /// Renames a chat and returns the server's copy of the row.
    pub async fn update_chat_title(
        &self,
        id: ChatId,
        title: &str,
    ) -> Result<Conversation, ChatsError> {
        let data: UpdateData = self
            .graphql
            .execute(
                &operations::UPDATE_CHAT_TITLE,
                &json!({ "id": id, "title": title }),
            )
            .await?;
        data.update_chats_by_pk.ok_or(ChatsError::NotFound(id))
    }

    pub async fn delete_chat(&self, id: ChatId) -> Result<ChatId, ChatsError> {
        let data: DeleteData = self
            .graphql
            .execute(&operations::DELETE_CHAT, &json!({ "id": id }))
            .await?;
        let row = data.delete_chats_by_pk.ok_or(ChatsError::NotFound(id))?;
        tracing::info!(chat = %row.id, "chat deleted");
        Ok(row.id)
    }
}
