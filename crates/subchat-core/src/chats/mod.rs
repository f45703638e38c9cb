//! Chats: wire types, the typed GraphQL client, and the cached collection.

pub mod client;
pub mod collection;
pub mod types;

pub use client::{ChatsClient, ChatsError};
pub use collection::ChatCollection;
pub use types::{ChatId, Conversation, Message, MessageRole, default_chat_title};
