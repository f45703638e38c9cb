use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned conversation id. Opaque and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub Uuid);

impl ChatId {
    /// First 8 hex characters, for compact display.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ChatId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(ChatId)
    }
}

/// Conversation summary as listed in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ChatId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
    #[serde(other)]
    Unknown,
}

impl MessageRole {
    pub fn label(self) -> &'static str {
        match self {
            MessageRole::User => "You",
            MessageRole::Assistant => "Assistant",
            MessageRole::System => "System",
            MessageRole::Unknown => "?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub role: MessageRole,
    pub created_at: DateTime<Utc>,
}

/// Title used when a chat is created without one: `Chat - 3:04:05 PM`.
pub fn default_chat_title(now: DateTime<Local>) -> String {
    format!("Chat - {}", now.format("%-I:%M:%S %p"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_default_chat_title_uses_12h_clock() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 15, 4, 5).unwrap();
        assert_eq!(default_chat_title(now), "Chat - 3:04:05 PM");

        let morning = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(default_chat_title(morning), "Chat - 9:30:00 AM");
    }

    #[test]
    fn test_chat_id_parse_and_short() {
        let id: ChatId = "6f1c2a4e-0b7d-4c3e-9a11-2b3c4d5e6f70".parse().unwrap();
        assert_eq!(id.short(), "6f1c2a4e");
        assert_eq!(id.to_string(), "6f1c2a4e-0b7d-4c3e-9a11-2b3c4d5e6f70");
        assert!("not-a-uuid".parse::<ChatId>().is_err());
    }

    #[test]
    fn test_message_role_unknown_values() {
        let role: MessageRole = serde_json::from_str("\"tool\"").unwrap();
        assert_eq!(role, MessageRole::Unknown);
        let role: MessageRole = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(role, MessageRole::Assistant);
    }

    #[test]
    fn test_conversation_decodes_hasura_timestamp() {
        let chat: Conversation = serde_json::from_value(serde_json::json!({
            "id": "6f1c2a4e-0b7d-4c3e-9a11-2b3c4d5e6f70",
            "title": "Trip ideas",
            "created_at": "2024-05-01T10:00:00.123456+00:00"
        }))
        .unwrap();
        assert_eq!(chat.title, "Trip ideas");
    }
}
