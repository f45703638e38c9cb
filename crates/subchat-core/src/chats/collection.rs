//! Cached projection of the server's chat list.
//!
//! The server stays the source of truth. The collection only changes through
//! a full `replace` (after a fetch) or one of the two post-ack patches:
//! `remove` after a confirmed delete, `patch` after a confirmed rename.

use std::cmp::Ordering;

use super::types::{ChatId, Conversation};

/// Conversations ordered by `created_at` descending (newest first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatCollection {
    items: Vec<Conversation>,
}

impl ChatCollection {
    pub fn new(items: Vec<Conversation>) -> Self {
        let mut collection = Self::default();
        collection.replace(items);
        collection
    }

    /// Replaces the whole projection with a fresh server result.
    pub fn replace(&mut self, mut items: Vec<Conversation>) {
        items.sort_by(newest_first);
        self.items = items;
    }

    /// Drops a conversation; returns it if it was cached.
    pub fn remove(&mut self, id: ChatId) -> Option<Conversation> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Overwrites the cached row with the same id. Returns false when the
    /// row is not cached (e.g. deleted while the rename was in flight).
    pub fn patch(&mut self, conversation: Conversation) -> bool {
        let Some(index) = self.position(conversation.id) else {
            return false;
        };
        self.items[index] = conversation;
        self.items.sort_by(newest_first);
        true
    }

    pub fn get(&self, id: ChatId) -> Option<&Conversation> {
        self.items.iter().find(|c| c.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&Conversation> {
        self.items.get(index)
    }

    pub fn position(&self, id: ChatId) -> Option<usize> {
        self.items.iter().position(|c| c.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Conversation> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolves a full id or a unique id prefix.
    ///
    /// # Errors
    /// Returns a message when nothing matches or the prefix is ambiguous.
    pub fn resolve_prefix(&self, prefix: &str) -> Result<ChatId, String> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err("Chat id cannot be empty".to_string());
        }
        let mut matches = self
            .items
            .iter()
            .filter(|c| c.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(chat), None) => Ok(chat.id),
            (None, _) => Err(format!("No chat matches '{prefix}'")),
            (Some(_), Some(_)) => Err(format!("Chat id '{prefix}' is ambiguous")),
        }
    }
}

impl<'a> IntoIterator for &'a ChatCollection {
    type Item = &'a Conversation;
    type IntoIter = std::slice::Iter<'a, Conversation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn newest_first(a: &Conversation, b: &Conversation) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}
