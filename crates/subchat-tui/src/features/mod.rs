//! Feature slices. Each owns its state, reducer, and render code.

pub mod auth;
pub mod chats;
pub mod messages;
pub mod toast;
