//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return `UiEvent`. The runtime
//! spawns them with `spawn_task` and sends the result to the inbox. Errors
//! are turned into display strings here; nothing propagates further.

pub mod auth;
pub mod chats;
pub mod messages;

pub use auth::*;
pub use chats::*;
pub use messages::*;
