//! Message view feature slice: transcript of the selected chat.

mod render;
mod state;
mod update;

pub use render::render_messages;
pub use state::{MessagesLoad, MessagesState};
pub use update::{handle_messages_event, handle_scroll_key};
