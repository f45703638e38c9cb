//! Chat list feature slice: the cached conversation list shown in the
//! sidebar, with create, inline rename, and delete.

mod render;
mod state;
mod update;

pub use render::render_sidebar;
pub use state::{ChatsState, ListLoad, RenameEdit, SelectionAction};
pub use update::{handle_chats_event, handle_edit_key, handle_list_key, handle_sidebar_key};
