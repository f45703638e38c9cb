//! Chat list reducer.
//!
//! The collection changes only here: a full replace after a fetch, `remove`
//! after an acknowledged delete, and `patch` after an acknowledged rename.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use subchat_core::chats::{ChatId, default_chat_title};

use super::state::{ChatsState, ListLoad, RenameEdit, SelectionAction};
use crate::common::TextField;
use crate::effects::UiEffect;
use crate::events::ChatsUiEvent;
use crate::mutations::StateMutation;
use crate::overlays::OverlayRequest;

/// Handles a key while the sidebar has focus and no edit is open.
pub fn handle_sidebar_key(
    chats: &mut ChatsState,
    key: KeyEvent,
) -> (Vec<UiEffect>, SelectionAction, Option<OverlayRequest>) {
    let mut effects = Vec::new();
    let mut selection = SelectionAction::Keep;
    let mut overlay = None;

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => chats.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => chats.move_cursor(1),
        KeyCode::Home | KeyCode::Char('g') => chats.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => chats.move_cursor(isize::MAX),
        KeyCode::Enter => {
            if let Some(chat) = chats.highlighted() {
                selection = SelectionAction::Select(chat.id);
            }
        }
        KeyCode::Char('e') => {
            if let Some(chat) = chats.highlighted().cloned() {
                chats.edit = Some(RenameEdit {
                    id: chat.id,
                    field: TextField::with_value(chat.title),
                });
            }
        }
        KeyCode::Char('d') => {
            if let Some(chat) = chats.highlighted() {
                overlay = Some(OverlayRequest::ConfirmDelete { chat: chat.clone() });
            }
        }
        _ => effects = handle_list_key(chats, key),
    }

    (effects, selection, overlay)
}

/// Keys that act on the list regardless of focus (new chat, re-fetch).
pub fn handle_list_key(chats: &mut ChatsState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![];
    }
    match key.code {
        KeyCode::Char('n') => {
            if chats.creating {
                return vec![];
            }
            chats.creating = true;
            vec![UiEffect::CreateChat {
                task: None,
                title: default_chat_title(Local::now()),
            }]
        }
        KeyCode::Char('r') => {
            if matches!(chats.load, ListLoad::Error(_)) {
                chats.load = ListLoad::Loading;
            }
            vec![UiEffect::FetchChats { task: None }]
        }
        _ => vec![],
    }
}

/// Handles a key while the inline rename is open.
///
/// Enter with a blank title closes the edit without a request. A non-blank
/// title is sent as typed. The cached title is not touched until the server
/// acknowledges.
pub fn handle_edit_key(chats: &mut ChatsState, key: KeyEvent) -> Vec<UiEffect> {
    let Some(edit) = chats.edit.as_mut() else {
        return vec![];
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => chats.edit = None,
        KeyCode::Enter => {
            let id = edit.id;
            let title = edit.field.value().to_string();
            chats.edit = None;
            if !title.trim().is_empty() {
                return vec![UiEffect::RenameChat {
                    task: None,
                    id,
                    title,
                }];
            }
        }
        KeyCode::Backspace => edit.field.backspace(),
        KeyCode::Delete => edit.field.delete(),
        KeyCode::Left => edit.field.move_left(),
        KeyCode::Right => edit.field.move_right(),
        KeyCode::Home => edit.field.move_home(),
        KeyCode::End => edit.field.move_end(),
        KeyCode::Char(c) if !ctrl => edit.field.insert(c),
        _ => {}
    }
    vec![]
}

/// Applies a chat request result.
pub fn handle_chats_event(
    chats: &mut ChatsState,
    selection: Option<ChatId>,
    event: ChatsUiEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>, SelectionAction) {
    match event {
        ChatsUiEvent::ListLoaded { chats: list } => {
            chats.collection.replace(list);
            chats.load = ListLoad::Ready;
            if chats
                .edit
                .as_ref()
                .is_some_and(|edit| chats.collection.get(edit.id).is_none())
            {
                chats.edit = None;
            }

            let mut mutations = Vec::new();
            let mut action = match selection {
                Some(id) if chats.collection.get(id).is_none() => SelectionAction::Clear,
                _ => SelectionAction::Keep,
            };
            if let Some(prefix) = chats.pending_selection.take() {
                match chats.collection.resolve_prefix(&prefix) {
                    Ok(id) => action = SelectionAction::Select(id),
                    Err(e) => mutations.push(StateMutation::error(e)),
                }
            }

            let focus = match action {
                SelectionAction::Select(id) => Some(id),
                SelectionAction::Keep => selection,
                SelectionAction::Clear => None,
            };
            match focus.and_then(|id| chats.collection.position(id)) {
                Some(index) => chats.cursor = index,
                None => chats.clamp_cursor(),
            }
            (vec![], mutations, action)
        }
        ChatsUiEvent::ListFailed { error } => {
            if chats.load == ListLoad::Loading {
                chats.load = ListLoad::Error(error);
                (vec![], vec![], SelectionAction::Keep)
            } else {
                // Background re-fetch: keep the last good list.
                (
                    vec![],
                    vec![StateMutation::error(format!("Error loading chats: {error}"))],
                    SelectionAction::Keep,
                )
            }
        }
        ChatsUiEvent::Created { id } => {
            chats.creating = false;
            (
                vec![UiEffect::FetchChats { task: None }],
                vec![StateMutation::success("New chat created!")],
                SelectionAction::Select(id),
            )
        }
        ChatsUiEvent::CreateFailed { error } => {
            chats.creating = false;
            (
                vec![],
                vec![StateMutation::error(format!("Error creating chat: {error}"))],
                SelectionAction::Keep,
            )
        }
        ChatsUiEvent::Renamed { chat } => {
            let highlighted = chats.highlighted().map(|c| c.id);
            chats.collection.patch(chat);
            if let Some(index) = highlighted.and_then(|id| chats.collection.position(id)) {
                chats.cursor = index;
            }
            (vec![], vec![], SelectionAction::Keep)
        }
        ChatsUiEvent::RenameFailed { error } => (
            vec![],
            vec![StateMutation::error(format!("Error renaming chat: {error}"))],
            SelectionAction::Keep,
        ),
        ChatsUiEvent::Deleted { id } => {
            if let Some(index) = chats.collection.position(id) {
                chats.collection.remove(id);
                if index < chats.cursor {
                    chats.cursor -= 1;
                }
                chats.clamp_cursor();
            }
            if chats.edit.as_ref().is_some_and(|edit| edit.id == id) {
                chats.edit = None;
            }
            let action = if selection == Some(id) {
                SelectionAction::Clear
            } else {
                SelectionAction::Keep
            };
            (vec![], vec![StateMutation::success("Chat deleted!")], action)
        }
        ChatsUiEvent::DeleteFailed { error } => (
            vec![],
            vec![StateMutation::error(format!("Error deleting chat: {error}"))],
            SelectionAction::Keep,
        ),
    }
}
