//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use std::time::Instant;

use chrono::Utc;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::chats::SelectionAction;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::mutations::{AuthMutation, ChatsMutation, StateMutation};
use crate::overlays::{self, Overlay, OverlayExt};
use crate::state::{AppState, Focus, TuiState};
use crate::{auth, chats, messages};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute. Effects that spawn a task leave here with a
/// task id assigned.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let mut effects = reduce(app, event);
    for effect in &mut effects {
        if let Some(slot) = effect.task_slot()
            && slot.is_none()
        {
            *slot = Some(app.tui.task_seq.next_id());
        }
    }
    effects
}

/// Effects to run once at startup.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    if !app.tui.auth.is_authenticated() {
        return vec![];
    }
    app.tui.chats.apply(ChatsMutation::StartInitialLoad);
    vec![UiEffect::FetchChats {
        task: Some(app.tui.task_seq.next_id()),
    }]
}

fn reduce(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.toasts.expire(Instant::now());
            auth::refresh_due(&mut app.tui.auth, Utc::now())
                .into_iter()
                .collect()
        }
        UiEvent::Frame { width, height } => {
            app.tui.viewport = (width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if !ok {
                tracing::debug!(?kind, id = completed.id.0, "dropping stale completion");
                vec![]
            } else {
                reduce(app, *completed.result)
            }
        }
        UiEvent::Chats(event) => {
            // Results from a session that has since signed out.
            if !app.tui.auth.is_authenticated() {
                return vec![];
            }
            let (mut effects, mutations, action) =
                chats::handle_chats_event(&mut app.tui.chats, app.tui.selection, event);
            apply_mutations(&mut app.tui, mutations);
            effects.extend(set_selection(&mut app.tui, action));

            if let Some(id) = app.overlay.delete_candidate()
                && app.tui.chats.collection.get(id).is_none()
            {
                app.overlay = None;
            }
            effects
        }
        UiEvent::Messages(event) => {
            if app.tui.auth.is_authenticated() {
                messages::handle_messages_event(&mut app.tui.messages, app.tui.selection, event);
            }
            vec![]
        }
        UiEvent::Auth(event) => {
            let (mut effects, mutations, action) =
                auth::handle_auth_event(&mut app.tui.auth, event);
            apply_mutations(&mut app.tui, mutations);
            if let auth::SessionAction::Expired { error } = action {
                tracing::warn!(%error, "session refresh failed, signing out");
                let notice = format!("Session expired: {error}. Please sign in again.");
                effects.extend(sign_out(app, Some(notice)));
            }
            effects
        }
    }
}

// ============================================================================
// StateMutation Dispatcher
// ============================================================================

fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) {
    for mutation in mutations {
        match mutation {
            StateMutation::Toast(mutation) => tui.toasts.apply(mutation),
            StateMutation::Chats(mutation) => tui.chats.apply(mutation),
            StateMutation::Auth(mutation) => tui.auth.apply(mutation),
        }
    }
}

fn apply_overlay_update(app: &mut AppState, update: overlays::OverlayUpdate) -> Vec<UiEffect> {
    match update.transition {
        overlays::OverlayTransition::Stay => {}
        overlays::OverlayTransition::Close => app.overlay = None,
    }
    update.effects
}

fn open_overlay_request(app: &mut AppState, request: overlays::OverlayRequest) -> Vec<UiEffect> {
    match request {
        overlays::OverlayRequest::ConfirmDelete { chat } => {
            let (state, effects) = overlays::ConfirmDeleteState::open(&chat);
            app.overlay = Some(Overlay::ConfirmDelete(state));
            effects
        }
    }
}

// ============================================================================
// Selection / Session
// ============================================================================

/// Applies a selection change from the chat list and starts the message
/// fetch for a newly selected chat.
fn set_selection(tui: &mut TuiState, action: SelectionAction) -> Vec<UiEffect> {
    match action {
        SelectionAction::Keep => vec![],
        SelectionAction::Select(chat_id) => {
            tui.selection = Some(chat_id);
            tui.messages.start_loading(chat_id);
            vec![UiEffect::FetchMessages {
                task: None,
                chat_id,
            }]
        }
        SelectionAction::Clear => {
            tui.selection = None;
            tui.messages.clear();
            vec![]
        }
    }
}

/// Local sign-out: always clears the session, the collection, and the
/// selection. The server-side revoke is best effort.
fn sign_out(app: &mut AppState, notice: Option<String>) -> Vec<UiEffect> {
    let Some(session) = app.tui.auth.session.clone() else {
        return vec![];
    };

    app.overlay = None;
    app.tui.tasks.clear_all();
    app.tui.selection = None;
    app.tui.messages.clear();
    app.tui.focus = Focus::Sidebar;

    let mut mutations = vec![
        StateMutation::Auth(AuthMutation::SignOut),
        StateMutation::Chats(ChatsMutation::Reset),
    ];
    if let Some(notice) = notice {
        mutations.push(StateMutation::Auth(AuthMutation::SetNotice(notice)));
    }
    apply_mutations(&mut app.tui, mutations);

    vec![
        UiEffect::PersistSession { session: None },
        UiEffect::SignOut {
            task: None,
            session,
        },
    ]
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    if app.overlay.is_some() {
        return;
    }
    let field = if !app.tui.auth.is_authenticated() {
        app.tui.auth.form.focused_mut()
    } else if let Some(edit) = app.tui.chats.edit.as_mut() {
        &mut edit.field
    } else {
        return;
    };
    for c in text.chars().filter(|c| !c.is_control()) {
        field.insert(c);
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Try to dispatch to the active overlay
    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(key);
        return apply_overlay_update(app, update);
    }

    if !app.tui.auth.is_authenticated() {
        return auth::handle_form_key(&mut app.tui.auth.form, key);
    }

    if app.tui.chats.edit.is_some() {
        return chats::handle_edit_key(&mut app.tui.chats, key);
    }

    if let Some(effects) = handle_global_key(app, key) {
        return effects;
    }

    match app.tui.focus {
        Focus::Sidebar => {
            let (mut effects, action, request) =
                chats::handle_sidebar_key(&mut app.tui.chats, key);
            effects.extend(set_selection(&mut app.tui, action));
            if let Some(request) = request {
                effects.extend(open_overlay_request(app, request));
            }
            effects
        }
        Focus::Messages => {
            if key.code == KeyCode::Esc && app.tui.sidebar_open {
                app.tui.focus = Focus::Sidebar;
                return vec![];
            }
            let page = usize::from(app.tui.viewport.1 / 2);
            messages::handle_scroll_key(&mut app.tui.messages, key, page);
            vec![]
        }
    }
}

/// Dashboard keys that work in either pane. Returns `None` when the key is
/// not a global key.
fn handle_global_key(app: &mut AppState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let effects = match key.code {
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        _ if ctrl => return None,
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Char('t') => {
            app.tui.theme = app.tui.theme.toggled();
            vec![UiEffect::PersistTheme {
                theme: app.tui.theme,
            }]
        }
        KeyCode::Char('b') => {
            app.tui.sidebar_open = !app.tui.sidebar_open;
            app.tui.focus = if app.tui.sidebar_open {
                Focus::Sidebar
            } else {
                Focus::Messages
            };
            vec![]
        }
        KeyCode::Tab | KeyCode::BackTab => {
            if app.tui.sidebar_open {
                app.tui.focus = match app.tui.focus {
                    Focus::Sidebar => Focus::Messages,
                    Focus::Messages => Focus::Sidebar,
                };
            }
            vec![]
        }
        KeyCode::Char('L') => sign_out(app, None),
        KeyCode::Char('n' | 'r') => chats::handle_list_key(&mut app.tui.chats, key),
        _ => return None,
    };
    Some(effects)
}
