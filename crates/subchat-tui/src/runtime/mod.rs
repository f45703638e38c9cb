//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers are spawned on tokio and send one `UiEvent` to `inbox_tx`
//! - The runtime drains `inbox_rx` each loop iteration
//! - Events are applied in arrival order
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Network request handlers

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use subchat_core::auth::{AuthClient, SessionStore};
use subchat_core::chats::ChatsClient;
use subchat_core::config::Config;
use subchat_core::graphql::GraphqlClient;
use tokio::sync::mpsc;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick interval while requests are in flight or the user is typing.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle. Toast expiry and refresh checks run at this
/// cadence.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Backend clients the runtime hands to spawned handlers.
pub struct Backend {
    pub graphql: GraphqlClient,
    pub auth: AuthClient,
    pub sessions: SessionStore,
}

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    backend: Backend,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
    /// Last time a terminal event was received (for fast tick during interaction).
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Enters the alternate screen and creates the runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(state: AppState, backend: Backend) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            backend,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let effects = update::init(&mut self.state);
        self.execute_effects(effects);
        let result = self.event_loop();

        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            // Layout updates happen before other events
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }

                // Only Tick triggers render - this caps frame rate at tick cadence
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running() || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());

        // Don't delay already-collected events behind a blocking poll
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let _ = tx.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted { id },
        });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    /// Chat client authorized with the current access token.
    fn chats_client(&self) -> ChatsClient {
        let mut graphql = self.backend.graphql.clone();
        graphql.set_access_token(
            self.state
                .tui
                .auth
                .session
                .as_ref()
                .map(|session| session.access_token.clone()),
        );
        ChatsClient::new(graphql)
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::FetchChats { task } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.chats_client();
                self.spawn_task(TaskKind::ChatList, task, move || {
                    handlers::chat_list(client)
                });
            }
            UiEffect::CreateChat { task, title } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.chats_client();
                self.spawn_task(TaskKind::ChatCreate, task, move || {
                    handlers::chat_create(client, title)
                });
            }
            UiEffect::RenameChat { task, id, title } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.chats_client();
                self.spawn_task(TaskKind::ChatRename, task, move || {
                    handlers::chat_rename(client, id, title)
                });
            }
            UiEffect::DeleteChat { task, id } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.chats_client();
                self.spawn_task(TaskKind::ChatDelete, task, move || {
                    handlers::chat_delete(client, id)
                });
            }
            UiEffect::FetchMessages { task, chat_id } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.chats_client();
                self.spawn_task(TaskKind::Messages, task, move || {
                    handlers::messages_load(client, chat_id)
                });
            }
            UiEffect::SignIn {
                task,
                email,
                password,
            } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.backend.auth.clone();
                self.spawn_task(TaskKind::SignIn, task, move || {
                    handlers::sign_in(client, email, password)
                });
            }
            UiEffect::SignUp {
                task,
                email,
                password,
            } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.backend.auth.clone();
                self.spawn_task(TaskKind::SignUp, task, move || {
                    handlers::sign_up(client, email, password)
                });
            }
            UiEffect::SignOut { task, session } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.backend.auth.clone();
                self.spawn_task(TaskKind::SignOut, task, move || {
                    handlers::sign_out(client, session)
                });
            }
            UiEffect::RefreshSession { task, session } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.backend.auth.clone();
                self.spawn_task(TaskKind::SessionRefresh, task, move || {
                    handlers::session_refresh(client, session)
                });
            }
            UiEffect::PersistSession { session } => {
                let result = match &session {
                    Some(session) => self.backend.sessions.save(session),
                    None => self.backend.sessions.clear().map(|_| ()),
                };
                if let Err(e) = result {
                    tracing::warn!(error = %e, "failed to persist session");
                }
            }
            UiEffect::PersistTheme { theme } => {
                if let Err(e) = Config::save_theme(theme) {
                    tracing::warn!(error = %e, "failed to persist theme");
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
