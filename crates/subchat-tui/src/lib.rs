//! Full-screen TUI for subchat: sign-in screen and chat dashboard.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use features::{auth, chats, messages, toast};
pub use runtime::{Backend, TuiRuntime};
use subchat_core::auth::{AuthClient, Session, SessionStore};
use subchat_core::config::Config;
use subchat_core::graphql::GraphqlClient;
use subchat_core::theme::Theme;

use crate::state::AppState;

/// Runs the interactive dashboard.
///
/// `session` is the restored session (if any); without one the sign-in
/// screen is shown first. `initial_chat` is an id or id prefix to open once
/// the chat list has loaded.
///
/// # Errors
/// - stderr is not a terminal
/// - The backend URLs in the config are invalid
/// - Terminal setup or I/O fails
pub async fn run_interactive(
    config: &Config,
    session: Option<Session>,
    initial_chat: Option<String>,
) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `subchat chats list` for non-interactive access."
        );
    }

    let graphql_url = config.backend.graphql_url()?;
    let auth_url = config.backend.auth_url()?;

    // Print pre-TUI info to stderr (will be replaced by alternate screen)
    let mut err = stderr();
    writeln!(err, "subchat")?;
    writeln!(err, "Backend: {graphql_url}")?;
    if let Some(session) = &session {
        writeln!(err, "Signed in as {}", session.user.label())?;
    }
    err.flush()?;

    let backend = Backend {
        graphql: GraphqlClient::new(graphql_url),
        auth: AuthClient::new(auth_url),
        sessions: SessionStore::default(),
    };
    let state = AppState::new(Theme::initial(config.theme), session, initial_chat);

    let mut runtime = TuiRuntime::new(state, backend)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
