//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! Frame, and never return effects. The message pane records its scroll
//! bound through a `Cell` so the reducer can clamp scrolling.

use chrono::{Datelike, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::auth;
use crate::chats::render_sidebar;
use crate::common::{Palette, TaskKind, truncate_with_ellipsis};
use crate::messages::render_messages;
use crate::overlays::OverlayExt;
use crate::overlays::render_utils::{InputHint, hint_line};
use crate::state::{AppState, Focus, TuiState};
use crate::toast::render_toasts;

const HEADER_HEIGHT: u16 = 2;
const FOOTER_HEIGHT: u16 = 1;
const SIDEBAR_WIDTH: u16 = 32;

/// Below this width the sidebar takes the whole body.
const MIN_SPLIT_WIDTH: u16 = 60;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;
    let palette = state.palette();

    if !state.auth.is_authenticated() {
        auth::render_auth_screen(frame, area, &state.auth, &palette);
        render_toasts(frame, area, &state.toasts, &palette);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    render_header(frame, rows[0], state, &palette);
    render_body(frame, rows[1], state, &palette);
    render_footer(frame, rows[2], state, &palette);

    render_toasts(frame, area, &state.toasts, &palette);
    app.overlay.render(frame, area, &palette);
}

fn render_header(frame: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let user = state
        .auth
        .session
        .as_ref()
        .map(|session| session.user.label().to_string())
        .unwrap_or_default();
    let right = format!(
        "{user}  ·  {} theme (t)",
        state.theme.toggle_label()
    );
    let right_width = right.chars().count() as u16;

    let title = Line::from(vec![
        Span::styled(
            " Subspace AI Chatbot",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Your smart assistant, always ready to help.",
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);

    if area.width > right_width + 2 {
        let rect = Rect::new(
            area.x + area.width - right_width - 1,
            area.y,
            right_width,
            1,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(right, Style::default().fg(palette.muted))),
            rect,
        );
    }
}

fn render_body(frame: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let title = state.selected_title();
    let messages_focused = state.focus == Focus::Messages || !state.sidebar_open;

    if !state.sidebar_open {
        render_messages(frame, area, &state.messages, title, true, palette);
        return;
    }
    if area.width < MIN_SPLIT_WIDTH {
        if messages_focused {
            render_messages(frame, area, &state.messages, title, true, palette);
        } else {
            render_sidebar(frame, area, &state.chats, state.selection, true, palette);
        }
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
        .split(area);
    render_sidebar(
        frame,
        columns[0],
        &state.chats,
        state.selection,
        !messages_focused,
        palette,
    );
    render_messages(
        frame,
        columns[1],
        &state.messages,
        title,
        messages_focused,
        palette,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let hints = if state.chats.edit.is_some() {
        vec![
            InputHint::new("Enter", "save"),
            InputHint::new("Esc", "cancel"),
        ]
    } else if state.focus == Focus::Messages {
        vec![
            InputHint::new("↑↓", "scroll"),
            InputHint::new("Tab", "chats"),
            InputHint::new("n", "new"),
            InputHint::new("L", "sign out"),
            InputHint::new("q", "quit"),
        ]
    } else {
        vec![
            InputHint::new("↑↓", "move"),
            InputHint::new("Enter", "open"),
            InputHint::new("n", "new"),
            InputHint::new("e", "rename"),
            InputHint::new("d", "delete"),
            InputHint::new("b", "sidebar"),
            InputHint::new("L", "sign out"),
            InputHint::new("q", "quit"),
        ]
    };

    let copyright = format!("© {} Subspace Pro ", Local::now().year());
    let copyright_width = copyright.chars().count() as u16;
    let busy = state.tasks.is_any_running()
        && !state.tasks.state(TaskKind::SessionRefresh).is_running();
    let status = if busy { "  ⋯" } else { "" };

    let hints_width = area.width.saturating_sub(copyright_width + 1);
    let mut line = hint_line(&hints, palette.accent);
    line.spans.push(Span::styled(status, Style::default().fg(palette.muted)));
    frame.render_widget(
        Paragraph::new(line),
        Rect::new(area.x, area.y, hints_width, area.height),
    );
    if area.width > copyright_width {
        frame.render_widget(
            Paragraph::new(Span::styled(
                truncate_with_ellipsis(&copyright, copyright_width as usize),
                Style::default().fg(palette.muted),
            ))
            .alignment(Alignment::Right),
            Rect::new(
                area.x + area.width - copyright_width,
                area.y,
                copyright_width,
                area.height,
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use subchat_core::auth::{Session, SessionUser};
    use subchat_core::theme::Theme;

    use super::*;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_signed_out_renders_auth_screen() {
        let app = AppState::new(Theme::Dark, None, None);
        let text = draw(&app);
        assert!(text.contains("Sign In"));
        assert!(!text.contains("Subspace Pro"));
    }

    #[test]
    fn test_dashboard_shell() {
        let session = Session {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            user: SessionUser {
                id: "u".to_string(),
                email: None,
                display_name: "ada".to_string(),
            },
        };
        let app = AppState::new(Theme::Dark, Some(session), None);
        let text = draw(&app);
        assert!(text.contains("Subspace AI Chatbot"));
        assert!(text.contains("Subspace Pro"));
        assert!(text.contains("Loading chats..."));
        assert!(text.contains("Select a chat or start a new one."));
    }
}
