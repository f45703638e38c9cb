//! Delete confirmation modal.
//!
//! Opening the modal marks the delete candidate; only a confirm sends the
//! request. Cancel closes the modal with no effect.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use subchat_core::chats::{ChatId, Conversation};

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use crate::common::{Palette, truncate_with_ellipsis};
use crate::effects::UiEffect;

#[derive(Debug, Clone)]
pub struct ConfirmDeleteState {
    pub id: ChatId,
    pub title: String,
}

impl ConfirmDeleteState {
    pub fn open(chat: &Conversation) -> (Self, Vec<UiEffect>) {
        (
            Self {
                id: chat.id,
                title: chat.title.clone(),
            },
            vec![],
        )
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                OverlayUpdate::close().with_ui_effects(vec![UiEffect::DeleteChat {
                    task: None,
                    id: self.id,
                }])
            }
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let hints = [
            InputHint::new("y", "delete"),
            InputHint::new("n", "cancel"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Delete Chat",
                border_color: palette.error,
                width: 52,
                height: 8,
                hints: &hints,
            },
        );

        let title_width = layout.body.width.saturating_sub(4) as usize;
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Are you sure you want to delete this chat?",
                Style::default().fg(palette.fg),
            )),
            Line::from(Span::styled(
                format!("\"{}\"", truncate_with_ellipsis(&self.title, title_width)),
                Style::default()
                    .fg(palette.warning)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "This cannot be undone.",
                Style::default().fg(palette.muted),
            )),
        ];
        let body = Rect::new(
            layout.body.x + 1,
            layout.body.y,
            layout.body.width.saturating_sub(2),
            layout.body.height,
        );
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), body);
    }
}
