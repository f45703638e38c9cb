//! Message pane rendering.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use subchat_core::chats::{Message, MessageRole};

use super::state::{MessagesLoad, MessagesState};
use crate::common::Palette;
use crate::common::text::wrap_text;

pub fn render_messages(
    frame: &mut Frame,
    area: Rect,
    messages: &MessagesState,
    title: Option<&str>,
    focused: bool,
    palette: &Palette,
) {
    let border = if focused { palette.accent } else { palette.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", title.unwrap_or("Messages")))
        .title_style(Style::default().fg(border).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        messages.max_scroll.set(0);
        return;
    }

    let placeholder = |text: &str, color| {
        Paragraph::new(Span::styled(text.to_string(), Style::default().fg(color)))
            .wrap(Wrap { trim: true })
    };

    match &messages.load {
        MessagesLoad::Idle => {
            messages.max_scroll.set(0);
            frame.render_widget(
                placeholder("Select a chat or start a new one.", palette.muted),
                inner,
            );
        }
        MessagesLoad::Loading { .. } => {
            messages.max_scroll.set(0);
            frame.render_widget(placeholder("Loading messages...", palette.muted), inner);
        }
        MessagesLoad::Error { error, .. } => {
            messages.max_scroll.set(0);
            frame.render_widget(
                placeholder(&format!("Error loading messages: {error}"), palette.error),
                inner,
            );
        }
        MessagesLoad::Ready { messages: list, .. } if list.is_empty() => {
            messages.max_scroll.set(0);
            frame.render_widget(placeholder("No messages yet.", palette.muted), inner);
        }
        MessagesLoad::Ready { messages: list, .. } => {
            let lines = transcript_lines(list, inner.width as usize, palette);
            let height = inner.height as usize;
            let max_scroll = lines.len().saturating_sub(height);
            messages.max_scroll.set(max_scroll);

            let scroll = messages.scroll.min(max_scroll);
            let start = max_scroll - scroll;
            let visible: Vec<Line<'static>> = lines.into_iter().skip(start).take(height).collect();
            frame.render_widget(Paragraph::new(visible), inner);
        }
    }
}

/// Flattens messages into wrapped display lines: a role header, the body,
/// and a blank separator.
fn transcript_lines(messages: &[Message], width: usize, palette: &Palette) -> Vec<Line<'static>> {
    let body_width = width.saturating_sub(2).max(1);
    let mut lines = Vec::new();
    for (index, message) in messages.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }
        let color = match message.role {
            MessageRole::User => palette.user,
            MessageRole::Assistant => palette.assistant,
            MessageRole::System | MessageRole::Unknown => palette.muted,
        };
        let time = message
            .created_at
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string();
        lines.push(Line::from(vec![
            Span::styled(
                message.role.label(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {time}"), Style::default().fg(palette.muted)),
        ]));
        for line in wrap_text(&message.content, body_width) {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(line, Style::default().fg(palette.fg)),
            ]));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use subchat_core::theme::Theme;
    use uuid::Uuid;

    use super::*;

    fn message(role: MessageRole, content: &str) -> Message {
        Message {
            id: Uuid::from_u128(1),
            content: content.to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_transcript_lines_wrap_and_separate() {
        let palette = Palette::for_theme(Theme::Dark);
        let lines = transcript_lines(
            &[
                message(MessageRole::User, "hello there friend"),
                message(MessageRole::Assistant, "hi"),
            ],
            10,
            &palette,
        );
        // header + 3 wrapped lines, separator, header + 1 line
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0].spans[0].content, "You");
        assert_eq!(lines[5].spans[0].content, "Assistant");
    }
}
