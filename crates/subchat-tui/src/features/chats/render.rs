//! Sidebar rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use subchat_core::chats::ChatId;

use super::state::{ChatsState, ListLoad};
use crate::common::{Palette, truncate_with_ellipsis};
use crate::overlays::render_utils::{InputLine, input_line};

pub fn render_sidebar(
    frame: &mut Frame,
    area: Rect,
    chats: &ChatsState,
    selection: Option<ChatId>,
    focused: bool,
    palette: &Palette,
) {
    let border = if focused { palette.accent } else { palette.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Chats ")
        .title_style(Style::default().fg(border).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let new_chat = if chats.creating {
        Line::from(Span::styled(
            " Creating chat...",
            Style::default().fg(palette.muted),
        ))
    } else {
        Line::from(vec![
            Span::styled(" + New Chat ", Style::default().fg(palette.accent)),
            Span::styled("(n)", Style::default().fg(palette.muted)),
        ])
    };
    frame.render_widget(Paragraph::new(new_chat), Rect::new(inner.x, inner.y, inner.width, 1));

    let list_area = Rect::new(
        inner.x,
        inner.y + 2.min(inner.height),
        inner.width,
        inner.height.saturating_sub(2),
    );
    if list_area.height == 0 {
        return;
    }

    match &chats.load {
        ListLoad::Loading => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    " Loading chats...",
                    Style::default().fg(palette.muted),
                )),
                list_area,
            );
        }
        ListLoad::Error(error) => {
            let text = vec![
                Line::from(Span::styled(
                    "Error loading chats",
                    Style::default()
                        .fg(palette.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(error.as_str(), Style::default().fg(palette.muted))),
                Line::from(""),
                Line::from(Span::styled(
                    "Press r to retry",
                    Style::default().fg(palette.accent),
                )),
            ];
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), list_area);
        }
        ListLoad::Ready if chats.collection.is_empty() => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No chats found. Start a new chat!",
                    Style::default().fg(palette.muted),
                ))
                .wrap(Wrap { trim: true }),
                list_area,
            );
        }
        ListLoad::Ready => {
            let lines = chat_lines(chats, selection, focused, list_area, palette);
            frame.render_widget(Paragraph::new(lines), list_area);
        }
    }
}

fn chat_lines(
    chats: &ChatsState,
    selection: Option<ChatId>,
    focused: bool,
    area: Rect,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let height = area.height as usize;
    let offset = (chats.cursor + 1).saturating_sub(height);
    let title_width = area.width.saturating_sub(3) as usize;

    chats
        .collection
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(index, chat)| {
            let is_cursor = index == chats.cursor;
            let is_selected = selection == Some(chat.id);

            if let Some(edit) = chats.edit.as_ref().filter(|edit| edit.id == chat.id) {
                return input_line(
                    area.width,
                    &InputLine {
                        value: edit.field.value(),
                        cursor: Some(edit.field.cursor()),
                        placeholder: Some("Chat title"),
                        prompt: "> ",
                        prompt_color: palette.accent,
                        text_color: palette.fg,
                        placeholder_color: palette.muted,
                        cursor_color: palette.accent,
                    },
                );
            }

            let marker = if is_selected { "● " } else { "  " };
            let mut style = Style::default().fg(palette.fg);
            if is_selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            if is_cursor && focused {
                style = style.fg(palette.highlight_fg).bg(palette.highlight_bg);
            } else if is_cursor {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            Line::from(vec![
                Span::styled(marker, Style::default().fg(palette.accent)),
                Span::styled(truncate_with_ellipsis(&chat.title, title_width), style),
            ])
        })
        .collect()
}
