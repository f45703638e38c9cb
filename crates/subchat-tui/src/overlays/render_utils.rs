//! Shared rendering helpers for overlays and inline inputs.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::common::truncate_start_with_ellipsis;

/// Calculates the area for an overlay, centered horizontally and vertically
/// within the available height.
pub fn calculate_overlay_area(area: Rect, available_height: u16, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(available_height.saturating_sub(2));

    let overlay_x = area.x + (area.width.saturating_sub(width)) / 2;
    let overlay_y = area.y + (available_height.saturating_sub(height)) / 2;
    Rect::new(overlay_x, overlay_y, width, height)
}

/// Renders the base container for an overlay (clears background, draws border and title).
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

/// Layout rectangles for an overlay.
pub struct OverlayLayout {
    pub popup: Rect,
    pub body: Rect,
}

/// Render a standard overlay container and return its layout.
pub fn render_overlay(frame: &mut Frame, area: Rect, config: &OverlayConfig<'_>) -> OverlayLayout {
    let popup = calculate_overlay_area(area, area.height, config.width, config.height);
    render_overlay_container(frame, popup, config.title, config.border_color);

    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );

    if !config.hints.is_empty() {
        render_hints(frame, inner, config.hints, config.border_color);
    }

    let footer_height = u16::from(!config.hints.is_empty());
    let body = Rect::new(
        inner.x,
        inner.y,
        inner.width,
        inner.height.saturating_sub(footer_height),
    );

    OverlayLayout { popup, body }
}

pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// A prompt-style input line: "> <text>█".
pub struct InputLine<'a> {
    pub value: &'a str,
    /// Byte offset of the cursor; `None` hides it.
    pub cursor: Option<usize>,
    pub placeholder: Option<&'a str>,
    pub prompt: &'a str,
    pub prompt_color: Color,
    pub text_color: Color,
    pub placeholder_color: Color,
    pub cursor_color: Color,
}

/// Builds the spans for an input line that fits in `width` columns.
///
/// When the value is too wide its start is elided and the cursor is drawn
/// at the end.
pub fn input_line(width: u16, input: &InputLine<'_>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        input.prompt.to_string(),
        Style::default().fg(input.prompt_color),
    )];
    let max_text_width = width.saturating_sub(input.prompt.width() as u16 + 1) as usize;
    let cursor_style = Style::default().fg(input.cursor_color);
    let text_style = Style::default().fg(input.text_color);

    if input.value.is_empty() {
        if input.cursor.is_some() {
            spans.push(Span::styled("█", cursor_style));
        }
        if let Some(placeholder) = input.placeholder {
            spans.push(Span::styled(
                truncate_start_with_ellipsis(placeholder, max_text_width),
                Style::default().fg(input.placeholder_color),
            ));
        }
        return Line::from(spans);
    }

    let fits = input.value.width() <= max_text_width;
    match input.cursor {
        Some(pos) if fits && pos < input.value.len() => {
            let (before, rest) = input.value.split_at(pos);
            let grapheme_len = rest.graphemes(true).next().map_or(0, str::len);
            let (under, after) = rest.split_at(grapheme_len);
            spans.push(Span::styled(before.to_string(), text_style));
            spans.push(Span::styled(
                under.to_string(),
                Style::default()
                    .fg(input.text_color)
                    .bg(input.cursor_color)
                    .add_modifier(Modifier::REVERSED),
            ));
            spans.push(Span::styled(after.to_string(), text_style));
        }
        cursor => {
            spans.push(Span::styled(
                truncate_start_with_ellipsis(input.value, max_text_width),
                text_style,
            ));
            if cursor.is_some() {
                spans.push(Span::styled("█", cursor_style));
            }
        }
    }
    Line::from(spans)
}

/// Renders a line of keyboard hints at the bottom of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);
    let para = Paragraph::new(hint_line(hints, highlight_color)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// Formats hints as `key action • key action`.
pub fn hint_line(hints: &[InputHint], highlight_color: Color) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            hint.key.to_string(),
            Style::default().fg(highlight_color),
        ));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}
