use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::{ToastKind, ToastState};
use crate::common::{Palette, truncate_with_ellipsis};

const TOAST_WIDTH: u16 = 44;

/// Stacks toasts in the top-right corner of `area`, newest at the top.
pub fn render_toasts(frame: &mut Frame, area: Rect, toasts: &ToastState, palette: &Palette) {
    let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
    if width < 8 {
        return;
    }
    let text_width = width.saturating_sub(4) as usize;

    let mut y = area.y + 1;
    for toast in toasts.iter().rev() {
        if y + 3 > area.y + area.height {
            break;
        }
        let (icon, color) = match toast.kind {
            ToastKind::Success => ("✓", palette.success),
            ToastKind::Error => ("✗", palette.error),
        };
        let rect = Rect::new(area.x + area.width - width - 1, y, width, 3);
        frame.render_widget(Clear, rect);
        let line = Line::from(vec![
            Span::styled(
                format!("{icon} "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                truncate_with_ellipsis(&toast.text, text_width.saturating_sub(2)),
                Style::default().fg(palette.fg),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        frame.render_widget(Paragraph::new(line).block(block), rect);
        y += 3;
    }
}
