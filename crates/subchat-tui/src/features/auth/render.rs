//! Sign-in / sign-up screen.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::state::{AuthField, AuthMode, AuthState};
use crate::common::{Palette, TextField};
use crate::overlays::render_utils::{
    InputHint, InputLine, calculate_overlay_area, input_line, render_hints,
};

const FORM_WIDTH: u16 = 56;
const FORM_HEIGHT: u16 = 16;

pub fn render_auth_screen(frame: &mut Frame, area: Rect, auth: &AuthState, palette: &Palette) {
    let form = &auth.form;
    let popup = calculate_overlay_area(area, area.height, FORM_WIDTH, FORM_HEIGHT);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(format!(" Subspace AI Chatbot · {} ", form.mode.title()))
        .title_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    if inner.height < 8 {
        return;
    }

    let row = |offset: u16| {
        Rect::new(
            inner.x + 1,
            inner.y + offset,
            inner.width.saturating_sub(2),
            1,
        )
    };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            match form.mode {
                AuthMode::SignIn => "Welcome back! Sign in to continue.",
                AuthMode::SignUp => "Create an account to start chatting.",
            },
            Style::default().fg(palette.muted),
        ))),
        row(1),
    );

    render_field(
        frame,
        row(3),
        "Email",
        &form.email,
        false,
        form.focus == AuthField::Email,
        palette,
    );
    render_field(
        frame,
        row(5),
        "Password",
        &form.password,
        true,
        form.focus == AuthField::Password,
        palette,
    );

    let status_area = Rect::new(inner.x + 1, inner.y + 7, inner.width.saturating_sub(2), 3);
    let status = if form.submitting {
        Some(Span::styled(
            match form.mode {
                AuthMode::SignIn => "Signing in...",
                AuthMode::SignUp => "Creating account...",
            },
            Style::default().fg(palette.muted),
        ))
    } else if let Some(error) = &form.error {
        Some(Span::styled(error.as_str(), Style::default().fg(palette.error)))
    } else {
        form.notice
            .as_deref()
            .map(|notice| Span::styled(notice, Style::default().fg(palette.success)))
    };
    if let Some(status) = status {
        frame.render_widget(
            Paragraph::new(Line::from(status)).wrap(Wrap { trim: true }),
            status_area,
        );
    }

    let switch_hint = match form.mode {
        AuthMode::SignIn => "sign up",
        AuthMode::SignUp => "sign in",
    };
    let hints = [
        InputHint::new("Enter", "submit"),
        InputHint::new("Tab", "next field"),
        InputHint::new("Ctrl+N", switch_hint),
        InputHint::new("Esc", "quit"),
    ];
    render_hints(frame, inner, &hints, palette.accent);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            match form.mode {
                AuthMode::SignIn => "Don't have an account? Press Ctrl+N to sign up.",
                AuthMode::SignUp => "Already have an account? Press Ctrl+N to sign in.",
            },
            Style::default().fg(palette.muted),
        )))
        .alignment(Alignment::Center),
        Rect::new(inner.x, inner.y + inner.height.saturating_sub(2), inner.width, 1),
    );
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    field: &TextField,
    masked: bool,
    focused: bool,
    palette: &Palette,
) {
    let label_width = 10u16;
    let label_style = if focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!("{label}:"), label_style))),
        Rect::new(area.x, area.y, label_width.min(area.width), 1),
    );

    let masked_value;
    let (value, cursor) = if masked {
        masked_value = "•".repeat(field.value().chars().count());
        let before = field.value()[..field.cursor()].chars().count();
        (masked_value.as_str(), before * '•'.len_utf8())
    } else {
        (field.value(), field.cursor())
    };
    let input_area = Rect::new(
        area.x + label_width,
        area.y,
        area.width.saturating_sub(label_width),
        1,
    );
    let line = input_line(
        input_area.width,
        &InputLine {
            value,
            cursor: focused.then_some(cursor),
            placeholder: None,
            prompt: "",
            prompt_color: palette.muted,
            text_color: palette.fg,
            placeholder_color: palette.muted,
            cursor_color: if focused { palette.accent } else { palette.border },
        },
    );
    frame.render_widget(Paragraph::new(line), input_area);
}
