//! Colors per theme.

use ratatui::style::Color;
use subchat_core::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub user: Color,
    pub assistant: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                border: Color::DarkGray,
                highlight_bg: Color::Cyan,
                highlight_fg: Color::Black,
                user: Color::LightBlue,
                assistant: Color::LightGreen,
                success: Color::Green,
                error: Color::Red,
                warning: Color::Yellow,
            },
            Theme::Light => Self {
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                border: Color::Gray,
                highlight_bg: Color::Blue,
                highlight_fg: Color::White,
                user: Color::Blue,
                assistant: Color::Green,
                success: Color::Green,
                error: Color::Red,
                warning: Color::Magenta,
            },
        }
    }
}
