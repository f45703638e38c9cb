//! Theme preference.
//!
//! The preference is process-wide: resolved once at startup from the saved
//! config (or the terminal background when nothing is saved), and every
//! toggle is persisted immediately via `Config::save_theme`.

use serde::{Deserialize, Serialize};

/// Dashboard color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Resolves the startup theme: saved preference first, then the system hint.
    pub fn initial(saved: Option<Theme>) -> Theme {
        saved
            .or_else(|| system_preference(std::env::var("COLORFGBG").ok().as_deref()))
            .unwrap_or_default()
    }

    /// Returns the opposite theme.
    #[must_use]
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Label for the toggle button (names the theme it switches to).
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark",
            Theme::Dark => "Light",
        }
    }
}

/// Reads the terminal background from a `COLORFGBG` value ("fg;bg" or "fg;x;bg").
///
/// ANSI background 7 and 9-15 are light; everything else is dark.
pub fn system_preference(colorfgbg: Option<&str>) -> Option<Theme> {
    let bg: u8 = colorfgbg?.rsplit(';').next()?.trim().parse().ok()?;
    if bg == 7 || (9..=15).contains(&bg) {
        Some(Theme::Light)
    } else {
        Some(Theme::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_preference_wins() {
        assert_eq!(Theme::initial(Some(Theme::Light)), Theme::Light);
        assert_eq!(Theme::initial(Some(Theme::Dark)), Theme::Dark);
    }

    #[test]
    fn test_system_preference_from_colorfgbg() {
        assert_eq!(system_preference(Some("0;15")), Some(Theme::Light));
        assert_eq!(system_preference(Some("15;0")), Some(Theme::Dark));
        assert_eq!(system_preference(Some("12;default;7")), Some(Theme::Light));
        assert_eq!(system_preference(Some("garbage")), None);
        assert_eq!(system_preference(None), None);
    }

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggle_label(), "Dark");
    }
}
