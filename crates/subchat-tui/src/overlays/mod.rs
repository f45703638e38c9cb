//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay owns its state, key handler, and render function.
//!
//! - `confirm_delete.rs`: delete confirmation modal
//! - `render_utils.rs`: shared rendering helpers (also used by inline inputs)

pub mod confirm_delete;
pub mod render_utils;

pub use confirm_delete::ConfirmDeleteState;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use subchat_core::chats::{ChatId, Conversation};

use crate::common::Palette;
use crate::effects::UiEffect;

// ============================================================================
// OverlayRequest / OverlayTransition / OverlayUpdate
// ============================================================================

/// Requests to open a new overlay.
#[derive(Debug)]
pub enum OverlayRequest {
    ConfirmDelete { chat: Conversation },
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

// ============================================================================
// Overlay
// ============================================================================

#[derive(Debug)]
pub enum Overlay {
    ConfirmDelete(ConfirmDeleteState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        match self {
            Overlay::ConfirmDelete(c) => c.render(frame, area, palette),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::ConfirmDelete(c) => c.handle_key(key),
        }
    }
}

// ============================================================================
// OverlayExt - Extension trait for Option<Overlay>
// ============================================================================

/// Extension trait for `Option<Overlay>`.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette);

    /// The chat a pending delete confirmation targets, if any.
    fn delete_candidate(&self) -> Option<ChatId>;
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if let Some(overlay) = self {
            overlay.render(frame, area, palette);
        }
    }

    fn delete_candidate(&self) -> Option<ChatId> {
        match self {
            Some(Overlay::ConfirmDelete(c)) => Some(c.id),
            None => None,
        }
    }
}
