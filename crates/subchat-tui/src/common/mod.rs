//! Shared leaf types for TUI features.
//!
//! Contains types with no feature dependencies (tasks, text helpers, colors).
//! This module must NOT import `UiEvent` or feature state.

pub mod palette;
pub mod task;
pub mod text;
pub mod text_field;

pub use palette::Palette;
pub use task::{TaskCompleted, TaskId, TaskKind, TaskPolicy, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::{sanitize_for_display, truncate_start_with_ellipsis, truncate_with_ellipsis};
pub use text_field::TextField;
