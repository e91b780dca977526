//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`style`]: Theming and colors for the preview pane
//! - the section list, field editor and preview panes
//! - status bar, toasts and the help overlay

pub mod style;

mod overlays;
mod render;
mod status;

pub use render::{PaneLayout, is_badge_column, pane_layout, render, split_main_columns};

pub const FORM_WIDTH_PERCENT: u16 = 45;
pub const PREVIEW_WIDTH_PERCENT: u16 = 55;

#[cfg(test)]
mod tests;
