//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`Effects`]: Clipboard and file output triggered by messages
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use effects::Effects;
pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::composer::DocumentState;
use crate::config::PreviewMode;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    document: DocumentState,
    output_dir: PathBuf,
    preview_mode: PreviewMode,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application editing `document`.
    pub fn new(document: DocumentState) -> Self {
        Self {
            document,
            output_dir: PathBuf::from("."),
            preview_mode: PreviewMode::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Directory that Ctrl-S saves `README.md` into.
    #[must_use]
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Initial preview pane content.
    #[must_use]
    pub const fn with_preview_mode(mut self, mode: PreviewMode) -> Self {
        self.preview_mode = mode;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// The document as it stands, including edits made during [`App::run`].
    pub const fn document(&self) -> &DocumentState {
        &self.document
    }
}
