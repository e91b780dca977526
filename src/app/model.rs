use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::composer::DocumentState;
use crate::config::PreviewMode;
use crate::editor::FieldEditor;
use crate::preview::{ComrakRenderer, MarkdownRenderer, Preview};
use crate::sections::SectionId;

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Section texts and inclusion flags
    pub document: DocumentState,
    /// Composed Markdown and HTML for the current document
    pub preview: Preview,
    renderer: Box<dyn MarkdownRenderer>,
    /// Section whose text is in the editor
    pub focused: SectionId,
    /// Working copy of the focused section's text
    pub editor: FieldEditor,
    /// Line index of the first visible editor line
    pub editor_scroll_offset: usize,
    /// What the preview pane shows
    pub preview_mode: PreviewMode,
    /// Line index of the first visible preview line
    pub preview_scroll: usize,
    /// Whether help overlay is visible
    pub help_visible: bool,
    toast: Option<Toast>,
    /// Directory `README.md` is saved into
    pub output_dir: PathBuf,
    /// Config file paths shown in help
    pub config_global_path: Option<PathBuf>,
    pub config_local_path: Option<PathBuf>,
    /// Terminal size (width, height)
    pub terminal_size: (u16, u16),
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("focused", &self.focused)
            .field("included", &self.document.included_count())
            .field("preview_mode", &self.preview_mode)
            .field("help_visible", &self.help_visible)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model over `document`, rendering previews with `renderer`.
    pub fn new(
        document: DocumentState,
        renderer: Box<dyn MarkdownRenderer>,
        terminal_size: (u16, u16),
    ) -> Self {
        let preview = Preview::build(&document, renderer.as_ref());
        let focused = SectionId::About;
        let mut model = Self {
            document,
            preview,
            renderer,
            focused,
            editor: FieldEditor::empty(),
            editor_scroll_offset: 0,
            preview_mode: PreviewMode::default(),
            preview_scroll: 0,
            help_visible: false,
            toast: None,
            output_dir: PathBuf::from("."),
            config_global_path: None,
            config_local_path: None,
            terminal_size,
            should_quit: false,
        };
        model.focus(focused);
        model
    }

    #[must_use]
    pub const fn with_preview_mode(mut self, mode: PreviewMode) -> Self {
        self.preview_mode = mode;
        self
    }

    /// Load a section into the editor with the cursor at the end of its text.
    pub(super) fn focus(&mut self, id: SectionId) {
        self.focused = id;
        self.editor = FieldEditor::from_text(self.document.text(id));
        self.editor.move_to_end();
        self.editor_scroll_offset = 0;
    }

    /// Write the editor's text back into the document.
    pub(super) fn commit_editor(&mut self) {
        let document = std::mem::take(&mut self.document);
        self.document = document.edit_section(self.focused, self.editor.text());
        self.refresh_preview();
    }

    /// Recompute the composed Markdown and HTML from the document.
    pub(super) fn refresh_preview(&mut self) {
        self.preview = Preview::build(&self.document, self.renderer.as_ref());
    }

    /// Lines of whatever the preview pane currently shows.
    pub fn preview_text(&self) -> &str {
        match self.preview_mode {
            PreviewMode::Markdown => &self.preview.markdown,
            PreviewMode::Html => &self.preview.html,
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Placeholder for std::mem::take: nothing is composed or rendered.
impl Default for Model {
    fn default() -> Self {
        Self {
            document: DocumentState::default(),
            preview: Preview::default(),
            renderer: Box::new(ComrakRenderer),
            focused: SectionId::About,
            editor: FieldEditor::empty(),
            editor_scroll_offset: 0,
            preview_mode: PreviewMode::default(),
            preview_scroll: 0,
            help_visible: false,
            toast: None,
            output_dir: PathBuf::new(),
            config_global_path: None,
            config_local_path: None,
            terminal_size: (80, 24),
            should_quit: false,
        }
    }
}
