use crate::app::Model;
use crate::editor::Direction;
use crate::sections::SectionId;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Sections
    /// Focus the next section
    FocusNext,
    /// Focus the previous section
    FocusPrev,
    /// Focus a specific section
    FocusSection(SectionId),
    /// Include or exclude the focused section
    ToggleFocused,
    /// Include or exclude a specific section
    ToggleSection(SectionId),

    // Editor
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Insert pasted text at the cursor
    EditorPaste(String),
    /// Delete selection or character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete selection or character at cursor (Delete)
    EditorDeleteForward,
    /// Replace the selection with a blank line (Enter)
    EditorParagraphBreak,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Extend the selection in a direction (Shift+arrow)
    EditorSelect(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    EditorMoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    EditorMoveWordRight,
    /// Move cursor to start of field (Ctrl+Home)
    EditorMoveToStart,
    /// Move cursor to end of field (Ctrl+End)
    EditorMoveToEnd,
    /// Select the whole field (Ctrl+A)
    EditorSelectAll,
    /// Drop the selection
    ClearSelection,

    // Preview
    /// Scroll preview up by n lines
    PreviewScrollUp(usize),
    /// Scroll preview down by n lines
    PreviewScrollDown(usize),
    /// Switch between Markdown source and HTML
    TogglePreviewMode,

    // Export
    /// Copy the composed Markdown to the clipboard
    CopyMarkdown,
    /// Save the composed Markdown as README.md
    SaveMarkdown,

    // Window
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Clipboard and file output happen afterwards, in the effects handler.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::FocusNext => {
            let next = model.focused.next();
            model.focus(next);
        }
        Message::FocusPrev => {
            let prev = model.focused.prev();
            model.focus(prev);
        }
        Message::FocusSection(id) => {
            if id != model.focused {
                model.focus(id);
            }
        }
        Message::ToggleFocused => {
            let id = model.focused;
            model = toggle(model, id);
        }
        Message::ToggleSection(id) => {
            model = toggle(model, id);
        }

        Message::EditorInsertChar(ch) => {
            model.editor.insert_char(ch);
            model.commit_editor();
        }
        Message::EditorPaste(text) => {
            model.editor.insert_str(&text);
            model.commit_editor();
        }
        Message::EditorDeleteBack => {
            if model.editor.delete_back() {
                model.commit_editor();
            }
        }
        Message::EditorDeleteForward => {
            if model.editor.delete_forward() {
                model.commit_editor();
            }
        }
        Message::EditorParagraphBreak => {
            let (start, end) = model.editor.selection_chars();
            let id = model.focused;
            let document = std::mem::take(&mut model.document);
            let (document, caret) = document.insert_paragraph_break(id, start, end);
            model.document = document;
            model.refresh_preview();
            model.focus(id);
            model.editor.move_to_char(caret);
            // Scroll to the bottom of the field; the view keeps the caret visible.
            model.editor_scroll_offset = model.editor.line_count();
        }
        Message::EditorMoveCursor(direction) => {
            model.editor.clear_selection();
            model.editor.move_cursor(direction);
        }
        Message::EditorSelect(direction) => {
            model.editor.begin_selection();
            model.editor.move_cursor(direction);
        }
        Message::EditorMoveHome => {
            model.editor.clear_selection();
            model.editor.move_home();
        }
        Message::EditorMoveEnd => {
            model.editor.clear_selection();
            model.editor.move_end();
        }
        Message::EditorMoveWordLeft => {
            model.editor.clear_selection();
            model.editor.move_word_left();
        }
        Message::EditorMoveWordRight => {
            model.editor.clear_selection();
            model.editor.move_word_right();
        }
        Message::EditorMoveToStart => {
            model.editor.clear_selection();
            model.editor.move_to_start();
        }
        Message::EditorMoveToEnd => {
            model.editor.clear_selection();
            model.editor.move_to_end();
        }
        Message::EditorSelectAll => model.editor.select_all(),
        Message::ClearSelection => model.editor.clear_selection(),

        Message::PreviewScrollUp(n) => {
            model.preview_scroll = model.preview_scroll.saturating_sub(n);
        }
        Message::PreviewScrollDown(n) => {
            let max = model.preview_text().lines().count().saturating_sub(1);
            model.preview_scroll = (model.preview_scroll + n).min(max);
        }
        Message::TogglePreviewMode => {
            model.preview_mode = model.preview_mode.toggled();
            model.preview_scroll = 0;
        }

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
        }
        Message::Quit => {
            model.should_quit = true;
        }
        Message::CopyMarkdown | Message::SaveMarkdown | Message::Redraw => {}
    }
    model
}

fn toggle(mut model: Model, id: SectionId) -> Model {
    let document = std::mem::take(&mut model.document);
    model.document = document.toggle_section(id);
    model.refresh_preview();
    let max = model.preview_text().lines().count().saturating_sub(1);
    model.preview_scroll = model.preview_scroll.min(max);
    tracing::debug!(
        section = %id,
        included = model.document.is_included(id),
        "toggled section"
    );
    model
}
