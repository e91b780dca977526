use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::sections::SECTIONS;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) if !model.help_visible => Some(Message::EditorPaste(text.clone())),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return match key.code {
                KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Message::Quit)
                }
                _ => Some(Message::HideHelp),
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if ctrl {
            let msg = match key.code {
                KeyCode::Char('q' | 'c') => Message::Quit,
                KeyCode::Char('t') => Message::ToggleFocused,
                KeyCode::Char('y') => Message::CopyMarkdown,
                KeyCode::Char('s') => Message::SaveMarkdown,
                KeyCode::Char('p') => Message::TogglePreviewMode,
                KeyCode::Char('a') => Message::EditorSelectAll,
                KeyCode::Char('l') => Message::Redraw,
                KeyCode::Left if !shift => Message::EditorMoveWordLeft,
                KeyCode::Right if !shift => Message::EditorMoveWordRight,
                KeyCode::Home => Message::EditorMoveToStart,
                KeyCode::End => Message::EditorMoveToEnd,
                _ => return None,
            };
            return Some(msg);
        }

        match key.code {
            // Sections
            KeyCode::Tab => Some(Message::FocusNext),
            KeyCode::BackTab => Some(Message::FocusPrev),

            // Editing
            KeyCode::Enter => Some(Message::EditorParagraphBreak),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::EditorInsertChar(c))
            }

            // Cursor and selection
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                let direction = match key.code {
                    KeyCode::Up => Direction::Up,
                    KeyCode::Down => Direction::Down,
                    KeyCode::Left => Direction::Left,
                    _ => Direction::Right,
                };
                if shift {
                    Some(Message::EditorSelect(direction))
                } else {
                    Some(Message::EditorMoveCursor(direction))
                }
            }
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),

            // Preview
            KeyCode::PageDown => Some(Message::PreviewScrollDown(preview_page(model))),
            KeyCode::PageUp => Some(Message::PreviewScrollUp(preview_page(model))),

            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Esc if model.editor.has_selection() => Some(Message::ClearSelection),
            KeyCode::Esc => Some(Message::Quit),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        let panes = crate::ui::pane_layout(screen_area(model), model.active_toast().is_some());

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left)
                if point_in_rect(mouse.column, mouse.row, panes.sections) =>
            {
                // First and last rows are the list border.
                let first_row = panes.sections.y + 1;
                if mouse.row < first_row {
                    return None;
                }
                let idx = usize::from(mouse.row - first_row);
                let on_badge = crate::ui::is_badge_column(panes.sections, mouse.column);
                SECTIONS.get(idx).map(|spec| {
                    if on_badge {
                        Message::ToggleSection(spec.id)
                    } else {
                        Message::FocusSection(spec.id)
                    }
                })
            }
            MouseEventKind::ScrollDown if point_in_rect(mouse.column, mouse.row, panes.preview) => {
                Some(Message::PreviewScrollDown(WHEEL_LINES))
            }
            MouseEventKind::ScrollUp if point_in_rect(mouse.column, mouse.row, panes.preview) => {
                Some(Message::PreviewScrollUp(WHEEL_LINES))
            }
            _ => None,
        }
    }
}

fn screen_area(model: &Model) -> Rect {
    let (width, height) = model.terminal_size;
    Rect::new(0, 0, width, height)
}

/// Visible preview lines, used as the page size for PageUp/PageDown.
fn preview_page(model: &Model) -> usize {
    let panes = crate::ui::pane_layout(screen_area(model), model.active_toast().is_some());
    usize::from(panes.preview.height.saturating_sub(2)).max(1)
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
