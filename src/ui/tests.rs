use super::*;
use crate::app::{Message, Model, update};
use crate::composer::DocumentState;
use crate::config::PreviewMode;
use crate::preview::ComrakRenderer;
use crate::sections::SectionId;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(120, 40);
    Terminal::new(backend).unwrap()
}

fn create_test_model() -> Model {
    Model::new(DocumentState::default(), Box::new(ComrakRenderer), (120, 40))
}

fn draw(model: &mut Model) -> String {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_render_lists_every_section_with_badges() {
    let mut model = create_test_model();
    let screen = draw(&mut model);
    assert!(screen.contains("Sections (11/11)"));
    assert!(screen.contains("Acknowledgements"));
    assert!(screen.contains("Shown"));
    assert!(!screen.contains("Hidden"));
}

#[test]
fn test_render_marks_hidden_sections() {
    let model = create_test_model();
    let mut model = update(model, Message::ToggleSection(SectionId::Roadmap));
    let screen = draw(&mut model);
    assert!(screen.contains("Sections (10/11)"));
    assert!(screen.contains("Hidden"));
}

#[test]
fn test_badge_occupies_clickable_columns() {
    let model = create_test_model();
    let mut model = update(model, Message::ToggleSection(SectionId::Roadmap));
    let screen = draw(&mut model);
    let panes = pane_layout(ratatui::layout::Rect::new(0, 0, 120, 40), false);
    let row = usize::from(panes.sections.y + 1) + SectionId::Roadmap.index();
    let cells: Vec<char> = screen.lines().nth(row).unwrap().chars().collect();
    let badge: String = (panes.sections.x..panes.sections.x + panes.sections.width)
        .filter(|col| is_badge_column(panes.sections, *col))
        .map(|col| cells[usize::from(col)])
        .collect();
    assert_eq!(badge, "Hidden");
}

#[test]
fn test_render_preview_shows_composed_markdown() {
    let mut model = create_test_model();
    let screen = draw(&mut model);
    assert!(screen.contains("Preview (Markdown)"));
    assert!(screen.contains("## About"));
}

#[test]
fn test_render_preview_html_mode() {
    let mut model = create_test_model().with_preview_mode(PreviewMode::Html);
    let screen = draw(&mut model);
    assert!(screen.contains("Preview (HTML)"));
    assert!(screen.contains("<h2>About</h2>"));
}

#[test]
fn test_render_editor_title_follows_focus() {
    let model = create_test_model();
    let mut model = update(model, Message::FocusSection(SectionId::License));
    let screen = draw(&mut model);
    assert!(screen.contains("Distributed under the MIT License"));
    assert!(screen.contains(" License  Ln 1"));
}

#[test]
fn test_render_editor_marks_hidden_focus() {
    let model = create_test_model();
    let mut model = update(model, Message::ToggleFocused);
    let screen = draw(&mut model);
    assert!(screen.contains("About (hidden)"));
}

#[test]
fn test_render_help_overlay() {
    let model = create_test_model();
    let mut model = update(model, Message::ToggleHelp);
    let screen = draw(&mut model);
    assert!(screen.contains("Help"));
    assert!(screen.contains("Paragraph break"));
    assert!(screen.contains("Copy Markdown"));
}

#[test]
fn test_render_keeps_editor_cursor_visible() {
    let mut model = create_test_model();
    for _ in 0..60 {
        model = update(model, Message::EditorParagraphBreak);
    }
    draw(&mut model);
    let cursor_line = model.editor.cursor().line;
    assert!(model.editor_scroll_offset <= cursor_line);
    assert!(cursor_line < model.editor_scroll_offset + 24);
}

#[test]
fn test_render_small_terminal_does_not_panic() {
    let mut model = create_test_model();
    let backend = TestBackend::new(20, 5);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();
}
