use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::config::PreviewMode;
use crate::sections::{SECTION_COUNT, SECTIONS};

use super::style::{classify_html, classify_markdown, style_for_preview_line};
use super::{FORM_WIDTH_PERCENT, PREVIEW_WIDTH_PERCENT, overlays, status};

/// Screen regions, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub sections: Rect,
    pub editor: Rect,
    pub preview: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

pub fn split_main_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(FORM_WIDTH_PERCENT),
            Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Columns taken by the Shown/Hidden badge at the end of each section row.
const BADGE_WIDTH: u16 = 6;

/// Whether `column` lands on a section row's Shown/Hidden badge.
pub const fn is_badge_column(sections: Rect, column: u16) -> bool {
    let inner_end = sections.x + sections.width.saturating_sub(1);
    column < inner_end && column + BADGE_WIDTH >= inner_end
}

/// Compute the pane layout for a screen of `area`.
pub fn pane_layout(area: Rect, toast_active: bool) -> PaneLayout {
    let footer_rows = 1 + u16::from(toast_active);
    let main = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let status = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    let toast = toast_active.then(|| Rect {
        y: area.y + area.height.saturating_sub(2),
        height: area.height.saturating_sub(1).min(1),
        ..area
    });

    let columns = split_main_columns(main);
    // SECTION_COUNT is a small constant
    #[allow(clippy::cast_possible_truncation)]
    let list_height = SECTION_COUNT as u16 + 2;
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(list_height), Constraint::Min(3)])
        .split(columns[0]);

    PaneLayout {
        sections: left[0],
        editor: left[1],
        preview: columns[1],
        toast,
        status,
    }
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let panes = pane_layout(area, model.active_toast().is_some());

    render_sections(model, frame, panes.sections);
    render_editor(model, frame, panes.editor);
    render_preview(model, frame, panes.preview);

    if let Some(toast_area) = panes.toast {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, panes.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_sections(model: &Model, frame: &mut Frame, area: Rect) {
    let inner_width = usize::from(area.width.saturating_sub(2));
    let items: Vec<Line> = SECTIONS
        .iter()
        .map(|spec| {
            let focused = spec.id == model.focused;
            let included = model.document.is_included(spec.id);
            let marker = if focused { ">" } else { " " };
            let indent = if spec.is_nested() { "  " } else { "" };
            let badge = if included { "Shown" } else { "Hidden" };
            let label = format!("{marker} {indent}{}", spec.title);
            let badge_width = usize::from(BADGE_WIDTH);
            let pad = inner_width.saturating_sub(label.chars().count() + badge_width + 1);
            let base = if included {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let style = if focused { base.reversed() } else { base };
            let badge_style = if included {
                style.fg(Color::Green)
            } else {
                style
            };
            Line::from(vec![
                Span::styled(format!("{label}{} ", " ".repeat(pad)), style),
                Span::styled(format!("{badge:>badge_width$}"), badge_style),
            ])
        })
        .collect();

    let block = Block::default()
        .title(format!(
            "Sections ({}/{SECTION_COUNT})",
            model.document.included_count()
        ))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(items).block(block), area);
}

fn render_editor(model: &mut Model, frame: &mut Frame, area: Rect) {
    let spec = model.focused.spec();
    let title = if model.document.is_included(model.focused) {
        spec.title.to_string()
    } else {
        format!("{} (hidden)", spec.title)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let visible_height = usize::from(inner.height);
    let width = usize::from(inner.width);
    if visible_height == 0 || width == 0 {
        return;
    }

    let editor = &model.editor;
    let cursor = editor.cursor();
    let total_lines = editor.line_count();

    // Keep the cursor line on screen
    let max_start = total_lines.saturating_sub(visible_height);
    let mut start = model.editor_scroll_offset.min(max_start);
    if cursor.line < start {
        start = cursor.line;
    } else if cursor.line >= start + visible_height {
        start = cursor.line + 1 - visible_height;
    }
    model.editor_scroll_offset = start;

    let editor = &model.editor;
    let cursor_line = editor.line_at(cursor.line).unwrap_or_default();
    let cursor_width = display_width(&cursor_line[..cursor.col.min(cursor_line.len())]);
    let h_offset = (cursor_width + 1).saturating_sub(width);

    let end = (start + visible_height).min(total_lines);
    let content: Vec<Line> = (start..end)
        .map(|line_idx| {
            let text = editor.line_at(line_idx).unwrap_or_default();
            let selection = editor.selection_on_line(line_idx);
            let cursor_col = (line_idx == cursor.line).then_some(cursor.col);
            editor_line(&text, selection, cursor_col, h_offset)
        })
        .collect();

    frame.render_widget(Paragraph::new(content), inner);
}

/// Build one editor row, skipping `h_offset` display columns.
fn editor_line(
    text: &str,
    selection: Option<std::ops::Range<usize>>,
    cursor_col: Option<usize>,
    h_offset: usize,
) -> Line<'static> {
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
    let selected_style = Style::default().bg(Color::DarkGray);

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    let mut column = 0usize;

    for (byte_idx, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        let visible = column >= h_offset;
        column += ch_width;
        if !visible {
            continue;
        }
        let style = if cursor_col == Some(byte_idx) {
            cursor_style
        } else if selection.as_ref().is_some_and(|r| r.contains(&byte_idx)) {
            selected_style
        } else {
            Style::default()
        };
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    if cursor_col.is_some_and(|col| col >= text.len()) {
        spans.push(Span::styled(" ", cursor_style));
    }
    Line::from(spans)
}

fn display_width(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let text = model.preview_text();
    let kinds = match model.preview_mode {
        PreviewMode::Markdown => classify_markdown(text),
        PreviewMode::Html => classify_html(text),
    };
    let content: Vec<Line> = text
        .lines()
        .zip(kinds)
        .skip(model.preview_scroll)
        .map(|(line, kind)| Line::styled(line.to_string(), style_for_preview_line(kind)))
        .collect();

    let title = match model.preview_mode {
        PreviewMode::Markdown => "Preview (Markdown)",
        PreviewMode::Html => "Preview (HTML)",
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
