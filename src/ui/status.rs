use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::sections::SECTION_COUNT;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let spec = model.focused.spec();
    let cursor = model.editor.cursor();
    let status = format!(
        " {}  Ln {}, Col {}  [{}/{} shown]  [{}]  Ctrl-Y:copy  Ctrl-S:save  F1:help",
        spec.title,
        cursor.line + 1,
        cursor.col + 1,
        model.document.included_count(),
        SECTION_COUNT,
        model.preview_mode.as_str(),
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
