//! Markdown to HTML rendering for the live preview.
//!
//! The renderer's HTML is shown as-is and never sanitized. Every byte of
//! input comes from the same user who views the preview, so this trust
//! boundary is accepted; anything that feeds third-party Markdown through
//! here must sanitize the output first.

use comrak::{Options, markdown_to_html};

use crate::composer::DocumentState;

/// Converts Markdown into HTML.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// GitHub-flavoured rendering with comrak.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComrakRenderer;

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut options = Options::default();

        // GFM extensions, matching what GitHub shows for a README
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options.extension.shortcodes = true;

        // READMEs routinely carry inline HTML (centered logos, badges)
        options.render.unsafe_ = true;

        markdown_to_html(markdown, &options)
    }
}

/// Composed Markdown and its rendered HTML for one document state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub markdown: String,
    pub html: String,
}

impl Preview {
    pub fn build(state: &DocumentState, renderer: &dyn MarkdownRenderer) -> Self {
        let markdown = state.compose_markdown();
        let html = renderer.render(&markdown);
        Self { markdown, html }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::SectionId;

    #[test]
    fn test_renders_section_headings() {
        let html = ComrakRenderer.render("## About\nHello");
        assert!(html.contains("<h2>About</h2>"), "got: {html}");
        assert!(html.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_renders_task_lists() {
        let html = ComrakRenderer.render("- [x] done\n- [ ] todo\n");
        assert!(html.contains("checkbox"), "got: {html}");
    }

    #[test]
    fn test_preview_tracks_state() {
        let state = DocumentState::default().toggle_section(SectionId::About);
        let preview = Preview::build(&state, &ComrakRenderer);
        assert_eq!(preview.markdown, state.compose_markdown());
        assert!(!preview.html.contains("<h2>About</h2>"));
        assert!(preview.html.contains("<h2>Built With</h2>"));
    }

    #[test]
    fn test_inline_html_passes_through() {
        let html = ComrakRenderer.render("<p align=\"center\">logo</p>");
        assert!(html.contains("<p align=\"center\">logo</p>"), "got: {html}");
    }
}
