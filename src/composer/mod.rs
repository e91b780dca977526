//! The document composer: section texts, inclusion flags and the composed
//! Markdown derived from them.
//!
//! [`DocumentState`] is updated only through consuming transitions
//! (`state -> state`), so the composed Markdown is always a pure function of
//! the current texts and flags.

mod export;

pub use export::{
    ClipboardWriter, DirectoryExporter, ExportError, FileExporter, MARKDOWN_MEDIA_TYPE,
    MarkdownArtifact, README_FILE_NAME, TerminalClipboard, export_to_clipboard, export_to_file,
    osc52_sequence,
};

use crate::sections::{SECTION_COUNT, SECTIONS, SectionAssignment, SectionId, SectionSpec};

/// Separator placed between section blocks, and inserted by a paragraph break.
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// Text and inclusion flag for every section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    texts: [String; SECTION_COUNT],
    included: [bool; SECTION_COUNT],
}

impl Default for DocumentState {
    /// Every section seeded with its default text and included.
    fn default() -> Self {
        Self {
            texts: SECTIONS.map(|spec| spec.seed.to_string()),
            included: [true; SECTION_COUNT],
        }
    }
}

impl DocumentState {
    /// Default state with `assignments` applied in order and `hidden` excluded.
    ///
    /// A later assignment to the same section wins.
    pub fn seeded(hidden: &[SectionId], assignments: &[SectionAssignment]) -> Self {
        let state = assignments
            .iter()
            .fold(Self::default(), |state, a| state.edit_section(a.id, a.text.as_str()));
        hidden
            .iter()
            .fold(state, |state, id| state.set_included(*id, false))
    }

    pub fn text(&self, id: SectionId) -> &str {
        &self.texts[id.index()]
    }

    pub const fn is_included(&self, id: SectionId) -> bool {
        self.included[id.index()]
    }

    /// Number of sections currently included.
    pub fn included_count(&self) -> usize {
        self.included.iter().filter(|included| **included).count()
    }

    /// Replace a section's text verbatim.
    #[must_use]
    pub fn edit_section(mut self, id: SectionId, text: impl Into<String>) -> Self {
        self.texts[id.index()] = text.into();
        self
    }

    /// Flip a section's inclusion flag.
    #[must_use]
    pub const fn toggle_section(mut self, id: SectionId) -> Self {
        self.included[id.index()] = !self.included[id.index()];
        self
    }

    #[must_use]
    pub const fn set_included(mut self, id: SectionId, included: bool) -> Self {
        self.included[id.index()] = included;
        self
    }

    /// Replace the selection `start..end` of a section with a blank line.
    ///
    /// Offsets count characters, not bytes. They are clamped to the text
    /// length and swapped when reversed. Returns the new state and the caret
    /// position right after the inserted break.
    #[must_use]
    pub fn insert_paragraph_break(mut self, id: SectionId, start: usize, end: usize) -> (Self, usize) {
        let text = &self.texts[id.index()];
        let char_len = text.chars().count();
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let (start, end) = (start.min(char_len), end.min(char_len));

        let start_byte = char_to_byte(text, start);
        let end_byte = char_to_byte(text, end);
        let mut next = String::with_capacity(text.len() + PARAGRAPH_BREAK.len());
        next.push_str(&text[..start_byte]);
        next.push_str(PARAGRAPH_BREAK);
        next.push_str(&text[end_byte..]);

        self.texts[id.index()] = next;
        (self, start + PARAGRAPH_BREAK.chars().count())
    }

    /// Included sections in document order, with their current text.
    pub fn included_sections(&self) -> impl Iterator<Item = (&'static SectionSpec, &str)> {
        SECTIONS
            .iter()
            .filter(|spec| self.is_included(spec.id))
            .map(|spec| (spec, self.text(spec.id)))
    }

    /// Assemble the README: every included section's heading and text, in
    /// declared order, separated by blank lines. User text is not escaped.
    pub fn compose_markdown(&self) -> String {
        self.included_sections()
            .map(|(spec, text)| format!("{}\n{}", spec.heading(), text))
            .collect::<Vec<_>>()
            .join(PARAGRAPH_BREAK)
    }
}

fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte_idx, _)| byte_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_applies_assignments_then_hides() {
        let sets = [
            "usage=first".parse::<SectionAssignment>().unwrap(),
            "usage=run it\\nthen stop".parse::<SectionAssignment>().unwrap(),
        ];
        let state = DocumentState::seeded(&[SectionId::Roadmap, SectionId::Roadmap], &sets);
        assert_eq!(state.text(SectionId::Usage), "run it\nthen stop");
        assert!(!state.is_included(SectionId::Roadmap));
        assert_eq!(state.included_count(), SECTION_COUNT - 1);
    }

    #[test]
    fn test_default_state_starts_with_about_then_next_heading() {
        let md = DocumentState::default().compose_markdown();
        let expected_start =
            "## About\nThis is a quick ReadMe.md file generator for Github projects\n\n## Built With\n";
        assert!(md.starts_with(expected_start), "got: {md:?}");
    }

    #[test]
    fn test_default_state_includes_every_section() {
        let state = DocumentState::default();
        assert_eq!(state.included_count(), SECTION_COUNT);
        let md = state.compose_markdown();
        for spec in &SECTIONS {
            assert!(md.lines().any(|line| line == spec.heading()), "missing {}", spec.key);
        }
    }

    #[test]
    fn test_excluding_license_removes_heading_line() {
        let md = DocumentState::default()
            .toggle_section(SectionId::License)
            .compose_markdown();
        assert!(!md.lines().any(|line| line == "## License"));
        assert!(!md.contains("Distributed under the MIT License."));
    }

    #[test]
    fn test_edit_contact_follows_heading() {
        let md = DocumentState::default()
            .edit_section(SectionId::Contact, "Jane Doe - jane@example.com")
            .compose_markdown();
        let lines: Vec<_> = md.lines().collect();
        let heading = lines.iter().position(|l| *l == "## Contact").unwrap();
        assert_eq!(lines[heading + 1], "Jane Doe - jane@example.com");
    }

    #[test]
    fn test_toggle_twice_restores_output() {
        let state = DocumentState::default();
        let before = state.compose_markdown();
        let after = state
            .toggle_section(SectionId::Roadmap)
            .toggle_section(SectionId::Roadmap)
            .compose_markdown();
        assert_eq!(before, after);
    }

    #[test]
    fn test_edit_leaves_other_sections_alone() {
        let before = DocumentState::default().toggle_section(SectionId::Usage);
        let after = before.clone().edit_section(SectionId::About, "changed");
        for spec in &SECTIONS {
            assert_eq!(before.is_included(spec.id), after.is_included(spec.id));
            if spec.id != SectionId::About {
                assert_eq!(before.text(spec.id), after.text(spec.id));
            }
        }
    }

    #[test]
    fn test_edit_order_does_not_change_output_order() {
        let a = DocumentState::default()
            .edit_section(SectionId::License, "L")
            .edit_section(SectionId::About, "A");
        let b = DocumentState::default()
            .edit_section(SectionId::About, "A")
            .edit_section(SectionId::License, "L");
        assert_eq!(a.compose_markdown(), b.compose_markdown());
        let md = a.compose_markdown();
        assert!(md.find("## About").unwrap() < md.find("## License").unwrap());
    }

    #[test]
    fn test_user_markdown_is_not_escaped() {
        let md = DocumentState::default()
            .edit_section(SectionId::Usage, "<b>*bold*</b> & `code`")
            .compose_markdown();
        assert!(md.contains("## Usage\n<b>*bold*</b> & `code`"));
    }

    #[test]
    fn test_nothing_included_composes_empty_string() {
        let state = SECTIONS
            .iter()
            .fold(DocumentState::default(), |state, spec| state.set_included(spec.id, false));
        assert_eq!(state.compose_markdown(), "");
    }

    #[test]
    fn test_single_section_has_no_separator() {
        let state = SECTIONS
            .iter()
            .fold(DocumentState::default(), |state, spec| {
                state.set_included(spec.id, spec.id == SectionId::License)
            });
        assert_eq!(
            state.compose_markdown(),
            "## License\nDistributed under the MIT License."
        );
    }

    #[test]
    fn test_nested_sections_use_level_three() {
        let md = DocumentState::default().compose_markdown();
        assert!(md.contains("\n\n### Prerequisites\n"));
        assert!(md.contains("\n\n### Installation\n"));
    }

    #[test]
    fn test_paragraph_break_at_caret() {
        let state = DocumentState::default().edit_section(SectionId::Usage, "abcd");
        let (state, caret) = state.insert_paragraph_break(SectionId::Usage, 2, 2);
        assert_eq!(state.text(SectionId::Usage), "ab\n\ncd");
        assert_eq!(caret, 4);
    }

    #[test]
    fn test_paragraph_break_replaces_selection() {
        let state = DocumentState::default().edit_section(SectionId::Usage, "hello world");
        let (state, caret) = state.insert_paragraph_break(SectionId::Usage, 5, 6);
        assert_eq!(state.text(SectionId::Usage), "hello\n\nworld");
        assert_eq!(caret, 7);
    }

    #[test]
    fn test_paragraph_break_swaps_reversed_selection() {
        let state = DocumentState::default().edit_section(SectionId::Usage, "hello world");
        let (state, caret) = state.insert_paragraph_break(SectionId::Usage, 6, 5);
        assert_eq!(state.text(SectionId::Usage), "hello\n\nworld");
        assert_eq!(caret, 7);
    }

    #[test]
    fn test_paragraph_break_clamps_past_end() {
        let state = DocumentState::default().edit_section(SectionId::Usage, "ab");
        let (state, caret) = state.insert_paragraph_break(SectionId::Usage, 10, 20);
        assert_eq!(state.text(SectionId::Usage), "ab\n\n");
        assert_eq!(caret, 4);
    }

    #[test]
    fn test_paragraph_break_counts_characters() {
        let state = DocumentState::default().edit_section(SectionId::Usage, "café au lait");
        let (state, caret) = state.insert_paragraph_break(SectionId::Usage, 4, 5);
        assert_eq!(state.text(SectionId::Usage), "café\n\nau lait");
        assert_eq!(caret, 6);
    }

    #[test]
    fn test_paragraph_break_only_touches_target() {
        let before = DocumentState::default();
        let (after, _) = before.clone().insert_paragraph_break(SectionId::About, 0, 0);
        assert_eq!(before.text(SectionId::Usage), after.text(SectionId::Usage));
        assert_eq!(before.included_count(), after.included_count());
    }

    #[test]
    fn test_compose_is_idempotent() {
        let state = DocumentState::default().toggle_section(SectionId::Contact);
        assert_eq!(state.compose_markdown(), state.compose_markdown());
    }
}
