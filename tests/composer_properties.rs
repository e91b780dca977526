use proptest::prelude::*;

use readme_composer::composer::{
    DocumentState, FileExporter, MarkdownArtifact, export_to_file,
};
use readme_composer::sections::{SECTION_COUNT, SECTIONS, SectionId};

fn section_id() -> impl Strategy<Value = SectionId> {
    (0..SECTION_COUNT).prop_map(|idx| SECTIONS[idx].id)
}

fn section_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9 .,*#\\[\\]()\n-]{0,60}",
        "\\PC{0,20}",
    ]
}

fn edits() -> impl Strategy<Value = Vec<(SectionId, String)>> {
    prop::collection::vec((section_id(), section_text()), 0..12)
}

fn apply(edits: &[(SectionId, String)]) -> DocumentState {
    edits
        .iter()
        .fold(DocumentState::default(), |state, (id, text)| {
            state.edit_section(*id, text.as_str())
        })
}

/// The block a section contributes when included.
fn block(state: &DocumentState, id: SectionId) -> String {
    format!("{}\n{}", id.spec().heading(), state.text(id))
}

struct MemoryExporter(Vec<MarkdownArtifact>);

impl FileExporter for MemoryExporter {
    fn export(
        &mut self,
        artifact: &MarkdownArtifact,
    ) -> Result<std::path::PathBuf, readme_composer::composer::ExportError> {
        self.0.push(artifact.clone());
        Ok(std::path::PathBuf::from(artifact.file_name))
    }
}

proptest! {
    #[test]
    fn toggle_twice_restores_markdown(edits in edits(), id in section_id()) {
        let state = apply(&edits);
        let before = state.compose_markdown();
        let after = state.toggle_section(id).toggle_section(id).compose_markdown();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn excluding_removes_exactly_one_block(edits in edits(), id in section_id()) {
        let state = apply(&edits);
        let blocks: Vec<String> = SECTIONS
            .iter()
            .filter(|spec| spec.id != id)
            .map(|spec| block(&state, spec.id))
            .collect();
        let excluded = state.toggle_section(id);
        prop_assert_eq!(excluded.compose_markdown(), blocks.join("\n\n"));
    }

    #[test]
    fn order_follows_table_not_edit_order(edits in edits()) {
        let forward = apply(&edits);
        // Keep the last write per section identical in both orders.
        let mut dedup: Vec<(SectionId, String)> = Vec::new();
        for (id, text) in edits.iter().rev() {
            if !dedup.iter().any(|(seen, _)| seen == id) {
                dedup.push((*id, text.clone()));
            }
        }
        let backward = apply(&dedup);
        prop_assert_eq!(forward.compose_markdown(), backward.compose_markdown());
    }

    #[test]
    fn edit_touches_only_its_section(edits in edits(), id in section_id(), text in section_text()) {
        let state = apply(&edits);
        let edited = state.clone().edit_section(id, text.as_str());
        for spec in &SECTIONS {
            if spec.id == id {
                prop_assert_eq!(edited.text(spec.id), text.as_str());
            } else {
                prop_assert_eq!(edited.text(spec.id), state.text(spec.id));
            }
            prop_assert_eq!(edited.is_included(spec.id), state.is_included(spec.id));
        }
    }

    #[test]
    fn composing_is_idempotent(edits in edits(), hidden in prop::collection::vec(section_id(), 0..5)) {
        let state = hidden.iter().fold(apply(&edits), |s, id| s.set_included(*id, false));
        prop_assert_eq!(state.compose_markdown(), state.compose_markdown());
    }

    #[test]
    fn export_matches_composition(edits in edits(), hidden in prop::collection::vec(section_id(), 0..5)) {
        let state = hidden.iter().fold(apply(&edits), |s, id| s.set_included(*id, false));
        let mut exporter = MemoryExporter(Vec::new());
        export_to_file(&state, &mut exporter).unwrap();
        let markdown = state.compose_markdown();
        prop_assert_eq!(exporter.0.len(), 1);
        prop_assert_eq!(exporter.0[0].text(), markdown.as_str());
        prop_assert_eq!(exporter.0[0].bytes(), markdown.as_bytes());
    }

    #[test]
    fn paragraph_break_inserts_blank_line(text in section_text(), a in 0usize..80, b in 0usize..80) {
        let state = DocumentState::default().edit_section(SectionId::Usage, text.as_str());
        let (next, caret) = state.insert_paragraph_break(SectionId::Usage, a, b);
        let len = text.chars().count();
        let (lo, hi) = (a.min(b).min(len), a.max(b).min(len));
        let expected: String = text
            .chars()
            .take(lo)
            .chain("\n\n".chars())
            .chain(text.chars().skip(hi))
            .collect();
        prop_assert_eq!(next.text(SectionId::Usage), expected.as_str());
        prop_assert_eq!(caret, lo + 2);
    }
}
