use std::ops::Range;

use ropey::Rope;

/// Cursor position in the field editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Editing surface for one section's text.
///
/// The editor is a working copy: after every mutation the caller writes
/// [`FieldEditor::text`] back into the document state. An optional anchor
/// marks the other end of a selection.
pub struct FieldEditor {
    rope: Rope,
    cursor: Cursor,
    anchor: Option<Cursor>,
}

impl FieldEditor {
    /// Create an editor over `text` with the cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            anchor: None,
        }
    }

    /// Create an empty editor.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Total number of lines.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx);
        let s = line.to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Cursor position as a character offset into [`Self::text`].
    pub fn cursor_char_idx(&self) -> usize {
        self.char_idx_of(self.cursor)
    }

    /// Selection as character offsets `(start, end)`, start first.
    ///
    /// Without a selection both ends are the cursor.
    pub fn selection_chars(&self) -> (usize, usize) {
        let cursor = self.cursor_char_idx();
        let anchor = self.anchor.map_or(cursor, |a| self.char_idx_of(a));
        (cursor.min(anchor), cursor.max(anchor))
    }

    /// Whether a non-empty selection exists.
    pub fn has_selection(&self) -> bool {
        let (start, end) = self.selection_chars();
        start != end
    }

    /// Byte range of the selection on one line, if it touches that line.
    pub fn selection_on_line(&self, line_idx: usize) -> Option<Range<usize>> {
        if !self.has_selection() || line_idx >= self.line_count() {
            return None;
        }
        let (start, end) = self.selection_chars();
        let line = self.line_at(line_idx)?;
        let line_start = self.rope.line_to_char(line_idx);
        let line_end = line_start + line.chars().count();
        if end <= line_start || start > line_end {
            return None;
        }
        let from = start.saturating_sub(line_start).min(line.chars().count());
        let to = end.saturating_sub(line_start).min(line.chars().count());
        Some(char_to_byte(&line, from)..char_to_byte(&line, to))
    }

    /// Start a selection at the cursor unless one is already open.
    pub const fn begin_selection(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.cursor);
        }
    }

    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Select the whole text, leaving the cursor at the end.
    pub fn select_all(&mut self) {
        self.anchor = Some(Cursor::new());
        self.move_to_end();
    }

    /// Insert a character at the cursor, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        self.delete_selection();
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        if ch == '\n' {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        } else {
            self.cursor.set_col(self.cursor.col + ch.len_utf8());
        }
    }

    /// Insert a string at the cursor, replacing any selection.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        if s.is_empty() {
            return;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, s);
        self.move_to_char(char_idx + s.chars().count());
    }

    /// Delete the selection, or the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let char_idx = self.cursor_char_idx();
        if char_idx == 0 {
            return false;
        }
        self.rope.remove(char_idx - 1..char_idx);
        self.move_to_char(char_idx - 1);
        true
    }

    /// Delete the selection, or the character at the cursor (Delete).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let char_idx = self.cursor_char_idx();
        if char_idx >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(char_idx..=char_idx);
        true
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = &line[..self.cursor.col];
        let trimmed = before.trim_end();

        if trimmed.is_empty() {
            self.cursor.set_col(0);
            return;
        }

        let pos = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + 1);
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];

        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());

        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());

        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }

    /// Move cursor to a specific line and column.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let max_col = self.line_len(self.cursor.line);
        self.cursor.set_col(col.min(max_col));
    }

    /// Move cursor to a character offset, clamped to the text.
    pub fn move_to_char(&mut self, char_idx: usize) {
        let char_idx = char_idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        let col: usize = self
            .rope
            .line(line)
            .chars()
            .take(char_idx - line_start)
            .map(char::len_utf8)
            .sum();
        self.cursor.line = line;
        self.cursor.set_col(col);
    }

    /// Move cursor to the start of the text (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the text (Ctrl+End).
    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    // --- Private helpers ---

    fn char_idx_of(&self, cursor: Cursor) -> usize {
        let line_idx = cursor.line.min(self.rope.len_lines().saturating_sub(1));
        let line_start = self.rope.line_to_char(line_idx);
        let line = self.line_at(line_idx).unwrap_or_default();
        let byte_col = cursor.col.min(line.len());
        line_start + line[..byte_col].chars().count()
    }

    fn delete_selection(&mut self) -> bool {
        let (start, end) = self.selection_chars();
        self.anchor = None;
        if start == end {
            return false;
        }
        self.rope.remove(start..end);
        self.move_to_char(start);
        true
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.col = self.clamp_to_char_boundary(self.cursor.line, self.cursor.col_memory);
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.col = self.clamp_to_char_boundary(self.cursor.line, self.cursor.col_memory);
        }
    }

    fn clamp_to_char_boundary(&self, line_idx: usize, col: usize) -> usize {
        let line = self.line_at(line_idx).unwrap_or_default();
        let mut col = col.min(line.len());
        while !line.is_char_boundary(col) {
            col -= 1;
        }
        col
    }
}

fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte_idx, _)| byte_idx)
}

impl Default for FieldEditor {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for FieldEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldEditor")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_editor_has_one_line() {
        let ed = FieldEditor::empty();
        assert_eq!(ed.line_count(), 1);
        assert_eq!(ed.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_from_text_preserves_content() {
        let ed = FieldEditor::from_text("hello\nworld");
        assert_eq!(ed.line_count(), 2);
        assert_eq!(ed.line_at(0), Some("hello".to_string()));
        assert_eq!(ed.line_at(1), Some("world".to_string()));
        assert_eq!(ed.text(), "hello\nworld");
    }

    #[test]
    fn test_trailing_spaces_survive() {
        let ed = FieldEditor::from_text("- [ ] Refactor code \n");
        assert_eq!(ed.text(), "- [ ] Refactor code \n");
        assert_eq!(ed.line_count(), 2);
    }

    // --- Insertion ---

    #[test]
    fn test_insert_char_in_middle() {
        let mut ed = FieldEditor::from_text("hllo");
        ed.move_cursor(Direction::Right);
        ed.insert_char('e');
        assert_eq!(ed.text(), "hello");
        assert_eq!(ed.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut ed = FieldEditor::from_text("caf");
        ed.move_end();
        ed.insert_char('é');
        assert_eq!(ed.text(), "café");
        assert_eq!(ed.cursor().col, 5);
    }

    #[test]
    fn test_insert_newline_moves_to_next_line() {
        let mut ed = FieldEditor::from_text("ab");
        ed.move_to(0, 1);
        ed.insert_char('\n');
        assert_eq!(ed.text(), "a\nb");
        assert_eq!(ed.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_insert_str_multiline_places_cursor_after() {
        let mut ed = FieldEditor::from_text("ad");
        ed.move_to(0, 1);
        ed.insert_str("b\nc");
        assert_eq!(ed.text(), "ab\ncd");
        assert_eq!(ed.cursor(), Cursor::at(1, 1));
    }

    // --- Deletion ---

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut ed = FieldEditor::from_text("hello");
        assert!(!ed.delete_back());
        assert_eq!(ed.text(), "hello");
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut ed = FieldEditor::from_text("hello\nworld");
        ed.move_to(1, 0);
        assert!(ed.delete_back());
        assert_eq!(ed.text(), "helloworld");
        assert_eq!(ed.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut ed = FieldEditor::from_text("café");
        ed.move_end();
        ed.delete_back();
        assert_eq!(ed.text(), "caf");
        assert_eq!(ed.cursor().col, 3);
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut ed = FieldEditor::from_text("hello");
        ed.move_end();
        assert!(!ed.delete_forward());
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut ed = FieldEditor::from_text("hello\nworld");
        ed.move_to(0, 5);
        ed.delete_forward();
        assert_eq!(ed.text(), "helloworld");
        assert_eq!(ed.cursor(), Cursor::at(0, 5));
    }

    // --- Movement ---

    #[test]
    fn test_move_left_wraps_to_prev_line() {
        let mut ed = FieldEditor::from_text("hello\nworld");
        ed.move_to(1, 0);
        ed.move_cursor(Direction::Left);
        assert_eq!(ed.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_right_wraps_to_next_line() {
        let mut ed = FieldEditor::from_text("hello\nworld");
        ed.move_to(0, 5);
        ed.move_cursor(Direction::Right);
        assert_eq!(ed.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_column_memory_across_short_line() {
        let mut ed = FieldEditor::from_text("hello\nhi\nworld");
        ed.move_to(0, 4);
        ed.move_cursor(Direction::Down);
        assert_eq!(ed.cursor().col, 2);
        ed.move_cursor(Direction::Down);
        assert_eq!(ed.cursor().line, 2);
        assert_eq!(ed.cursor().col, 4);
    }

    #[test]
    fn test_vertical_move_lands_on_char_boundary() {
        let mut ed = FieldEditor::from_text("abcd\néé");
        ed.move_to(0, 3);
        ed.move_cursor(Direction::Down);
        assert_eq!(ed.cursor().line, 1);
        assert_eq!(ed.cursor().col, 2);
    }

    #[test]
    fn test_word_movement() {
        let mut ed = FieldEditor::from_text("hello world");
        ed.move_word_right();
        assert_eq!(ed.cursor().col, 6);
        ed.move_to(0, 8);
        ed.move_word_left();
        assert_eq!(ed.cursor().col, 6);
    }

    #[test]
    fn test_move_to_end_and_start() {
        let mut ed = FieldEditor::from_text("hello\nworld");
        ed.move_to_end();
        assert_eq!(ed.cursor(), Cursor::at(1, 5));
        ed.move_to_start();
        assert_eq!(ed.cursor(), Cursor::at(0, 0));
    }

    // --- Character offsets ---

    #[test]
    fn test_cursor_char_idx_counts_chars() {
        let mut ed = FieldEditor::from_text("café\nau lait");
        ed.move_to(1, 2);
        assert_eq!(ed.cursor_char_idx(), 7);
    }

    #[test]
    fn test_move_to_char_round_trips_cursor() {
        let mut ed = FieldEditor::from_text("café\nau lait");
        ed.move_to_char(4);
        assert_eq!(ed.cursor(), Cursor::at(0, 5));
        ed.move_to_char(5);
        assert_eq!(ed.cursor(), Cursor::at(1, 0));
        ed.move_to_char(100);
        assert_eq!(ed.cursor(), Cursor::at(1, 7));
    }

    // --- Selection ---

    #[test]
    fn test_selection_chars_orders_ends() {
        let mut ed = FieldEditor::from_text("hello world");
        ed.move_to(0, 8);
        ed.begin_selection();
        ed.move_to(0, 2);
        assert_eq!(ed.selection_chars(), (2, 8));
        assert!(ed.has_selection());
    }

    #[test]
    fn test_no_selection_collapses_to_cursor() {
        let mut ed = FieldEditor::from_text("hello");
        ed.move_to(0, 3);
        assert_eq!(ed.selection_chars(), (3, 3));
        assert!(!ed.has_selection());
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut ed = FieldEditor::from_text("hello world");
        ed.move_to(0, 6);
        ed.begin_selection();
        ed.move_end();
        ed.insert_char('X');
        assert_eq!(ed.text(), "hello X");
        assert!(!ed.has_selection());
    }

    #[test]
    fn test_backspace_deletes_multiline_selection() {
        let mut ed = FieldEditor::from_text("one\ntwo\nthree");
        ed.move_to(0, 1);
        ed.begin_selection();
        ed.move_to(2, 2);
        assert!(ed.delete_back());
        assert_eq!(ed.text(), "oree");
        assert_eq!(ed.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_select_all() {
        let mut ed = FieldEditor::from_text("ab\ncd");
        ed.select_all();
        assert_eq!(ed.selection_chars(), (0, 5));
    }

    #[test]
    fn test_selection_on_line_spans() {
        let mut ed = FieldEditor::from_text("one\ntwo\nthree");
        ed.move_to(0, 1);
        ed.begin_selection();
        ed.move_to(2, 2);
        assert_eq!(ed.selection_on_line(0), Some(1..3));
        assert_eq!(ed.selection_on_line(1), Some(0..3));
        assert_eq!(ed.selection_on_line(2), Some(0..2));
    }

    #[test]
    fn test_selection_on_line_outside_is_none() {
        let mut ed = FieldEditor::from_text("one\ntwo\nthree");
        ed.move_to(0, 0);
        ed.begin_selection();
        ed.move_to(0, 2);
        assert_eq!(ed.selection_on_line(0), Some(0..2));
        assert_eq!(ed.selection_on_line(1), None);
    }

    #[test]
    fn test_clear_selection() {
        let mut ed = FieldEditor::from_text("hello");
        ed.begin_selection();
        ed.move_end();
        ed.clear_selection();
        assert!(!ed.has_selection());
    }
}
