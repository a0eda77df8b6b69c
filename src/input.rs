use unicode_width::UnicodeWidthStr;

/// Editable text with a cursor counted in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    /// Zero-based (line, column) of the cursor.
    pub fn line_col(&self) -> (usize, usize) {
        let before: String = self.text.chars().take(self.cursor).collect();
        let line = before.matches('\n').count();
        let col = before.rsplit('\n').next().map_or(0, |l| l.chars().count());
        (line, col)
    }

    /// Terminal columns from the start of the cursor's line to the cursor. Hangul
    /// and other wide characters take two.
    pub fn cursor_width(&self) -> usize {
        let before: String = self.text.chars().take(self.cursor).collect();
        before.rsplit('\n').next().map_or(0, UnicodeWidthStr::width)
    }

    fn line_lengths(&self) -> Vec<usize> {
        self.text.split('\n').map(|l| l.chars().count()).collect()
    }

    fn move_to(&mut self, line: usize, col: usize) {
        let lengths = self.line_lengths();
        let col = col.min(lengths[line]);
        self.cursor = lengths[..line].iter().map(|len| len + 1).sum::<usize>() + col;
    }

    pub fn up(&mut self) {
        let (line, col) = self.line_col();
        if line > 0 {
            self.move_to(line - 1, col);
        }
    }

    pub fn down(&mut self) {
        let (line, col) = self.line_col();
        if line + 1 < self.line_lengths().len() {
            self.move_to(line + 1, col);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_end() {
        let input = TextInput::new("abc");
        assert_eq!(input.line_col(), (0, 3));
    }

    #[test]
    fn insert_and_backspace_multibyte() {
        let mut input = TextInput::new("완료");
        input.left();
        input.insert('x');
        assert_eq!(input.text(), "완x료");
        input.backspace();
        input.backspace();
        assert_eq!(input.text(), "료");
        input.backspace();
        assert_eq!(input.text(), "료");
    }

    #[test]
    fn right_stops_at_end() {
        let mut input = TextInput::new("ab");
        input.right();
        assert_eq!(input.line_col(), (0, 2));
    }

    #[test]
    fn line_col_and_vertical_moves() {
        let mut input = TextInput::new("first line\nab\nthird");
        assert_eq!(input.line_col(), (2, 5));
        input.up();
        assert_eq!(input.line_col(), (1, 2));
        input.up();
        assert_eq!(input.line_col(), (0, 2));
        input.up();
        assert_eq!(input.line_col(), (0, 2));
        input.down();
        input.down();
        assert_eq!(input.line_col(), (2, 2));
        input.down();
        assert_eq!(input.line_col(), (2, 2));
    }

    #[test]
    fn newline_insert_moves_to_next_line() {
        let mut input = TextInput::new("ab");
        input.insert('\n');
        assert_eq!(input.line_col(), (1, 0));
        assert_eq!(input.text(), "ab\n");
    }

    #[test]
    fn cursor_width_counts_wide_chars_twice() {
        let mut input = TextInput::new("ab\n진행중");
        assert_eq!(input.line_col(), (1, 3));
        assert_eq!(input.cursor_width(), 6);
        input.left();
        assert_eq!(input.cursor_width(), 4);
        input.up();
        assert_eq!(input.cursor_width(), 2);
    }
}
