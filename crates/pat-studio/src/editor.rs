//! The editable source buffer.

/// Line-oriented editor buffer with a byte-indexed cursor.
#[derive(Clone, Debug, Default)]
pub struct EditorBuffer {
    /// Lines of text, always at least one.
    lines: Vec<String>,
    /// Cursor row (line index).
    row: usize,
    /// Cursor column (byte position within line).
    col: usize,
}

impl EditorBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }

    /// Create a buffer with initial content, cursor at the start.
    pub fn with_content(content: &str) -> Self {
        let lines: Vec<String> = content.lines().map(|s| s.to_string()).collect();
        let lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        Self {
            lines,
            row: 0,
            col: 0,
        }
    }

    /// The buffer text in its canonical form: lines joined by `\n` with a
    /// terminal newline. Every consumer of the buffer - highlighter, gutter,
    /// pipeline - sees this same text, so the newline count equals the
    /// number of lines.
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// Lines for rendering.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Check if the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Current cursor position (row, byte column).
    pub fn cursor_pos(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Cursor column as a character count for display.
    pub fn cursor_display_col(&self) -> usize {
        self.lines[self.row][..self.col].chars().count()
    }

    // ========================================================================
    // Cursor movement
    // ========================================================================

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.clamp_col();
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.clamp_col();
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            let line = &self.lines[self.row];
            if let Some((i, _)) = line[..self.col].char_indices().next_back() {
                self.col = i;
            }
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.lines[self.row].len();
        }
    }

    pub fn move_right(&mut self) {
        let line = &self.lines[self.row];
        if self.col < line.len() {
            if let Some(c) = line[self.col..].chars().next() {
                self.col += c.len_utf8();
            }
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_to_line_start(&mut self) {
        self.col = 0;
    }

    pub fn move_to_line_end(&mut self) {
        self.col = self.lines[self.row].len();
    }

    fn clamp_col(&mut self) {
        let line = &self.lines[self.row];
        self.col = self.col.min(line.len());
        // Land on a character boundary after moving between lines.
        while self.col > 0 && !line.is_char_boundary(self.col) {
            self.col -= 1;
        }
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.lines[self.row].insert(self.col, c);
        self.col += c.len_utf8();
    }

    /// Insert a string at the cursor (may contain newlines).
    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            if c == '\n' {
                self.insert_newline();
            } else {
                self.insert_char(c);
            }
        }
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let current = &mut self.lines[self.row];
        let rest = current[self.col..].to_string();
        current.truncate(self.col);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    /// Delete the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            if let Some((i, _)) = line[..self.col].char_indices().next_back() {
                line.remove(i);
                self.col = i;
            }
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.lines[self.row].len();
            self.lines[self.row].push_str(&current);
        }
    }

    /// Delete the character at the cursor, joining lines at line end.
    pub fn delete(&mut self) {
        let line = &self.lines[self.row];
        if self.col < line.len() {
            self.lines[self.row].remove(self.col);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    /// Replace the whole buffer, cursor to the start.
    pub fn replace(&mut self, content: &str) {
        *self = Self::with_content(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_has_one_line_and_terminal_newline() {
        let buffer = EditorBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.text(), "\n");
    }

    #[test]
    fn text_ends_with_terminal_newline() {
        let buffer = EditorBuffer::with_content("plot 1:\nplot 2:");
        assert_eq!(buffer.text(), "plot 1:\nplot 2:\n");
    }

    #[test]
    fn insert_and_split_lines() {
        let mut buffer = EditorBuffer::new();
        buffer.insert_str("plot 1:");
        buffer.insert_newline();
        buffer.insert_str("plot 2:");
        assert_eq!(buffer.lines(), &["plot 1:", "plot 2:"]);
        assert_eq!(buffer.cursor_pos(), (1, 7));
    }

    #[test]
    fn backspace_joins_lines_at_column_zero() {
        let mut buffer = EditorBuffer::with_content("ab\ncd");
        buffer.move_down();
        buffer.backspace();
        assert_eq!(buffer.lines(), &["abcd"]);
        assert_eq!(buffer.cursor_pos(), (0, 2));
    }

    #[test]
    fn delete_joins_lines_at_line_end() {
        let mut buffer = EditorBuffer::with_content("ab\ncd");
        buffer.move_to_line_end();
        buffer.delete();
        assert_eq!(buffer.lines(), &["abcd"]);
    }

    #[test]
    fn movement_clamps_to_shorter_lines() {
        let mut buffer = EditorBuffer::with_content("long line\nab");
        buffer.move_to_line_end();
        buffer.move_down();
        assert_eq!(buffer.cursor_pos(), (1, 2));
    }

    #[test]
    fn multibyte_characters_move_by_whole_chars() {
        let mut buffer = EditorBuffer::new();
        buffer.insert_str("aé");
        assert_eq!(buffer.cursor_pos(), (0, 3));
        buffer.move_left();
        assert_eq!(buffer.cursor_pos(), (0, 1));
        buffer.move_right();
        assert_eq!(buffer.cursor_pos(), (0, 3));
        buffer.backspace();
        assert_eq!(buffer.lines(), &["a"]);
    }

    #[test]
    fn replace_swaps_content_and_resets_cursor() {
        let mut buffer = EditorBuffer::with_content("old");
        buffer.move_to_line_end();
        buffer.replace("new text\nhere");
        assert_eq!(buffer.lines(), &["new text", "here"]);
        assert_eq!(buffer.cursor_pos(), (0, 0));
    }
}
