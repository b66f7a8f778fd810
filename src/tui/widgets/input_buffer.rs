//! Single-line text input backing the sidebar search box.
//!
//! The cursor is tracked as a byte offset that always sits on a char
//! boundary; [`InputBuffer::cursor_column`] converts it for rendering.

use crossterm::event::KeyCode;

/// Result of feeding a key to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Text changed; the query must be re-derived.
    Edited,
    /// Only the cursor moved.
    Moved,
    /// Key is not an editing key.
    Ignored,
}

/// Text input buffer with cursor positioning.
#[derive(Debug, Default)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an editing or movement key.
    pub fn handle_key(&mut self, code: KeyCode) -> InputOutcome {
        match code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                InputOutcome::Edited
            }
            KeyCode::Backspace => self.edited_if(Self::backspace),
            KeyCode::Delete => self.edited_if(Self::delete),
            KeyCode::Left => {
                self.move_left();
                InputOutcome::Moved
            }
            KeyCode::Right => {
                self.move_right();
                InputOutcome::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputOutcome::Moved
            }
            KeyCode::End => {
                self.cursor = self.content.len();
                InputOutcome::Moved
            }
            _ => InputOutcome::Ignored,
        }
    }

    fn edited_if(&mut self, op: fn(&mut Self) -> bool) -> InputOutcome {
        if op(self) {
            InputOutcome::Edited
        } else {
            InputOutcome::Moved
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the char before the cursor. Returns whether text changed.
    pub fn backspace(&mut self) -> bool {
        let Some(prev) = self.prev_boundary() else {
            return false;
        };
        self.content.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Remove the char under the cursor. Returns whether text changed.
    pub fn delete(&mut self) -> bool {
        let Some(next) = self.next_boundary() else {
            return false;
        };
        self.content.drain(self.cursor..next);
        true
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.content[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    /// Cursor position in chars, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.content[..self.cursor].chars().count()
    }
}
