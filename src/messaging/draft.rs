/// The in-progress, unsent message for the active contact.
///
/// `cursor` is a byte offset that always sits on a char boundary.
#[derive(Debug, Default)]
pub struct Draft {
    pub text: String,
    pub cursor: usize,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole draft and move the cursor to the end.
    pub fn compose(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clear the draft. Nothing is delivered: there is no transport behind
    /// the message view. Returns the cleared text, or `None` when the draft
    /// was already empty.
    pub fn send(&mut self) -> Option<String> {
        if self.text.is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        Some(text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.next_boundary();
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.next_boundary();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let before = &self.text[..self.cursor];
        let trimmed = before.trim_end_matches(' ');
        let start = trimmed.rfind(' ').map(|i| i + 1).unwrap_or(0);
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Display width of the text left of the cursor.
    pub fn cursor_width(&self) -> usize {
        unicode_width::UnicodeWidthStr::width(&self.text[..self.cursor])
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_empty_draft_is_noop() {
        let mut draft = Draft::new();
        assert_eq!(draft.send(), None);
        assert!(draft.is_empty());
        assert_eq!(draft.cursor, 0);
    }

    #[test]
    fn test_send_clears_draft() {
        let mut draft = Draft::new();
        draft.compose("See you Tuesday");
        assert_eq!(draft.send().as_deref(), Some("See you Tuesday"));
        assert!(draft.is_empty());
        assert_eq!(draft.cursor, 0);
    }

    #[test]
    fn test_editing_multibyte() {
        let mut draft = Draft::new();
        for c in "café".chars() {
            draft.insert_char(c);
        }
        draft.delete_back();
        assert_eq!(draft.text, "caf");
        draft.insert_char('é');
        draft.move_left();
        draft.move_left();
        draft.delete_forward();
        assert_eq!(draft.text, "caé");
        draft.move_end();
        assert_eq!(draft.cursor, draft.text.len());
        draft.move_home();
        draft.move_right();
        assert_eq!(draft.cursor, 1);
    }

    #[test]
    fn test_delete_word_back() {
        let mut draft = Draft::new();
        draft.compose("need a refill  ");
        draft.delete_word_back();
        assert_eq!(draft.text, "need a ");
        draft.delete_word_back();
        assert_eq!(draft.text, "need ");
        draft.delete_word_back();
        assert_eq!(draft.text, "");
        draft.delete_word_back();
        assert_eq!(draft.cursor, 0);
    }

    #[test]
    fn test_cursor_width() {
        let mut draft = Draft::new();
        draft.compose("ab");
        assert_eq!(draft.cursor_width(), 2);
    }
}
