//! Inline text field for custom time entry

/// Longest input worth keeping; anything valid fits well within it
const MAX_INPUT_LEN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimePrompt {
    open: bool,
    buffer: String,
    error: Option<String>,
}

impl TimePrompt {
    pub fn open(&mut self) {
        self.open = true;
        self.buffer.clear();
        self.error = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.buffer.clear();
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn push(&mut self, c: char) {
        if self.buffer.chars().count() < MAX_INPUT_LEN && !c.is_control() {
            self.buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn input(&self) -> &str {
        &self.buffer
    }

    /// Keep the prompt open and show why the entry was rejected
    pub fn reject(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut prompt = TimePrompt::default();
        assert!(!prompt.is_open());

        prompt.open();
        for c in "02:301234".chars() {
            prompt.push(c);
        }
        assert_eq!(prompt.input(), "02:30123");

        prompt.backspace();
        prompt.backspace();
        prompt.backspace();
        assert_eq!(prompt.input(), "02:30");

        prompt.reject("bad".to_string());
        assert_eq!(prompt.error(), Some("bad"));

        prompt.open();
        assert_eq!(prompt.input(), "");
        assert_eq!(prompt.error(), None);
    }
}
