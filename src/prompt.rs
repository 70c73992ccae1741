//! Collaborators the editor asks for input.

/// Supplies the DDL text when a diagram is generated.
pub trait TextSource {
    fn read_text(&self) -> String;
}

impl TextSource for str {
    fn read_text(&self) -> String {
        self.to_string()
    }
}

impl TextSource for String {
    fn read_text(&self) -> String {
        self.clone()
    }
}

/// Asks the user to accept or reject an action.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

/// A fixed answer.
impl Confirm for bool {
    fn confirm(&mut self, _message: &str) -> bool {
        *self
    }
}

/// Asks the user for a line of text; `None` means the prompt was cancelled.
pub trait TextPrompt {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
}

/// A fixed answer, `None` behaving like a cancelled prompt.
impl TextPrompt for Option<String> {
    fn prompt(&mut self, _message: &str, _default: &str) -> Option<String> {
        self.clone()
    }
}
