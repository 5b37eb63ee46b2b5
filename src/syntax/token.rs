//! Tokens with attached trivia

use super::trivia::Trivia;

/// A token: source text plus leading and trailing trivia
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    leading: Trivia,
    trailing: Trivia,
}

impl Token {
    /// Token without trivia
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            leading: Trivia::empty(),
            trailing: Trivia::empty(),
        }
    }

    pub fn with_trivia(text: impl Into<String>, leading: Trivia, trailing: Trivia) -> Self {
        Self {
            text: text.into(),
            leading,
            trailing,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn leading(&self) -> &Trivia {
        &self.leading
    }

    pub fn trailing(&self) -> &Trivia {
        &self.trailing
    }

    pub fn with_leading(mut self, leading: Trivia) -> Self {
        self.leading = leading;
        self
    }

    pub fn with_trailing(mut self, trailing: Trivia) -> Self {
        self.trailing = trailing;
        self
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn set_leading(&mut self, leading: Trivia) {
        self.leading = leading;
    }

    pub(crate) fn set_trailing(&mut self, trailing: Trivia) {
        self.trailing = trailing;
    }
}
