//! Trivia: whitespace, line breaks and comments attached to tokens

use std::fmt;

/// A single piece of trivia
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaPiece {
    /// Spaces and tabs
    Whitespace(String),

    /// `\n`, `\r\n` or `\r`
    EndOfLine(String),

    /// `// ...` or `/* ... */`
    Comment(String),

    /// Separator carried by synthesized tokens.
    ///
    /// Prints as a single space unless whitespace is already adjacent.
    Elastic,
}

impl TriviaPiece {
    pub fn is_whitespace(&self) -> bool {
        matches!(
            self,
            TriviaPiece::Whitespace(_) | TriviaPiece::EndOfLine(_) | TriviaPiece::Elastic
        )
    }

    /// Source text of the piece (`Elastic` has none of its own)
    pub fn text(&self) -> &str {
        match self {
            TriviaPiece::Whitespace(s) | TriviaPiece::EndOfLine(s) | TriviaPiece::Comment(s) => s,
            TriviaPiece::Elastic => "",
        }
    }
}

/// Ordered trivia attached to one side of a token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trivia {
    pieces: Vec<TriviaPiece>,
}

impl Trivia {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single elastic separator
    pub fn elastic() -> Self {
        Self {
            pieces: vec![TriviaPiece::Elastic],
        }
    }

    pub fn from_pieces(pieces: Vec<TriviaPiece>) -> Self {
        Self { pieces }
    }

    /// Lex raw source text into trivia.
    ///
    /// Returns `None` if the text holds anything besides whitespace and comments.
    pub fn lex(text: &str) -> Option<Trivia> {
        let mut pieces = Vec::new();
        let mut rest = text;

        while !rest.is_empty() {
            let (piece, len) = if let Some(stripped) = rest.strip_prefix("//") {
                let len = 2 + stripped.find(['\r', '\n']).unwrap_or(stripped.len());
                (TriviaPiece::Comment(rest[..len].to_string()), len)
            } else if let Some(stripped) = rest.strip_prefix("/*") {
                let len = 2 + stripped.find("*/")? + 2;
                (TriviaPiece::Comment(rest[..len].to_string()), len)
            } else if rest.starts_with("\r\n") {
                (TriviaPiece::EndOfLine("\r\n".to_string()), 2)
            } else if rest.starts_with(['\n', '\r']) {
                (TriviaPiece::EndOfLine(rest[..1].to_string()), 1)
            } else {
                let len = rest
                    .find(|c: char| !c.is_whitespace() || c == '\n' || c == '\r')
                    .unwrap_or(rest.len());
                if len == 0 {
                    return None;
                }
                (TriviaPiece::Whitespace(rest[..len].to_string()), len)
            };
            pieces.push(piece);
            rest = &rest[len..];
        }

        Some(Trivia { pieces })
    }

    /// Split lexed gap trivia between two tokens.
    ///
    /// Everything up to and including the first line break trails the
    /// previous token; the rest leads the next one.
    pub fn split_gap(self) -> (Trivia, Trivia) {
        match self
            .pieces
            .iter()
            .position(|p| matches!(p, TriviaPiece::EndOfLine(_)))
        {
            Some(eol) => {
                let mut trailing = self.pieces;
                let leading = trailing.split_off(eol + 1);
                (Trivia::from_pieces(trailing), Trivia::from_pieces(leading))
            }
            None => (self, Trivia::empty()),
        }
    }

    /// Without whitespace at the end.
    ///
    /// A `//` comment keeps the line break that ends it.
    pub fn trim_end(&self) -> Trivia {
        let mut keep = self
            .pieces
            .iter()
            .rposition(|p| !p.is_whitespace())
            .map_or(0, |i| i + 1);
        if let (Some(TriviaPiece::Comment(c)), Some(TriviaPiece::EndOfLine(_))) =
            (keep.checked_sub(1).and_then(|i| self.pieces.get(i)), self.pieces.get(keep))
        {
            if c.starts_with("//") {
                keep += 1;
            }
        }
        Trivia::from_pieces(self.pieces[..keep].to_vec())
    }

    /// This trivia followed by `other`
    pub fn concat(&self, other: &Trivia) -> Trivia {
        let mut pieces = self.pieces.clone();
        pieces.extend(other.pieces.iter().cloned());
        Trivia::from_pieces(pieces)
    }

    /// The line break this trivia ends with
    pub fn line_break(&self) -> Option<&str> {
        match self.pieces.last() {
            Some(TriviaPiece::EndOfLine(eol)) => Some(eol),
            _ => None,
        }
    }

    /// Whitespace at the start of the last line
    pub fn indentation(&self) -> &str {
        let line_start = self
            .pieces
            .iter()
            .rposition(|p| matches!(p, TriviaPiece::EndOfLine(_)))
            .map_or(0, |i| i + 1);
        match self.pieces.get(line_start) {
            Some(TriviaPiece::Whitespace(ws)) => ws,
            _ => "",
        }
    }

    /// Spaces or tabs; nothing for empty text
    pub fn whitespace(text: &str) -> Self {
        if text.is_empty() {
            return Self::empty();
        }
        Self::from_pieces(vec![TriviaPiece::Whitespace(text.to_string())])
    }

    pub fn end_of_line(eol: &str) -> Self {
        Self::from_pieces(vec![TriviaPiece::EndOfLine(eol.to_string())])
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn has_comments(&self) -> bool {
        self.pieces
            .iter()
            .any(|p| matches!(p, TriviaPiece::Comment(_)))
    }
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            match piece {
                TriviaPiece::Elastic => write!(f, " ")?,
                other => write!(f, "{}", other.text())?,
            }
        }
        Ok(())
    }
}
