//! Printing trees back to text
//!
//! Parsed trees print byte for byte. Synthesized tokens carry elastic
//! trivia, which resolves to one space only where no whitespace is adjacent.

use super::expr::{Expr, ExprKind};
use super::stmt::{Stmt, StmtKind};
use super::token::Token;
use super::trivia::{Trivia, TriviaPiece};
use super::NodeId;
use std::collections::HashMap;

/// Byte range in printed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains_range(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Printed text plus the span of every node.
///
/// A span covers the node's tokens, without its outer leading and
/// trailing trivia.
#[derive(Debug, Clone, Default)]
pub struct Printed {
    pub text: String,
    pub spans: HashMap<NodeId, TextRange>,
}

impl Printed {
    pub fn span(&self, id: NodeId) -> Option<TextRange> {
        self.spans.get(&id).copied()
    }

    pub fn slice(&self, range: TextRange) -> &str {
        &self.text[range.start..range.end]
    }
}

#[derive(Default)]
pub(crate) struct Printer {
    out: String,
    spans: HashMap<NodeId, TextRange>,
    token_ranges: Vec<TextRange>,
    pending_elastic: bool,
}

impl Printer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn finish(self) -> Printed {
        Printed {
            text: self.out,
            spans: self.spans,
        }
    }

    fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if std::mem::take(&mut self.pending_elastic) {
            let starts_ws = text.starts_with(char::is_whitespace);
            let ends_ws = self.out.is_empty() || self.out.ends_with(char::is_whitespace);
            if !starts_ws && !ends_ws {
                self.out.push(' ');
            }
        }
        self.out.push_str(text);
    }

    pub(crate) fn trivia(&mut self, trivia: &Trivia) {
        for piece in trivia.pieces() {
            match piece {
                TriviaPiece::Elastic => self.pending_elastic = true,
                other => self.write(other.text()),
            }
        }
    }

    pub(crate) fn token(&mut self, token: &Token) {
        self.trivia(token.leading());
        self.write(token.text());
        let end = self.out.len();
        self.token_ranges.push(TextRange {
            start: end - token.text().len(),
            end,
        });
        self.trivia(token.trailing());
    }

    fn record(&mut self, id: NodeId, first_token: usize) {
        if let (Some(first), Some(last)) =
            (self.token_ranges.get(first_token), self.token_ranges.last())
        {
            self.spans.insert(
                id,
                TextRange {
                    start: first.start,
                    end: last.end,
                },
            );
        }
    }

    pub(crate) fn expr(&mut self, expr: &Expr) {
        let first = self.token_ranges.len();
        match expr.kind() {
            ExprKind::Logical(l) => {
                self.expr(&l.left);
                self.token(&l.operator);
                self.expr(&l.right);
            }
            ExprKind::Parenthesized(p) => {
                self.token(&p.open);
                self.expr(&p.inner);
                self.token(&p.close);
            }
            ExprKind::Opaque(o) => {
                for token in &o.tokens {
                    self.token(token);
                }
            }
        }
        self.record(expr.id(), first);
    }

    pub(crate) fn stmt(&mut self, stmt: &Stmt) {
        let first = self.token_ranges.len();
        match stmt.kind() {
            StmtKind::Block(b) => {
                self.token(&b.open);
                for s in &b.statements {
                    self.stmt(s);
                }
                self.token(&b.close);
            }
            StmtKind::If(s) => {
                self.token(&s.if_token);
                self.token(&s.open_paren);
                self.expr(&s.condition);
                self.token(&s.close_paren);
                self.stmt(&s.body);
                if let Some(e) = &s.else_clause {
                    self.token(&e.else_token);
                    self.stmt(&e.body);
                }
            }
            StmtKind::While(s) => {
                self.token(&s.while_token);
                self.token(&s.open_paren);
                self.expr(&s.condition);
                self.token(&s.close_paren);
                self.stmt(&s.body);
            }
            StmtKind::Opaque(o) => {
                for token in &o.tokens {
                    self.token(token);
                }
            }
        }
        self.record(stmt.id(), first);
    }
}

/// Print an expression and record node spans
pub fn print_expr(expr: &Expr) -> Printed {
    let mut printer = Printer::new();
    printer.expr(expr);
    printer.finish()
}

/// Print a statement and record node spans
pub fn print_stmt(stmt: &Stmt) -> Printed {
    let mut printer = Printer::new();
    printer.stmt(stmt);
    printer.finish()
}
