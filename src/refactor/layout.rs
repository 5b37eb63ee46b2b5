//! Line layout of the nested conditional
//!
//! A body written on one line gets elastic separators. A body whose braces
//! or statement sit on lines of their own gets the new `if` and braces on
//! lines of their own too, indented like the code around them.

use crate::syntax::{BlockStmt, Expr, IfStmt, Stmt, StmtKind, Token, Trivia};

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Lines {
    eol: String,
    /// Indentation of the braces wrapping a moved statement
    outer: String,
    /// Indentation of the nested `if`
    inner: String,
    /// Added in front of a statement moved under the nested `if`
    step: String,
    /// `{` on a line of its own
    brace_line: bool,
}

impl Lines {
    /// Layout inside a block whose braces both end a line
    pub(super) fn for_block(header_end: &Token, block: &BlockStmt) -> Option<Self> {
        let eol = block.open.trailing().line_break()?;
        let closes_line = block
            .statements
            .last()
            .map_or(true, |s| s.trailing_trivia().line_break().is_some());
        if !closes_line {
            return None;
        }

        let outer = block.close.leading().indentation().to_string();
        let inner = match block.statements.first() {
            Some(first) => first.leading_trivia().indentation().to_string(),
            None => format!("{outer}{INDENT}"),
        };
        Some(Self {
            eol: eol.to_string(),
            outer,
            inner,
            step: INDENT.to_string(),
            brace_line: header_end.trailing().line_break().is_some(),
        })
    }

    /// Layout around a single statement written on the line below its header
    pub(super) fn for_embedded(statement: &Stmt, header_end: &Token, body: &Stmt) -> Option<Self> {
        let eol = header_end.trailing().line_break()?;
        if body.leading_trivia().has_comments() {
            return None;
        }

        let outer = statement.leading_trivia().indentation().to_string();
        let step = match body.leading_trivia().indentation().strip_prefix(outer.as_str()) {
            Some(step) if !step.is_empty() => step.to_string(),
            _ => INDENT.to_string(),
        };
        Some(Self {
            eol: eol.to_string(),
            inner: format!("{outer}{step}"),
            outer,
            step,
            brace_line: true,
        })
    }

    fn end_of_line(&self) -> Trivia {
        Trivia::end_of_line(&self.eol)
    }

    fn nested_if(&self, guard: Expr, body: Stmt) -> Stmt {
        let header_end = if self.brace_line || !body.is_block() {
            self.end_of_line()
        } else {
            Trivia::elastic()
        };
        Stmt::new(StmtKind::If(IfStmt {
            if_token: Token::with_trivia("if", Trivia::whitespace(&self.inner), Trivia::elastic()),
            open_paren: Token::new("("),
            condition: guard,
            close_paren: Token::new(")").with_trailing(header_end),
            body,
            else_clause: None,
        }))
    }

    /// `if (guard) { statements }`, one brace per line
    pub(super) fn nest_statements(&self, guard: Expr, statements: Vec<Stmt>) -> Stmt {
        let open = Token::new("{").with_trailing(self.end_of_line());
        let open = if self.brace_line {
            open.with_leading(Trivia::whitespace(&self.inner))
        } else {
            open
        };
        let block = Stmt::new(StmtKind::Block(BlockStmt {
            open,
            statements,
            close: Token::with_trivia("}", Trivia::whitespace(&self.inner), self.end_of_line()),
        }));
        self.nested_if(guard, block)
    }

    /// `{ if (guard) body }` replacing a single-statement body
    pub(super) fn nest_statement(&self, guard: Expr, body: &Stmt) -> Stmt {
        let moved = body
            .without_trivia()
            .with_leading_trivia(Trivia::whitespace(&format!("{}{}", self.inner, self.step)))
            .with_trailing_trivia(self.end_of_line());
        Stmt::new(StmtKind::Block(BlockStmt {
            open: Token::with_trivia("{", Trivia::whitespace(&self.outer), self.end_of_line()),
            statements: vec![self.nested_if(guard, moved)],
            close: Token::new("}")
                .with_leading(Trivia::whitespace(&self.outer))
                .with_trailing(body.trailing_trivia().clone()),
        }))
    }
}
