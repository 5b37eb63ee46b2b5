//! Statement kinds the extraction can run on

use crate::syntax::{Expr, IfStmt, Stmt, StmtKind, SyntaxKind, Token, WhileStmt};

/// Access to the guard and body of one conditional statement kind.
///
/// [`ExtractCondition`](super::ExtractCondition) is written once against
/// this trait. Accessors return `None` when handed a statement of another
/// kind.
pub trait StatementAdapter {
    fn kind(&self) -> SyntaxKind;

    /// Human-readable name of the refactoring
    fn title(&self) -> &str;

    fn condition<'a>(&self, statement: &'a Stmt) -> Option<&'a Expr>;

    fn with_condition(&self, statement: &Stmt, condition: Expr) -> Option<Stmt>;

    /// The statement the condition guards
    fn body<'a>(&self, statement: &'a Stmt) -> Option<&'a Stmt>;

    fn with_body(&self, statement: &Stmt, body: Stmt) -> Option<Stmt>;

    /// Last token in front of the body
    fn header_end<'a>(&self, statement: &'a Stmt) -> Option<&'a Token>;

    /// Whether nesting the body keeps the statement's meaning
    fn accepts(&self, statement: &Stmt) -> bool {
        statement.syntax_kind() == self.kind()
    }
}

/// `if (condition) body`.
///
/// An `if` with an `else` branch is not accepted: `a && !b` would no
/// longer reach the `else`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfStatementAdapter;

impl StatementAdapter for IfStatementAdapter {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::IfStatement
    }

    fn title(&self) -> &str {
        "Extract condition from 'if'"
    }

    fn condition<'a>(&self, statement: &'a Stmt) -> Option<&'a Expr> {
        statement.as_if().map(|s| &s.condition)
    }

    fn with_condition(&self, statement: &Stmt, condition: Expr) -> Option<Stmt> {
        let s = statement.as_if()?;
        Some(statement.with_kind(StmtKind::If(IfStmt {
            condition,
            ..s.clone()
        })))
    }

    fn body<'a>(&self, statement: &'a Stmt) -> Option<&'a Stmt> {
        statement.as_if().map(|s| &s.body)
    }

    fn with_body(&self, statement: &Stmt, body: Stmt) -> Option<Stmt> {
        let s = statement.as_if()?;
        Some(statement.with_kind(StmtKind::If(IfStmt { body, ..s.clone() })))
    }

    fn header_end<'a>(&self, statement: &'a Stmt) -> Option<&'a Token> {
        statement.as_if().map(|s| &s.close_paren)
    }

    fn accepts(&self, statement: &Stmt) -> bool {
        statement.as_if().is_some_and(|s| s.else_clause.is_none())
    }
}

/// `while (condition) body`
#[derive(Debug, Clone, Copy, Default)]
pub struct WhileStatementAdapter;

impl StatementAdapter for WhileStatementAdapter {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::WhileStatement
    }

    fn title(&self) -> &str {
        "Extract condition from 'while'"
    }

    fn condition<'a>(&self, statement: &'a Stmt) -> Option<&'a Expr> {
        statement.as_while().map(|s| &s.condition)
    }

    fn with_condition(&self, statement: &Stmt, condition: Expr) -> Option<Stmt> {
        let s = statement.as_while()?;
        Some(statement.with_kind(StmtKind::While(WhileStmt {
            condition,
            ..s.clone()
        })))
    }

    fn body<'a>(&self, statement: &'a Stmt) -> Option<&'a Stmt> {
        statement.as_while().map(|s| &s.body)
    }

    fn with_body(&self, statement: &Stmt, body: Stmt) -> Option<Stmt> {
        let s = statement.as_while()?;
        Some(statement.with_kind(StmtKind::While(WhileStmt { body, ..s.clone() })))
    }

    fn header_end<'a>(&self, statement: &'a Stmt) -> Option<&'a Token> {
        statement.as_while().map(|s| &s.close_paren)
    }
}
