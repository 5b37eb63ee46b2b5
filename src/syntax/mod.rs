//! Persistent syntax tree
//!
//! Nodes are immutable and `Arc`-shared. Every edit returns a new node;
//! untouched subtrees are shared with the previous version, so replacing
//! a subtree costs O(depth).
//!
//! Identity is carried by [`NodeId`]. Rebuilding a node (new trivia, a
//! replaced child) keeps its id; only synthesized nodes get fresh ids.
//! Equality (`==`) is structural and ignores ids.

mod expr;
mod print;
mod stmt;
mod token;
mod tree;
mod trivia;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use expr::{Expr, ExprKind, LogicalExpr, LogicalOperator, OpaqueExpr, ParenthesizedExpr};
pub use print::{print_expr, print_stmt, Printed, TextRange};
pub use stmt::{BlockStmt, ElseClause, IfStmt, OpaqueStmt, Stmt, StmtKind, WhileStmt};
pub use token::Token;
pub use tree::{NodeRef, SyntaxTree};
pub use trivia::{Trivia, TriviaPiece};

/// Process-unique node identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        NodeId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Syntactic kind tag of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    SourceFile,
    Block,
    IfStatement,
    WhileStatement,
    OpaqueStatement,
    LogicalAndExpression,
    LogicalOrExpression,
    ParenthesizedExpression,
    OpaqueExpression,
}

impl SyntaxKind {
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::IfStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::OpaqueStatement
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyntaxKind::SourceFile => "source file",
            SyntaxKind::Block => "block",
            SyntaxKind::IfStatement => "if statement",
            SyntaxKind::WhileStatement => "while statement",
            SyntaxKind::OpaqueStatement => "statement",
            SyntaxKind::LogicalAndExpression => "&& expression",
            SyntaxKind::LogicalOrExpression => "|| expression",
            SyntaxKind::ParenthesizedExpression => "parenthesized expression",
            SyntaxKind::OpaqueExpression => "expression",
        };
        write!(f, "{}", name)
    }
}
