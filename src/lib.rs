// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # condextract: extract a condition into a nested conditional
//!
//! Takes an `if` or `while` whose condition is an `&&`/`||` chain, moves
//! the selected operand(s) out of the chain and re-wraps the guarded body
//! in a new `if`. Comments, whitespace and line breaks of the original
//! text survive the edit.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use condextract::{parse_statements, ExtractCondition, IfStatementAdapter, SelectionSet};
//!
//! let tree = parse_statements("if (a && b) { x(); }")?;
//! let stmt = &tree.statements()[0];
//! let condition = stmt.condition().unwrap();
//! let a = condition.as_logical().unwrap().left.clone();
//!
//! let selection = SelectionSet::new(condition, vec![a])?;
//! let refactor = ExtractCondition::new(IfStatementAdapter);
//! let result = refactor.apply(&tree, stmt.id(), &selection)?;
//!
//! assert_eq!(result.unwrap().to_string(), "if (a) { if (b) { x(); } }");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! text ──► parse ──► SyntaxTree (persistent, Arc-shared)
//!                        │
//!                        ├──► LogicalChain: operands of the && / || spine
//!                        ├──► SelectionSet: chosen operands + their text
//!                        ├──► StatementContainer: block or embedded holder
//!                        │
//!                        └──► ExtractCondition<A: StatementAdapter>
//!                                 remove operand(s) ──► nest ──► new tree
//! ```
//!
//! Each edit returns new nodes. The input tree is never modified and
//! untouched subtrees are shared.

pub mod chain;
pub mod config;
pub mod container;
pub mod error;
pub mod parse;
pub mod refactor;
pub mod selection;
pub mod syntax;

// Re-exports
pub use chain::{remove_operand, remove_operands, ChainLink, LogicalChain, RunShape};
pub use config::{ExtractOptions, NestingOrder};
pub use container::StatementContainer;
pub use error::{Error, Result};
pub use parse::{parse_expression, parse_statements};
pub use refactor::{
    ExtractCondition, ExtractConditionFromIf, ExtractConditionFromWhile, IfStatementAdapter,
    StatementAdapter, WhileStatementAdapter,
};
pub use selection::SelectionSet;
pub use syntax::{
    Expr, LogicalOperator, NodeId, NodeRef, Stmt, SyntaxKind, SyntaxTree, Token, Trivia,
    TriviaPiece,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
