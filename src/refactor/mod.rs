//! Extract a condition into a nested conditional
//!
//! ```text
//! if (a && b) { x(); }    select `a`    if (a) { if (b) { x(); } }
//! ```
//!
//! The selected operands leave the statement's `&&`/`||` chain and the
//! guarded body is re-wrapped in a new `if`. Which half stays on the
//! outer statement is set by [`NestingOrder`].

mod adapter;
mod layout;

pub use adapter::{IfStatementAdapter, StatementAdapter, WhileStatementAdapter};

use crate::chain::{self, LogicalChain, RunShape};
use crate::config::{ExtractOptions, NestingOrder};
use crate::container::StatementContainer;
use crate::error::{Error, Result};
use crate::parse::parse_expression;
use crate::selection::SelectionSet;
use crate::syntax::{BlockStmt, Expr, NodeId, Stmt, StmtKind, SyntaxKind, SyntaxTree, Trivia};
use layout::Lines;
use tracing::{debug, trace};

pub type ExtractConditionFromIf = ExtractCondition<IfStatementAdapter>;
pub type ExtractConditionFromWhile = ExtractCondition<WhileStatementAdapter>;

/// Condition extraction for one statement kind
#[derive(Debug, Clone, Default)]
pub struct ExtractCondition<A> {
    adapter: A,
    options: ExtractOptions,
}

impl<A: StatementAdapter> ExtractCondition<A> {
    pub fn new(adapter: A) -> Self {
        Self::with_options(adapter, ExtractOptions::default())
    }

    pub fn with_options(adapter: A, options: ExtractOptions) -> Self {
        Self { adapter, options }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn title(&self) -> &str {
        self.adapter.title()
    }

    pub fn kind(&self) -> SyntaxKind {
        self.adapter.kind()
    }

    /// Container of the statement guarded by `condition`, if any
    pub fn statement_container<'a>(
        &self,
        tree: &'a SyntaxTree,
        condition: NodeId,
    ) -> Option<StatementContainer<'a>> {
        StatementContainer::of_condition(tree, condition)
    }

    pub fn remove_operand_from_condition(&self, condition: &Expr, operand: NodeId) -> Result<Expr> {
        chain::remove_operand(condition, operand)
    }

    /// Remove a contiguous run of operands.
    ///
    /// Runs that do not end at the rightmost operand are rejected unless
    /// `allow_partial_runs` is set.
    pub fn remove_operands_from_condition(
        &self,
        condition: &Expr,
        selection: &SelectionSet,
    ) -> Result<Expr> {
        if !self.options.allow_partial_runs {
            let chain = LogicalChain::new(condition).ok_or_else(|| {
                Error::invalid_selection("condition has a single operand; nothing would remain")
            })?;
            let shape = chain.run_shape(&selection.ids())?;
            if shape != RunShape::Suffix {
                return Err(Error::invalid_selection(format!(
                    "selection must end at the last operand (found a {:?} run)",
                    shape
                )));
            }
        }
        chain::remove_operands(condition, selection)
    }

    /// Wrap the body of `statement` in `if (guard) ...`.
    ///
    /// A block body keeps its braces and gets the new conditional as its
    /// only statement. A single-statement body is moved into the new
    /// conditional, which is wrapped in a fresh block taking the body's
    /// trivia. Bodies laid out over several lines get the new tokens on
    /// lines of their own; the guard keeps its trailing comments.
    pub fn synthesize_nested_conditional(&self, statement: &Stmt, guard: &Expr) -> Result<Stmt> {
        let body = self.adapter.body(statement).ok_or_else(|| self.unsupported(statement))?;
        let header_end = self
            .adapter
            .header_end(statement)
            .ok_or_else(|| self.unsupported(statement))?;
        let guard = guard
            .with_leading_trivia(Trivia::empty())
            .trim_trailing_trivia();

        let new_body = match body.kind() {
            StmtKind::Block(block) => {
                let lines = Lines::for_block(header_end, block);
                trace!(
                    statements = block.statements.len(),
                    line_layout = lines.is_some(),
                    "nesting block contents"
                );
                let nested = match lines {
                    Some(lines) => lines.nest_statements(guard, block.statements.clone()),
                    None => Stmt::if_statement(guard, Stmt::block(block.statements.clone())),
                };
                body.with_kind(StmtKind::Block(BlockStmt {
                    open: block.open.clone(),
                    statements: vec![nested],
                    close: block.close.clone(),
                }))
            }
            _ => {
                let lines = Lines::for_embedded(statement, header_end, body);
                trace!(line_layout = lines.is_some(), "nesting embedded statement");
                match lines {
                    Some(lines) => lines.nest_statement(guard, body),
                    None => {
                        let nested = Stmt::if_statement(guard, body.without_trivia());
                        Stmt::block(vec![nested]).with_trivia_from(body)
                    }
                }
            }
        };

        self.adapter
            .with_body(statement, new_body)
            .ok_or_else(|| self.unsupported(statement))
    }

    /// Like [`synthesize_nested_conditional`](Self::synthesize_nested_conditional)
    /// with the guard given as source text
    pub fn synthesize_nested_conditional_from_text(
        &self,
        statement: &Stmt,
        guard: &str,
    ) -> Result<Stmt> {
        let guard = parse_expression(guard)?;
        self.synthesize_nested_conditional(statement, &guard)
    }

    /// Extract `selection` from the condition of `statement`.
    ///
    /// An empty selection returns the statement unchanged.
    pub fn extract(&self, statement: &Stmt, selection: &SelectionSet) -> Result<Stmt> {
        if !self.adapter.accepts(statement) {
            return Err(self.unsupported(statement));
        }
        if selection.is_empty() {
            trace!(statement = %statement.id(), "empty selection");
            return Ok(statement.clone());
        }

        let condition = self
            .adapter
            .condition(statement)
            .ok_or_else(|| self.unsupported(statement))?;
        let chain = LogicalChain::new(condition).ok_or_else(|| {
            Error::invalid_selection("condition has a single operand; nothing would remain")
        })?;
        if let Some(stray) = selection.operands().iter().find(|o| !chain.contains(o.id())) {
            return Err(Error::invalid_selection(format!(
                "`{}` is not an operand of the `{}` chain",
                stray.to_string().trim(),
                chain.operator()
            )));
        }
        debug!(
            statement = %statement.id(),
            operator = %chain.operator(),
            selected = selection.len(),
            of = chain.len(),
            "extracting condition"
        );

        let (extracted, remaining) = match selection.operands() {
            [operand] => (
                operand.clone(),
                self.remove_operand_from_condition(condition, operand.id())?,
            ),
            _ => {
                let remaining = self.remove_operands_from_condition(condition, selection)?;
                (selection.to_expression()?, remaining)
            }
        };

        // Whichever half holds the rightmost operand ends with the
        // condition's trailing trivia; the other half ends with comments
        // that sat between operands.
        let extracted_is_interior = selection
            .operands()
            .last()
            .is_some_and(|o| !chain.is_rightmost(o.id()));
        let (outer, inner, outer_is_interior) = match self.options.nesting {
            NestingOrder::ExtractedOuter => (extracted, remaining, extracted_is_interior),
            NestingOrder::ExtractedInner => (remaining, extracted, !extracted_is_interior),
        };
        debug!(
            nesting = ?self.options.nesting,
            outer = %outer,
            inner = %inner,
            "synthesizing nested conditional"
        );

        let (outer_tail, inner) = if outer_is_interior {
            (
                outer.trailing_trivia().trim_end().concat(condition.trailing_trivia()),
                inner.with_trailing_trivia(Trivia::empty()),
            )
        } else {
            (condition.trailing_trivia().clone(), inner)
        };
        let outer = outer
            .with_leading_trivia(condition.leading_trivia().clone())
            .with_trailing_trivia(outer_tail);
        let rewritten = self
            .adapter
            .with_condition(statement, outer)
            .ok_or_else(|| self.unsupported(statement))?;
        self.synthesize_nested_conditional(&rewritten, &inner)
    }

    /// Run the extraction on the statement `statement` of `tree`.
    ///
    /// Returns `Ok(None)` when the statement is not in the tree or has no
    /// statement container.
    pub fn apply(
        &self,
        tree: &SyntaxTree,
        statement: NodeId,
        selection: &SelectionSet,
    ) -> Result<Option<SyntaxTree>> {
        let Some(stmt) = tree.find_stmt(statement) else {
            debug!(%statement, "statement not in tree");
            return Ok(None);
        };
        let condition = self
            .adapter
            .condition(stmt)
            .ok_or_else(|| self.unsupported(stmt))?;
        if self.statement_container(tree, condition.id()).is_none() {
            debug!(%statement, "no statement container");
            return Ok(None);
        }

        let replacement = self.extract(stmt, selection)?;
        Ok(tree.replace_statement(statement, &replacement))
    }

    fn unsupported(&self, statement: &Stmt) -> Error {
        if statement.syntax_kind() == self.adapter.kind() {
            return Error::UnsupportedStatement(format!(
                "{}: this {} cannot be nested without changing what it does",
                self.title(),
                self.adapter.kind()
            ));
        }
        Error::UnsupportedStatement(format!(
            "{}: expected {}, found {}",
            self.title(),
            self.adapter.kind(),
            statement.syntax_kind()
        ))
    }
}
