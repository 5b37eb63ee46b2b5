//! Statement containers
//!
//! A conditional statement always sits in something that holds
//! statements: a block (or the tree root), or another `if`/`while`/`else`
//! holding it as a single embedded statement.

use crate::syntax::{NodeId, NodeRef, Stmt, StmtKind, SyntaxKind, SyntaxTree};
use tracing::trace;

/// Structural container of a statement
#[derive(Debug, Clone, Copy)]
pub enum StatementContainer<'a> {
    /// Ordered statement sequence: a block or the tree root
    Block {
        id: NodeId,
        kind: SyntaxKind,
        statements: &'a [Stmt],
    },

    /// Statement holding its children as single embedded statements
    Embedded { holder: &'a Stmt },
}

impl<'a> StatementContainer<'a> {
    /// Classify `node` as a container.
    ///
    /// `None` when the node is absent or cannot hold statements.
    pub fn resolve(node: Option<NodeRef<'a>>) -> Option<Self> {
        let container = match node? {
            NodeRef::Root(tree) => StatementContainer::Block {
                id: tree.id(),
                kind: SyntaxKind::SourceFile,
                statements: tree.statements(),
            },
            NodeRef::Stmt(stmt) => match stmt.kind() {
                StmtKind::Block(block) => StatementContainer::Block {
                    id: stmt.id(),
                    kind: SyntaxKind::Block,
                    statements: &block.statements,
                },
                StmtKind::If(_) | StmtKind::While(_) => StatementContainer::Embedded { holder: stmt },
                StmtKind::Opaque(_) => return None,
            },
            NodeRef::Expr(_) => return None,
        };
        Some(container)
    }

    /// Container of the statement guarded by `condition`.
    ///
    /// Walks condition → statement → container. `None` when `condition` is
    /// not the guard of an `if`/`while` in `tree`.
    pub fn of_condition(tree: &'a SyntaxTree, condition: NodeId) -> Option<Self> {
        let mut path = tree.ancestors(condition);
        let guarded = match path.pop()? {
            NodeRef::Stmt(stmt) if stmt.condition().map(|c| c.id()) == Some(condition) => stmt,
            other => {
                trace!(%condition, parent = %other.syntax_kind(), "not a statement guard");
                return None;
            }
        };
        let container = Self::resolve(path.pop());
        trace!(
            statement = %guarded.id(),
            container = ?container.map(|c| c.syntax_kind()),
            "resolved statement container"
        );
        container
    }

    pub fn id(&self) -> NodeId {
        match self {
            StatementContainer::Block { id, .. } => *id,
            StatementContainer::Embedded { holder } => holder.id(),
        }
    }

    pub fn syntax_kind(&self) -> SyntaxKind {
        match self {
            StatementContainer::Block { kind, .. } => *kind,
            StatementContainer::Embedded { holder } => holder.syntax_kind(),
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, StatementContainer::Block { .. })
    }

    /// Statements held directly by the container
    pub fn statements(&self) -> Vec<&'a Stmt> {
        match *self {
            StatementContainer::Block { statements, .. } => statements.iter().collect(),
            StatementContainer::Embedded { holder } => holder
                .child_statements()
                .into_iter()
                .filter(|s| !s.is_block())
                .collect(),
        }
    }

    pub fn holds(&self, statement: NodeId) -> bool {
        self.statements().iter().any(|s| s.id() == statement)
    }
}
