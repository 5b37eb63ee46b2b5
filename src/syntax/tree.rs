//! Tree root and parent lookup

use super::expr::Expr;
use super::print::{Printed, Printer};
use super::stmt::Stmt;
use super::trivia::Trivia;
use super::{NodeId, SyntaxKind};
use std::fmt;

/// A parsed statement list: the root of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    id: NodeId,
    statements: Vec<Stmt>,
    end_trivia: Trivia,
}

/// Borrowed reference to any node of a tree
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Root(&'a SyntaxTree),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        match self {
            NodeRef::Root(t) => t.id,
            NodeRef::Stmt(s) => s.id(),
            NodeRef::Expr(e) => e.id(),
        }
    }

    pub fn syntax_kind(&self) -> SyntaxKind {
        match self {
            NodeRef::Root(_) => SyntaxKind::SourceFile,
            NodeRef::Stmt(s) => s.syntax_kind(),
            NodeRef::Expr(e) => e.syntax_kind(),
        }
    }

    /// Direct children: a statement's condition comes before its bodies
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match *self {
            NodeRef::Root(t) => t.statements.iter().map(NodeRef::Stmt).collect(),
            NodeRef::Stmt(s) => s
                .condition()
                .map(NodeRef::Expr)
                .into_iter()
                .chain(s.child_statements().into_iter().map(NodeRef::Stmt))
                .collect(),
            NodeRef::Expr(e) => e.children().into_iter().map(NodeRef::Expr).collect(),
        }
    }
}

impl SyntaxTree {
    pub fn new(statements: Vec<Stmt>, end_trivia: Trivia) -> Self {
        Self {
            id: NodeId::fresh(),
            statements,
            end_trivia,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn statements(&self) -> &[Stmt] {
        &self.statements
    }

    pub fn end_trivia(&self) -> &Trivia {
        &self.end_trivia
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::Root(self)
    }

    pub fn find_stmt(&self, id: NodeId) -> Option<&Stmt> {
        self.statements.iter().find_map(|s| s.find_stmt(id))
    }

    pub fn find_expr(&self, id: NodeId) -> Option<&Expr> {
        self.statements.iter().find_map(|s| s.find_expr(id))
    }

    /// Path from the root down to (excluding) the node `id`.
    ///
    /// Empty when `id` is the root or not in the tree.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeRef<'_>> {
        fn walk<'a>(node: NodeRef<'a>, id: NodeId, path: &mut Vec<NodeRef<'a>>) -> bool {
            path.push(node);
            for child in node.children() {
                if child.id() == id || walk(child, id, path) {
                    return true;
                }
            }
            path.pop();
            false
        }

        let mut path = Vec::new();
        walk(self.root(), id, &mut path);
        path
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.ancestors(id).pop()
    }

    /// The parent's parent
    pub fn grandparent(&self, id: NodeId) -> Option<NodeRef<'_>> {
        let mut path = self.ancestors(id);
        path.pop()?;
        path.pop()
    }

    /// Splice `replacement` in place of the statement `id`
    pub fn replace_statement(&self, id: NodeId, replacement: &Stmt) -> Option<SyntaxTree> {
        let (index, replaced) = self
            .statements
            .iter()
            .enumerate()
            .find_map(|(i, s)| s.replace_stmt(id, replacement).map(|r| (i, r)))?;
        let mut statements = self.statements.clone();
        statements[index] = replaced;
        Some(SyntaxTree {
            id: self.id,
            statements,
            end_trivia: self.end_trivia.clone(),
        })
    }

    pub fn print(&self) -> Printed {
        let mut printer = Printer::new();
        for stmt in &self.statements {
            printer.stmt(stmt);
        }
        printer.trivia(&self.end_trivia);
        printer.finish()
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print().text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{LogicalOperator, Token};

    #[test]
    fn test_ancestors_through_condition() {
        let a = Expr::name("a");
        let cond = Expr::logical(a.clone(), LogicalOperator::And, Expr::name("b"));
        let body = Stmt::opaque(vec![Token::new(";")]);
        let stmt = Stmt::if_statement(cond.clone(), body);
        let block = Stmt::block(vec![stmt.clone()]);
        let tree = SyntaxTree::new(vec![block.clone()], Trivia::empty());

        let path: Vec<NodeId> = tree.ancestors(a.id()).iter().map(NodeRef::id).collect();
        assert_eq!(path, vec![tree.id(), block.id(), stmt.id(), cond.id()]);

        assert_eq!(tree.parent(cond.id()).map(|n| n.id()), Some(stmt.id()));
        assert_eq!(tree.grandparent(cond.id()).map(|n| n.id()), Some(block.id()));
        assert!(tree.parent(tree.id()).is_none());
        assert!(tree.parent(Expr::name("z").id()).is_none());
    }

    #[test]
    fn test_replace_statement_keeps_other_roots() {
        let first = Stmt::opaque(vec![Token::new("x();")]);
        let second = Stmt::opaque(vec![Token::new("y();")]);
        let tree = SyntaxTree::new(vec![first.clone(), second.clone()], Trivia::empty());

        let replaced = tree
            .replace_statement(second.id(), &Stmt::opaque(vec![Token::new("z();")]))
            .unwrap();
        assert_eq!(replaced.to_string(), "x();z();");
        assert_eq!(tree.to_string(), "x();y();");
    }
}
