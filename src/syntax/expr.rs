//! Expression nodes

use super::print::Printer;
use super::token::Token;
use super::trivia::Trivia;
use super::{NodeId, SyntaxKind};
use std::fmt;
use std::sync::Arc;

/// Logical operators that form operand chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "&&" => Some(LogicalOperator::And),
            "||" => Some(LogicalOperator::Or),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `left && right` or `left || right`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalExpr {
    pub left: Expr,
    pub operator: Token,
    pub op: LogicalOperator,
    pub right: Expr,
}

/// `( inner )`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenthesizedExpr {
    pub open: Token,
    pub inner: Expr,
    pub close: Token,
}

/// Any other expression, kept as its token run (never empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueExpr {
    pub(crate) tokens: Vec<Token>,
}

impl OpaqueExpr {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    Logical(LogicalExpr),
    Parenthesized(ParenthesizedExpr),
    Opaque(OpaqueExpr),
}

#[derive(Debug)]
struct ExprNode {
    id: NodeId,
    kind: ExprKind,
}

/// Immutable, shared expression node
#[derive(Clone)]
pub struct Expr(Arc<ExprNode>);

impl Expr {
    /// New node with a fresh id
    pub fn new(kind: ExprKind) -> Self {
        Expr(Arc::new(ExprNode {
            id: NodeId::fresh(),
            kind,
        }))
    }

    /// Opaque expression made of a single token, e.g. an identifier
    pub fn name(text: impl Into<String>) -> Self {
        Expr::opaque(vec![Token::new(text)])
    }

    /// Only built from a non-empty token run
    pub(crate) fn opaque(tokens: Vec<Token>) -> Self {
        debug_assert!(!tokens.is_empty(), "opaque expression without tokens");
        Expr::new(ExprKind::Opaque(OpaqueExpr { tokens }))
    }

    /// `left op right` with a synthesized operator token
    pub fn logical(left: Expr, op: LogicalOperator, right: Expr) -> Self {
        let operator = Token::with_trivia(op.as_str(), Trivia::elastic(), Trivia::elastic());
        Expr::logical_with_token(left, operator, op, right)
    }

    pub fn logical_with_token(left: Expr, operator: Token, op: LogicalOperator, right: Expr) -> Self {
        Expr::new(ExprKind::Logical(LogicalExpr {
            left,
            operator,
            op,
            right,
        }))
    }

    pub fn parenthesized(inner: Expr) -> Self {
        Expr::new(ExprKind::Parenthesized(ParenthesizedExpr {
            open: Token::new("("),
            inner,
            close: Token::new(")"),
        }))
    }

    pub fn id(&self) -> NodeId {
        self.0.id
    }

    pub fn kind(&self) -> &ExprKind {
        &self.0.kind
    }

    pub fn syntax_kind(&self) -> SyntaxKind {
        match self.kind() {
            ExprKind::Logical(l) => match l.op {
                LogicalOperator::And => SyntaxKind::LogicalAndExpression,
                LogicalOperator::Or => SyntaxKind::LogicalOrExpression,
            },
            ExprKind::Parenthesized(_) => SyntaxKind::ParenthesizedExpression,
            ExprKind::Opaque(_) => SyntaxKind::OpaqueExpression,
        }
    }

    pub fn as_logical(&self) -> Option<&LogicalExpr> {
        match self.kind() {
            ExprKind::Logical(l) => Some(l),
            _ => None,
        }
    }

    pub fn is_logical(&self) -> bool {
        self.as_logical().is_some()
    }

    /// Same identity, new content
    pub(crate) fn rebuild(&self, kind: ExprKind) -> Expr {
        Expr(Arc::new(ExprNode { id: self.id(), kind }))
    }

    /// Direct child expressions, left to right
    pub fn children(&self) -> Vec<&Expr> {
        match self.kind() {
            ExprKind::Logical(l) => vec![&l.left, &l.right],
            ExprKind::Parenthesized(p) => vec![&p.inner],
            ExprKind::Opaque(_) => vec![],
        }
    }

    pub fn first_token(&self) -> &Token {
        match self.kind() {
            ExprKind::Logical(l) => l.left.first_token(),
            ExprKind::Parenthesized(p) => &p.open,
            ExprKind::Opaque(o) => &o.tokens[0],
        }
    }

    pub fn last_token(&self) -> &Token {
        match self.kind() {
            ExprKind::Logical(l) => l.right.last_token(),
            ExprKind::Parenthesized(p) => &p.close,
            ExprKind::Opaque(o) => &o.tokens[o.tokens.len() - 1],
        }
    }

    pub fn leading_trivia(&self) -> &Trivia {
        self.first_token().leading()
    }

    pub fn trailing_trivia(&self) -> &Trivia {
        self.last_token().trailing()
    }

    fn map_first_token(&self, f: impl FnOnce(&mut Token)) -> Expr {
        let kind = match self.kind() {
            ExprKind::Logical(l) => ExprKind::Logical(LogicalExpr {
                left: l.left.map_first_token(f),
                ..l.clone()
            }),
            ExprKind::Parenthesized(p) => {
                let mut p = p.clone();
                f(&mut p.open);
                ExprKind::Parenthesized(p)
            }
            ExprKind::Opaque(o) => {
                let mut o = o.clone();
                f(&mut o.tokens[0]);
                ExprKind::Opaque(o)
            }
        };
        self.rebuild(kind)
    }

    fn map_last_token(&self, f: impl FnOnce(&mut Token)) -> Expr {
        let kind = match self.kind() {
            ExprKind::Logical(l) => ExprKind::Logical(LogicalExpr {
                right: l.right.map_last_token(f),
                ..l.clone()
            }),
            ExprKind::Parenthesized(p) => {
                let mut p = p.clone();
                f(&mut p.close);
                ExprKind::Parenthesized(p)
            }
            ExprKind::Opaque(o) => {
                let mut o = o.clone();
                if let Some(last) = o.tokens.last_mut() {
                    f(last);
                }
                ExprKind::Opaque(o)
            }
        };
        self.rebuild(kind)
    }

    pub fn with_leading_trivia(&self, trivia: Trivia) -> Expr {
        self.map_first_token(|t| t.set_leading(trivia))
    }

    pub fn with_trailing_trivia(&self, trivia: Trivia) -> Expr {
        self.map_last_token(|t| t.set_trailing(trivia))
    }

    /// Drop trailing whitespace; comments stay
    pub fn trim_trailing_trivia(&self) -> Expr {
        let trimmed = self.trailing_trivia().trim_end();
        if trimmed == *self.trailing_trivia() {
            return self.clone();
        }
        self.with_trailing_trivia(trimmed)
    }

    /// Drop the outer leading and trailing trivia
    pub fn without_trivia(&self) -> Expr {
        self.with_leading_trivia(Trivia::empty())
            .with_trailing_trivia(Trivia::empty())
    }

    /// Take the outer trivia of `other`
    pub fn with_trivia_from(&self, other: &Expr) -> Expr {
        self.with_leading_trivia(other.leading_trivia().clone())
            .with_trailing_trivia(other.trailing_trivia().clone())
    }

    /// Find a node by id in this subtree
    pub fn find(&self, id: NodeId) -> Option<&Expr> {
        if self.id() == id {
            return Some(self);
        }
        self.children().into_iter().find_map(|c| c.find(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// The node whose direct child has the given id
    pub fn parent_of(&self, id: NodeId) -> Option<&Expr> {
        let children = self.children();
        if children.iter().any(|c| c.id() == id) {
            return Some(self);
        }
        children.into_iter().find_map(|c| c.parent_of(id))
    }

    /// Replace the node `target` with `replacement`.
    ///
    /// Returns `None` when `target` is not in this subtree.
    pub fn replace(&self, target: NodeId, replacement: &Expr) -> Option<Expr> {
        if self.id() == target {
            return Some(replacement.clone());
        }
        match self.kind() {
            ExprKind::Logical(l) => {
                if let Some(left) = l.left.replace(target, replacement) {
                    return Some(self.rebuild(ExprKind::Logical(LogicalExpr {
                        left,
                        ..l.clone()
                    })));
                }
                let right = l.right.replace(target, replacement)?;
                Some(self.rebuild(ExprKind::Logical(LogicalExpr {
                    right,
                    ..l.clone()
                })))
            }
            ExprKind::Parenthesized(p) => {
                let inner = p.inner.replace(target, replacement)?;
                Some(self.rebuild(ExprKind::Parenthesized(ParenthesizedExpr {
                    inner,
                    ..p.clone()
                })))
            }
            ExprKind::Opaque(_) => None,
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.kind() == other.kind()
    }
}

impl Eq for Expr {}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expr")
            .field("id", &self.id())
            .field("text", &self.to_string())
            .finish()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer::new();
        printer.expr(self);
        write!(f, "{}", printer.finish().text)
    }
}
