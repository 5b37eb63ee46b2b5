//! Statement nodes

use super::expr::Expr;
use super::print::Printer;
use super::token::Token;
use super::trivia::Trivia;
use super::{NodeId, SyntaxKind};
use std::fmt;
use std::sync::Arc;

/// `{ statements }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStmt {
    pub open: Token,
    pub statements: Vec<Stmt>,
    pub close: Token,
}

/// `if (condition) body else ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStmt {
    pub if_token: Token,
    pub open_paren: Token,
    pub condition: Expr,
    pub close_paren: Token,
    pub body: Stmt,
    pub else_clause: Option<ElseClause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElseClause {
    pub else_token: Token,
    pub body: Stmt,
}

/// `while (condition) body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStmt {
    pub while_token: Token,
    pub open_paren: Token,
    pub condition: Expr,
    pub close_paren: Token,
    pub body: Stmt,
}

/// Any other statement, kept as its token run (never empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueStmt {
    pub(crate) tokens: Vec<Token>,
}

impl OpaqueStmt {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    Opaque(OpaqueStmt),
}

#[derive(Debug)]
struct StmtNode {
    id: NodeId,
    kind: StmtKind,
}

/// Immutable, shared statement node
#[derive(Clone)]
pub struct Stmt(Arc<StmtNode>);

fn keyword(text: &str) -> Token {
    Token::new(text).with_trailing(Trivia::elastic())
}

impl Stmt {
    /// New node with a fresh id
    pub fn new(kind: StmtKind) -> Self {
        Stmt(Arc::new(StmtNode {
            id: NodeId::fresh(),
            kind,
        }))
    }

    /// Only built from a non-empty token run
    pub(crate) fn opaque(tokens: Vec<Token>) -> Self {
        debug_assert!(!tokens.is_empty(), "opaque statement without tokens");
        Stmt::new(StmtKind::Opaque(OpaqueStmt { tokens }))
    }

    /// Synthesized block; braces carry elastic separators
    pub fn block(statements: Vec<Stmt>) -> Self {
        Stmt::new(StmtKind::Block(BlockStmt {
            open: Token::new("{").with_trailing(Trivia::elastic()),
            statements,
            close: Token::new("}")
                .with_leading(Trivia::elastic())
                .with_trailing(Trivia::elastic()),
        }))
    }

    /// Synthesized `if (condition) body`
    pub fn if_statement(condition: Expr, body: Stmt) -> Self {
        Stmt::new(StmtKind::If(IfStmt {
            if_token: keyword("if"),
            open_paren: Token::new("("),
            condition,
            close_paren: keyword(")"),
            body,
            else_clause: None,
        }))
    }

    /// Synthesized `while (condition) body`
    pub fn while_statement(condition: Expr, body: Stmt) -> Self {
        Stmt::new(StmtKind::While(WhileStmt {
            while_token: keyword("while"),
            open_paren: Token::new("("),
            condition,
            close_paren: keyword(")"),
            body,
        }))
    }

    pub fn id(&self) -> NodeId {
        self.0.id
    }

    pub fn kind(&self) -> &StmtKind {
        &self.0.kind
    }

    pub fn syntax_kind(&self) -> SyntaxKind {
        match self.kind() {
            StmtKind::Block(_) => SyntaxKind::Block,
            StmtKind::If(_) => SyntaxKind::IfStatement,
            StmtKind::While(_) => SyntaxKind::WhileStatement,
            StmtKind::Opaque(_) => SyntaxKind::OpaqueStatement,
        }
    }

    /// Same identity, new content
    pub fn with_kind(&self, kind: StmtKind) -> Stmt {
        Stmt(Arc::new(StmtNode { id: self.id(), kind }))
    }

    pub fn as_block(&self) -> Option<&BlockStmt> {
        match self.kind() {
            StmtKind::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_if(&self) -> Option<&IfStmt> {
        match self.kind() {
            StmtKind::If(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_while(&self) -> Option<&WhileStmt> {
        match self.kind() {
            StmtKind::While(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_block(&self) -> bool {
        self.as_block().is_some()
    }

    /// Guard of an `if` or `while`
    pub fn condition(&self) -> Option<&Expr> {
        match self.kind() {
            StmtKind::If(s) => Some(&s.condition),
            StmtKind::While(s) => Some(&s.condition),
            _ => None,
        }
    }

    /// Direct child statements, in source order
    pub fn child_statements(&self) -> Vec<&Stmt> {
        match self.kind() {
            StmtKind::Block(b) => b.statements.iter().collect(),
            StmtKind::If(s) => {
                let mut children = vec![&s.body];
                if let Some(else_clause) = &s.else_clause {
                    children.push(&else_clause.body);
                }
                children
            }
            StmtKind::While(s) => vec![&s.body],
            StmtKind::Opaque(_) => vec![],
        }
    }

    pub fn first_token(&self) -> &Token {
        match self.kind() {
            StmtKind::Block(b) => &b.open,
            StmtKind::If(s) => &s.if_token,
            StmtKind::While(s) => &s.while_token,
            StmtKind::Opaque(o) => &o.tokens[0],
        }
    }

    pub fn last_token(&self) -> &Token {
        match self.kind() {
            StmtKind::Block(b) => &b.close,
            StmtKind::If(s) => match &s.else_clause {
                Some(e) => e.body.last_token(),
                None => s.body.last_token(),
            },
            StmtKind::While(s) => s.body.last_token(),
            StmtKind::Opaque(o) => &o.tokens[o.tokens.len() - 1],
        }
    }

    pub fn leading_trivia(&self) -> &Trivia {
        self.first_token().leading()
    }

    pub fn trailing_trivia(&self) -> &Trivia {
        self.last_token().trailing()
    }

    pub fn with_leading_trivia(&self, trivia: Trivia) -> Stmt {
        let kind = match self.kind() {
            StmtKind::Block(b) => StmtKind::Block(BlockStmt {
                open: b.open.clone().with_leading(trivia),
                ..b.clone()
            }),
            StmtKind::If(s) => StmtKind::If(IfStmt {
                if_token: s.if_token.clone().with_leading(trivia),
                ..s.clone()
            }),
            StmtKind::While(s) => StmtKind::While(WhileStmt {
                while_token: s.while_token.clone().with_leading(trivia),
                ..s.clone()
            }),
            StmtKind::Opaque(o) => {
                let mut o = o.clone();
                o.tokens[0].set_leading(trivia);
                StmtKind::Opaque(o)
            }
        };
        self.with_kind(kind)
    }

    pub fn with_trailing_trivia(&self, trivia: Trivia) -> Stmt {
        let kind = match self.kind() {
            StmtKind::Block(b) => StmtKind::Block(BlockStmt {
                close: b.close.clone().with_trailing(trivia),
                ..b.clone()
            }),
            StmtKind::If(s) => match &s.else_clause {
                Some(e) => StmtKind::If(IfStmt {
                    else_clause: Some(ElseClause {
                        else_token: e.else_token.clone(),
                        body: e.body.with_trailing_trivia(trivia),
                    }),
                    ..s.clone()
                }),
                None => StmtKind::If(IfStmt {
                    body: s.body.with_trailing_trivia(trivia),
                    ..s.clone()
                }),
            },
            StmtKind::While(s) => StmtKind::While(WhileStmt {
                body: s.body.with_trailing_trivia(trivia),
                ..s.clone()
            }),
            StmtKind::Opaque(o) => {
                let mut o = o.clone();
                if let Some(last) = o.tokens.last_mut() {
                    last.set_trailing(trivia);
                }
                StmtKind::Opaque(o)
            }
        };
        self.with_kind(kind)
    }

    pub fn without_trivia(&self) -> Stmt {
        self.with_leading_trivia(Trivia::empty())
            .with_trailing_trivia(Trivia::empty())
    }

    /// Take the outer trivia of `other`
    pub fn with_trivia_from(&self, other: &Stmt) -> Stmt {
        self.with_leading_trivia(other.leading_trivia().clone())
            .with_trailing_trivia(other.trailing_trivia().clone())
    }

    pub fn find_stmt(&self, id: NodeId) -> Option<&Stmt> {
        if self.id() == id {
            return Some(self);
        }
        self.child_statements()
            .into_iter()
            .find_map(|c| c.find_stmt(id))
    }

    pub fn find_expr(&self, id: NodeId) -> Option<&Expr> {
        if let Some(found) = self.condition().and_then(|c| c.find(id)) {
            return Some(found);
        }
        self.child_statements()
            .into_iter()
            .find_map(|c| c.find_expr(id))
    }

    /// Replace the statement `target` in this subtree.
    ///
    /// Returns `None` when `target` is not found.
    pub fn replace_stmt(&self, target: NodeId, replacement: &Stmt) -> Option<Stmt> {
        if self.id() == target {
            return Some(replacement.clone());
        }
        let kind = match self.kind() {
            StmtKind::Block(b) => {
                let (index, replaced) = b
                    .statements
                    .iter()
                    .enumerate()
                    .find_map(|(i, s)| s.replace_stmt(target, replacement).map(|r| (i, r)))?;
                let mut b = b.clone();
                b.statements[index] = replaced;
                StmtKind::Block(b)
            }
            StmtKind::If(s) => {
                if let Some(body) = s.body.replace_stmt(target, replacement) {
                    StmtKind::If(IfStmt { body, ..s.clone() })
                } else {
                    let e = s.else_clause.as_ref()?;
                    let body = e.body.replace_stmt(target, replacement)?;
                    StmtKind::If(IfStmt {
                        else_clause: Some(ElseClause {
                            else_token: e.else_token.clone(),
                            body,
                        }),
                        ..s.clone()
                    })
                }
            }
            StmtKind::While(s) => StmtKind::While(WhileStmt {
                body: s.body.replace_stmt(target, replacement)?,
                ..s.clone()
            }),
            StmtKind::Opaque(_) => return None,
        };
        Some(self.with_kind(kind))
    }

    /// Replace the expression `target` anywhere in this subtree.
    ///
    /// Returns `None` when `target` is not found.
    pub fn replace_expr(&self, target: NodeId, replacement: &Expr) -> Option<Stmt> {
        let kind = match self.kind() {
            StmtKind::If(s) => {
                if let Some(condition) = s.condition.replace(target, replacement) {
                    StmtKind::If(IfStmt {
                        condition,
                        ..s.clone()
                    })
                } else if let Some(body) = s.body.replace_expr(target, replacement) {
                    StmtKind::If(IfStmt { body, ..s.clone() })
                } else {
                    let e = s.else_clause.as_ref()?;
                    let body = e.body.replace_expr(target, replacement)?;
                    StmtKind::If(IfStmt {
                        else_clause: Some(ElseClause {
                            else_token: e.else_token.clone(),
                            body,
                        }),
                        ..s.clone()
                    })
                }
            }
            StmtKind::While(s) => {
                if let Some(condition) = s.condition.replace(target, replacement) {
                    StmtKind::While(WhileStmt {
                        condition,
                        ..s.clone()
                    })
                } else {
                    StmtKind::While(WhileStmt {
                        body: s.body.replace_expr(target, replacement)?,
                        ..s.clone()
                    })
                }
            }
            StmtKind::Block(b) => {
                let (index, replaced) = b
                    .statements
                    .iter()
                    .enumerate()
                    .find_map(|(i, s)| s.replace_expr(target, replacement).map(|r| (i, r)))?;
                let mut b = b.clone();
                b.statements[index] = replaced;
                StmtKind::Block(b)
            }
            StmtKind::Opaque(_) => return None,
        };
        Some(self.with_kind(kind))
    }
}

impl PartialEq for Stmt {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.kind() == other.kind()
    }
}

impl Eq for Stmt {}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stmt")
            .field("id", &self.id())
            .field("kind", &self.syntax_kind())
            .field("text", &self.to_string())
            .finish()
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer::new();
        printer.stmt(self);
        write!(f, "{}", printer.finish().text)
    }
}
