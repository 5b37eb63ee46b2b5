//! Lowering tree-sitter nodes into the persistent tree

use crate::error::{Error, Result};
use crate::syntax::{
    BlockStmt, ElseClause, Expr, ExprKind, IfStmt, LogicalExpr, LogicalOperator,
    ParenthesizedExpr, Stmt, StmtKind, SyntaxTree, Token, Trivia, WhileStmt,
};
use std::ops::Range;
use tree_sitter::Node;

/// Children that carry syntax (comments are trivia)
pub(super) fn syntax_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect()
}

/// Tokens of a source region with trivia assigned
pub(super) struct Lowering {
    tokens: Vec<Token>,
    starts: Vec<usize>,
    end_trivia: Trivia,
}

impl Lowering {
    pub(super) fn new(source: &str, region: Range<usize>, root: Node<'_>) -> Result<Self> {
        let mut leaves = Vec::new();
        collect_leaves(root, &region, &mut leaves);

        let mut tokens: Vec<Token> = Vec::with_capacity(leaves.len());
        let mut starts = Vec::with_capacity(leaves.len());
        let mut cursor = region.start;

        for (start, end) in leaves {
            let gap = &source[cursor..start];
            let mut token = Token::new(&source[start..end]);

            match Trivia::lex(gap) {
                Some(trivia) => match tokens.last_mut() {
                    Some(prev) => {
                        let (trailing, leading) = trivia.split_gap();
                        prev.set_trailing(trailing);
                        token.set_leading(leading);
                    }
                    None => token.set_leading(trivia),
                },
                // Text the grammar exposes no leaf for stays with its neighbour
                None => match tokens.last_mut() {
                    Some(prev) => prev.push_text(gap),
                    None => token = Token::new(format!("{}{}", gap, token.text())),
                },
            }

            tokens.push(token);
            starts.push(start);
            cursor = end;
        }

        let tail = &source[cursor..region.end];
        let tail = Trivia::lex(tail)
            .ok_or_else(|| Error::Parse(format!("unexpected trailing text `{}`", tail.trim())))?;
        let end_trivia = match tokens.last_mut() {
            Some(last) => {
                let (trailing, rest) = tail.split_gap();
                last.set_trailing(trailing);
                rest
            }
            None => tail,
        };

        Ok(Self {
            tokens,
            starts,
            end_trivia,
        })
    }

    pub(super) fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Indices of the tokens inside `node`
    pub(super) fn token_range(&self, node: Node<'_>) -> Range<usize> {
        let first = self.starts.partition_point(|&s| s < node.start_byte());
        let last = self.starts.partition_point(|&s| s < node.end_byte());
        first..last
    }

    fn token(&self, node: Node<'_>) -> Token {
        self.tokens[self.token_range(node).start].clone()
    }

    fn tokens(&self, node: Node<'_>) -> Vec<Token> {
        self.tokens[self.token_range(node)].to_vec()
    }

    /// Lower the statements of the snippet body block
    pub(super) fn tree(&self, body: Node<'_>) -> SyntaxTree {
        let statements = syntax_children(body)
            .into_iter()
            .filter(|c| c.is_named())
            .map(|c| self.stmt(c))
            .collect();
        SyntaxTree::new(statements, self.end_trivia.clone())
    }

    pub(super) fn stmt(&self, node: Node<'_>) -> Stmt {
        let lowered = match node.kind() {
            "block" => self.block(node),
            "if_statement" => self.if_stmt(node),
            "while_statement" => self.while_stmt(node),
            _ => None,
        };
        lowered.unwrap_or_else(|| Stmt::opaque(self.tokens(node)))
    }

    fn block(&self, node: Node<'_>) -> Option<Stmt> {
        let children = syntax_children(node);
        let (open, rest) = children.split_first()?;
        let (close, inner) = rest.split_last()?;
        Some(Stmt::new(StmtKind::Block(BlockStmt {
            open: self.token(*open),
            statements: inner.iter().map(|c| self.stmt(*c)).collect(),
            close: self.token(*close),
        })))
    }

    fn if_stmt(&self, node: Node<'_>) -> Option<Stmt> {
        match syntax_children(node).as_slice() {
            [if_kw, open, condition, close, body] => Some(Stmt::new(StmtKind::If(IfStmt {
                if_token: self.token(*if_kw),
                open_paren: self.token(*open),
                condition: self.expr(*condition),
                close_paren: self.token(*close),
                body: self.stmt(*body),
                else_clause: None,
            }))),
            [if_kw, open, condition, close, body, else_kw, alternative] => {
                Some(Stmt::new(StmtKind::If(IfStmt {
                    if_token: self.token(*if_kw),
                    open_paren: self.token(*open),
                    condition: self.expr(*condition),
                    close_paren: self.token(*close),
                    body: self.stmt(*body),
                    else_clause: Some(ElseClause {
                        else_token: self.token(*else_kw),
                        body: self.stmt(*alternative),
                    }),
                })))
            }
            _ => None,
        }
    }

    fn while_stmt(&self, node: Node<'_>) -> Option<Stmt> {
        match syntax_children(node).as_slice() {
            [while_kw, open, condition, close, body] => {
                Some(Stmt::new(StmtKind::While(WhileStmt {
                    while_token: self.token(*while_kw),
                    open_paren: self.token(*open),
                    condition: self.expr(*condition),
                    close_paren: self.token(*close),
                    body: self.stmt(*body),
                })))
            }
            _ => None,
        }
    }

    pub(super) fn expr(&self, node: Node<'_>) -> Expr {
        let lowered = match node.kind() {
            "binary_expression" => self.logical(node),
            "parenthesized_expression" => self.parenthesized(node),
            _ => None,
        };
        lowered.unwrap_or_else(|| Expr::opaque(self.tokens(node)))
    }

    fn logical(&self, node: Node<'_>) -> Option<Expr> {
        let children = syntax_children(node);
        let [left, operator, right] = children.as_slice() else {
            return None;
        };
        let op = LogicalOperator::from_text(operator.kind())?;
        Some(Expr::new(ExprKind::Logical(LogicalExpr {
            left: self.expr(*left),
            operator: self.token(*operator),
            op,
            right: self.expr(*right),
        })))
    }

    fn parenthesized(&self, node: Node<'_>) -> Option<Expr> {
        let children = syntax_children(node);
        let [open, inner, close] = children.as_slice() else {
            return None;
        };
        Some(Expr::new(ExprKind::Parenthesized(ParenthesizedExpr {
            open: self.token(*open),
            inner: self.expr(*inner),
            close: self.token(*close),
        })))
    }
}

/// Non-comment leaves inside `region`, as byte ranges in source order
fn collect_leaves(node: Node<'_>, region: &Range<usize>, out: &mut Vec<(usize, usize)>) {
    if node.end_byte() <= region.start || node.start_byte() >= region.end {
        return;
    }
    if node.kind() == "comment" {
        return;
    }
    if node.child_count() == 0 {
        if node.start_byte() < node.end_byte() {
            out.push((node.start_byte(), node.end_byte()));
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_leaves(child, region, out);
    }
}
