//! C# front end via tree-sitter
//!
//! Parses statement snippets and standalone expressions into the
//! persistent tree. `if`, `while`, blocks, `&&`/`||` chains and
//! parentheses are lowered structurally; everything else becomes an
//! opaque token run, so printing reproduces the input exactly.

mod lower;

use crate::error::{Error, Result};
use crate::syntax::{Expr, SyntaxTree};
use lower::Lowering;
use std::ops::Range;
use tree_sitter::{Node, Parser, Tree};

/// Snippets are parsed as the body of a method
const PREFIX: &str = "class __Snippet { void __Body() {\n";
const SUFFIX: &str = "\n} }\n";

/// Parse a list of statements (a method body without braces)
pub fn parse_statements(text: &str) -> Result<SyntaxTree> {
    let source = format!("{PREFIX}{text}{SUFFIX}");
    let region = PREFIX.len()..PREFIX.len() + text.len();
    let tree = parse_source(&source, &region)?;

    let body = find_kind(tree.root_node(), "block")
        .ok_or_else(|| Error::Parse("snippet body not found".into()))?;

    let lowering = Lowering::new(&source, region, tree.root_node())?;
    if lowering.token_range(body).end != lowering.token_count() {
        return Err(Error::Parse(
            "statements close the enclosing body; text after it would be lost".into(),
        ));
    }
    Ok(lowering.tree(body))
}

/// Parse a single expression
pub fn parse_expression(text: &str) -> Result<Expr> {
    if text.trim().is_empty() {
        return Err(Error::Parse("empty expression".into()));
    }

    let prefix = format!("{PREFIX}if (");
    let source = format!("{prefix}{text}) {{ }}{SUFFIX}");
    let region = prefix.len()..prefix.len() + text.len();
    let tree = parse_source(&source, &region)?;

    let condition = find_kind(tree.root_node(), "if_statement")
        .and_then(|stmt| {
            stmt.child_by_field_name("condition")
                .or_else(|| lower::syntax_children(stmt).into_iter().find(|n| n.is_named()))
        })
        .ok_or_else(|| Error::Parse(format!("not an expression: `{}`", text)))?;

    let lowering = Lowering::new(&source, region, tree.root_node())?;
    let covered = lowering.token_range(condition);
    if covered.start != 0 || covered.end != lowering.token_count() {
        return Err(Error::Parse(format!("not a single expression: `{}`", text)));
    }

    Ok(lowering.expr(condition))
}

fn parse_source(source: &str, region: &Range<usize>) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .map_err(|e| Error::Parse(format!("Failed to set language: {}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::Parse("Failed to parse source".into()))?;

    if tree.root_node().has_error() {
        return Err(Error::Parse(describe_error(tree.root_node(), source, region)));
    }

    Ok(tree)
}

/// First node of `kind` in pre-order
fn find_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    if node.kind() == kind {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(|child| find_kind(child, kind))
}

fn find_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(find_error)
}

/// Deepest node on the leftmost path of nodes containing an error
fn deepest_error(node: Node<'_>) -> Node<'_> {
    let mut cursor = node.walk();
    let child = node.children(&mut cursor).find(|c| c.has_error());
    match child {
        Some(child) => deepest_error(child),
        None => node,
    }
}

/// Position of the first syntax error, relative to the caller's text
fn describe_error(root: Node<'_>, source: &str, region: &Range<usize>) -> String {
    // Missing tokens inside hidden rules are not reachable as children
    let node = find_error(root).unwrap_or_else(|| deepest_error(root));

    let offset = node.start_byte().clamp(region.start, region.end) - region.start;
    let text = &source[region.clone()];
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let col = offset - before.rfind('\n').map_or(0, |i| i + 1) + 1;

    if node.is_missing() || node.start_byte() == node.end_byte() {
        format!("missing `{}` at {}:{}", node.kind(), line, col)
    } else {
        let near: String = text[offset..].chars().take(20).collect();
        format!("unexpected syntax at {}:{} near `{}`", line, col, near.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{ExprKind, LogicalOperator, StmtKind};

    #[test]
    fn test_parse_if_round_trips() {
        let text = "if (a && b) { x(); }";
        let tree = parse_statements(text).unwrap();
        assert_eq!(tree.to_string(), text);
        assert_eq!(tree.statements().len(), 1);

        let stmt = &tree.statements()[0];
        let cond = stmt.condition().unwrap();
        let logical = cond.as_logical().unwrap();
        assert_eq!(logical.op, LogicalOperator::And);
        assert_eq!(logical.left.to_string(), "a ");
        assert_eq!(logical.right.to_string(), "b");
        assert!(stmt.as_if().unwrap().body.is_block());
    }

    #[test]
    fn test_parse_keeps_comments_and_layout() {
        let text = "// guard\nwhile (ready /* r */ ||\n       done)\n{\n    step();\n}\n";
        let tree = parse_statements(text).unwrap();
        assert_eq!(tree.to_string(), text);

        let stmt = &tree.statements()[0];
        assert!(matches!(stmt.kind(), StmtKind::While(_)));
        assert!(stmt.leading_trivia().has_comments());
    }

    #[test]
    fn test_parse_left_associative_chain() {
        let cond = parse_expression("a || b || c").unwrap();
        let outer = cond.as_logical().unwrap();
        assert_eq!(outer.right.to_string(), "c");
        let inner = outer.left.as_logical().unwrap();
        assert_eq!(inner.op, LogicalOperator::Or);
        assert_eq!(inner.left.to_string(), "a ");
    }

    #[test]
    fn test_parse_mixed_operators_and_parens() {
        let cond = parse_expression("(a || b) && !c.IsEmpty()").unwrap();
        let logical = cond.as_logical().unwrap();
        assert!(matches!(logical.left.kind(), ExprKind::Parenthesized(_)));
        assert!(matches!(logical.right.kind(), ExprKind::Opaque(_)));
        assert_eq!(logical.right.to_string(), "!c.IsEmpty()");
    }

    #[test]
    fn test_parse_expression_rejects_garbage() {
        assert!(matches!(parse_expression("a &&"), Err(Error::Parse(_))));
        assert!(matches!(parse_expression("   "), Err(Error::Parse(_))));
        assert!(matches!(
            parse_expression("a) { } if (b"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_parse_statements_reports_position() {
        let err = parse_statements("x();\nif (a && ) { }").unwrap_err();
        assert!(err.to_string().contains("2:"), "{}", err);
    }

    #[test]
    fn test_parse_statements_reports_missing_operand() {
        let err = parse_statements("if (a && ) { }").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("1:"), "{}", err);
        assert!(!err.to_string().ends_with("syntax error"), "{}", err);
    }

    #[test]
    fn test_parse_statements_rejects_closing_the_body() {
        let err = parse_statements("x(); } void Q() { y();").unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "{}", err);
        assert!(parse_statements("x(); }").is_err());
    }
}
