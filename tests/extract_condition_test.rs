//! Data-driven tests for condition extraction
//!
//! Each case parses a statement, selects operands of its condition by
//! their text and checks the printed result.

use condextract::{
    parse_statements, Error, ExtractCondition, ExtractOptions, Expr, IfStatementAdapter,
    LogicalChain, NestingOrder, SelectionSet, Stmt, SyntaxTree, WhileStatementAdapter,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ============================================================================
// Helpers
// ============================================================================

fn parse_one(text: &str) -> (SyntaxTree, Stmt) {
    let tree = parse_statements(text).unwrap();
    let stmt = tree.statements()[0].clone();
    (tree, stmt)
}

fn operand(stmt: &Stmt, text: &str) -> Expr {
    LogicalChain::new(stmt.condition().unwrap())
        .unwrap()
        .operands()
        .into_iter()
        .find(|o| o.to_string().trim() == text)
        .cloned()
        .unwrap_or_else(|| panic!("`{}` is not an operand", text))
}

fn select(stmt: &Stmt, texts: &[&str]) -> SelectionSet {
    let operands = texts.iter().map(|t| operand(stmt, t));
    SelectionSet::new(stmt.condition().unwrap(), operands).unwrap()
}

fn extract(text: &str, selected: &[&str], options: ExtractOptions) -> condextract::Result<String> {
    let (tree, stmt) = parse_one(text);
    let selection = select(&stmt, selected);
    let result = if text.starts_with("while") {
        ExtractCondition::with_options(WhileStatementAdapter, options)
            .apply(&tree, stmt.id(), &selection)?
    } else {
        ExtractCondition::with_options(IfStatementAdapter, options)
            .apply(&tree, stmt.id(), &selection)?
    };
    Ok(result.expect("statement has a container").to_string())
}

/// Texts of the non-control statements, in order
fn leaf_statements(stmt: &Stmt) -> Vec<String> {
    let children = stmt.child_statements();
    if children.is_empty() && !stmt.is_block() {
        return vec![stmt.to_string().trim().to_string()];
    }
    children.into_iter().flat_map(leaf_statements).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[rstest]
#[case::left_operand("if (a && b) { x(); }", &["a"], "if (a) { if (b) { x(); } }")]
#[case::last_of_or_chain("if (a || b || c) { x(); }", &["c"], "if (c) { if (a || b) { x(); } }")]
#[case::embedded_body("if (a && b) x();", &["a"], "if (a) { if (b) x(); }")]
#[case::middle_operand("while (a && b && c) { x(); }", &["b"], "while (b) { if (a && c) { x(); } }")]
#[case::suffix_run("if (a && b && c) { x(); }", &["b", "c"], "if (b && c) { if (a) { x(); } }")]
#[case::prefix_run("if (a && b && c) { x(); }", &["a", "b"], "if (a && b) { if (c) { x(); } }")]
#[case::middle_run(
    "if (a && b && c && d) { x(); }",
    &["c", "b"],
    "if (b && c) { if (a && d) { x(); } }"
)]
#[case::parenthesized_operand(
    "if ((a || b) && c) { x(); }",
    &["(a || b)"],
    "if ((a || b)) { if (c) { x(); } }"
)]
#[case::body_comment(
    "if (a && b) { // note\n x(); }",
    &["a"],
    "if (a) { // note\nif (b) { x(); } }"
)]
#[case::interior_comment(
    "if (a && b /* keep */ && c) { x(); }",
    &["a", "b"],
    "if (a && b /* keep */) { if (c) { x(); } }"
)]
#[case::comment_on_remaining(
    "if (a && b /* keep */ && c) { x(); }",
    &["c"],
    "if (c) { if (a && b /* keep */) { x(); } }"
)]
fn test_extract_scenarios(#[case] text: &str, #[case] selected: &[&str], #[case] expected: &str) {
    let actual = extract(text, selected, ExtractOptions::default()).unwrap();
    assert_eq!(actual, expected);
}

// ============================================================================
// Multi-line layout
// ============================================================================

#[rstest]
#[case::braces_on_own_lines(
    "if (a &&\n    b &&\n    c)\n{\n    x();\n}",
    &["c"],
    "if (c)\n{\n    if (a &&\n    b)\n    {\n    x();\n    }\n}"
)]
#[case::brace_on_header_line(
    "if (a && b) {\n    x();\n}",
    &["a"],
    "if (a) {\n    if (b) {\n    x();\n    }\n}"
)]
#[case::embedded_on_next_line(
    "if (a && b)\n    x();\ny();\n",
    &["a"],
    "if (a)\n{\n    if (b)\n        x();\n}\ny();\n"
)]
#[case::embedded_while(
    "while (a && b)\n  step();",
    &["b"],
    "while (b)\n{\n  if (a)\n    step();\n}"
)]
fn test_multi_line_layout(#[case] text: &str, #[case] selected: &[&str], #[case] expected: &str) {
    let actual = extract(text, selected, ExtractOptions::default()).unwrap();
    assert_eq!(actual, expected);
    parse_statements(&actual).unwrap();
}

#[rstest]
#[case("if (a && b) { x(); }", &["a"], "if (b) { if (a) { x(); } }")]
#[case("if (a || b || c) { x(); }", &["c"], "if (a || b) { if (c) { x(); } }")]
#[case("while (a && b) x();", &["b"], "while (a) { if (b) x(); }")]
fn test_extracted_inner(#[case] text: &str, #[case] selected: &[&str], #[case] expected: &str) {
    let options = ExtractOptions::default().with_nesting(NestingOrder::ExtractedInner);
    assert_eq!(extract(text, selected, options).unwrap(), expected);
}

#[test]
fn test_surrounding_text_untouched() {
    let text = "y();\n// lead\nif (a && b) { x(); } // tail\nz();\n";
    let tree = parse_statements(text).unwrap();
    let stmt = tree.statements()[1].clone();
    let selection = select(&stmt, &["a"]);

    let result = ExtractCondition::new(IfStatementAdapter)
        .apply(&tree, stmt.id(), &selection)
        .unwrap()
        .unwrap();
    assert_eq!(
        result.to_string(),
        "y();\n// lead\nif (a) { if (b) { x(); } } // tail\nz();\n"
    );
    // The input tree is unchanged
    assert_eq!(tree.to_string(), text);
}

#[test]
fn test_nested_statement_in_block() {
    let text = "{ if (a && b) x(); }";
    let tree = parse_statements(text).unwrap();
    let inner = tree.statements()[0].child_statements()[0].clone();
    let selection = select(&inner, &["b"]);

    let result = ExtractCondition::new(IfStatementAdapter)
        .apply(&tree, inner.id(), &selection)
        .unwrap()
        .unwrap();
    assert_eq!(result.to_string(), "{ if (b) { if (a) x(); } }");
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn test_operand_of_other_statement_rejected() {
    let tree = parse_statements("if (a && b) x(); if (c && d) y();").unwrap();
    let first = &tree.statements()[0];
    let second = &tree.statements()[1];
    let foreign = select(second, &["c"]);

    let err = ExtractCondition::new(IfStatementAdapter)
        .apply(&tree, first.id(), &foreign)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSelection(_)), "{}", err);
}

#[test]
fn test_degenerate_condition_rejected() {
    let (tree, stmt) = parse_one("if (a) { x(); }");
    let condition = stmt.condition().unwrap();
    let selection = SelectionSet::new(condition, vec![condition.clone()]).unwrap();

    let err = ExtractCondition::new(IfStatementAdapter)
        .apply(&tree, stmt.id(), &selection)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSelection(_)));
}

#[rstest]
#[case::gap(&["a", "c"])]
#[case::every_operand(&["a", "b", "c"])]
fn test_invalid_runs_rejected(#[case] selected: &[&str]) {
    let err = extract("if (a && b && c) { x(); }", selected, ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidSelection(_)), "{}", err);
}

#[test]
fn test_operand_of_inner_chain_rejected() {
    // `||` binds loosest: `a && b` is one operand of the `||` chain
    let (tree, stmt) = parse_one("if (a && b || c) { x(); }");
    let condition = stmt.condition().unwrap();
    let and_chain = &condition.as_logical().unwrap().left;
    let a = and_chain.as_logical().unwrap().left.clone();
    let selection = SelectionSet::new(condition, vec![a]).unwrap();

    let err = ExtractCondition::new(IfStatementAdapter)
        .apply(&tree, stmt.id(), &selection)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSelection(_)));
}

#[rstest]
#[case::extracted_outer(NestingOrder::ExtractedOuter)]
#[case::extracted_inner(NestingOrder::ExtractedInner)]
fn test_if_with_else_rejected(#[case] nesting: NestingOrder) {
    let text = "if (a && b) x(); else y();";
    let options = ExtractOptions::default().with_nesting(nesting);
    let err = extract(text, &["a"], options).unwrap_err();
    assert!(matches!(err, Error::UnsupportedStatement(_)), "{}", err);
}

#[test]
fn test_wrong_statement_kind() {
    let (tree, stmt) = parse_one("while (a && b) { x(); }");
    let selection = select(&stmt, &["a"]);

    let err = ExtractCondition::new(IfStatementAdapter)
        .apply(&tree, stmt.id(), &selection)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedStatement(_)));
}

// ============================================================================
// Properties of the edit
// ============================================================================

#[test]
fn test_empty_selection_is_identity() {
    let text = "if (a && b) {\n    x();\n}\n";
    let (tree, stmt) = parse_one(text);
    let refactor = ExtractCondition::new(IfStatementAdapter);

    let same = refactor.extract(&stmt, &SelectionSet::empty()).unwrap();
    assert_eq!(same, stmt);

    let result = refactor
        .apply(&tree, stmt.id(), &SelectionSet::empty())
        .unwrap()
        .unwrap();
    assert_eq!(result.to_string(), text);
}

#[test]
fn test_body_statements_preserved() {
    let text = "if (a && b && c) {\n    x();\n    if (d) y(); else z();\n    w();\n}";
    let (_, stmt) = parse_one(text);
    let before = leaf_statements(&stmt.as_if().unwrap().body);

    let result = ExtractCondition::new(IfStatementAdapter)
        .extract(&stmt, &select(&stmt, &["b"]))
        .unwrap();
    let nested = result.as_if().unwrap().body.child_statements()[0].clone();
    let after = leaf_statements(&nested.as_if().unwrap().body);

    assert_eq!(after, before);
    assert_eq!(before, vec!["x();", "y();", "z();", "w();"]);
}

#[test]
fn test_missing_statement_is_unavailable() {
    let (tree, _) = parse_one("if (a && b) { x(); }");
    let (_, other) = parse_one("if (a && b) { x(); }");
    let selection = select(&other, &["a"]);

    let result = ExtractCondition::new(IfStatementAdapter)
        .apply(&tree, other.id(), &selection)
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_options_from_yaml_drive_nesting() {
    let options = ExtractOptions::from_yaml("nesting: extracted_inner\n").unwrap();
    assert_eq!(
        extract("if (a && b) { x(); }", &["a"], options).unwrap(),
        "if (b) { if (a) { x(); } }"
    );
}
