//! Smoke test to verify basic functionality

use condextract::{
    parse_statements, ExtractConditionFromIf, ExtractConditionFromWhile, IfStatementAdapter,
    SelectionSet, WhileStatementAdapter,
};

#[test]
fn smoke_test_extract_from_if() {
    let tree = parse_statements("if (ready && valid) { run(); }").unwrap();
    let stmt = &tree.statements()[0];
    let condition = stmt.condition().unwrap();
    let ready = condition.as_logical().unwrap().left.clone();
    let selection = SelectionSet::new(condition, vec![ready]).unwrap();

    let refactor = ExtractConditionFromIf::new(IfStatementAdapter);
    assert_eq!(refactor.title(), "Extract condition from 'if'");

    let result = refactor.apply(&tree, stmt.id(), &selection).unwrap().unwrap();
    assert_eq!(
        result.to_string(),
        "if (ready) { if (valid) { run(); } }"
    );
}

#[test]
fn smoke_test_extract_from_while() {
    let tree = parse_statements("while (more || retry) step();").unwrap();
    let stmt = &tree.statements()[0];
    let condition = stmt.condition().unwrap();
    let retry = condition.as_logical().unwrap().right.clone();
    let selection = SelectionSet::new(condition, vec![retry]).unwrap();

    let refactor = ExtractConditionFromWhile::new(WhileStatementAdapter);
    let result = refactor.apply(&tree, stmt.id(), &selection).unwrap().unwrap();
    assert_eq!(
        result.to_string(),
        "while (retry) { if (more) step(); }"
    );
}
