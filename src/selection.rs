//! Selected operands of a condition

use crate::error::{Error, Result};
use crate::parse::parse_expression;
use crate::syntax::{print_expr, Expr, NodeId, TextRange, Trivia};

/// Ordered, de-duplicated operands chosen for extraction.
///
/// Operands are kept in source order. `source_text` is the verbatim text
/// from the first operand to the last, including the operators and
/// parentheses between them. Comments trailing the last operand are kept
/// apart and restored by [`to_expression`](Self::to_expression).
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    operands: Vec<Expr>,
    source_text: String,
    trailing: Trivia,
}

impl SelectionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a selection of nodes inside `condition`
    pub fn new(condition: &Expr, operands: impl IntoIterator<Item = Expr>) -> Result<Self> {
        let printed = print_expr(condition);

        let mut selected: Vec<(TextRange, Expr)> = Vec::new();
        for operand in operands {
            let span = printed.span(operand.id()).ok_or_else(|| {
                Error::invalid_selection(format!(
                    "`{}` is not part of the condition",
                    operand.to_string().trim()
                ))
            })?;
            if selected.iter().all(|(_, e)| e.id() != operand.id()) {
                selected.push((span, operand));
            }
        }
        selected.sort_by_key(|(span, _)| span.start);

        let source_text = match (selected.first(), selected.last()) {
            (Some((first, _)), Some((last, _))) => printed
                .slice(TextRange {
                    start: first.start,
                    end: last.end.max(first.start),
                })
                .to_string(),
            _ => String::new(),
        };

        let trailing = selected
            .last()
            .map(|(_, e)| e.trailing_trivia().trim_end())
            .unwrap_or_default();

        Ok(Self {
            operands: selected.into_iter().map(|(_, e)| e).collect(),
            source_text,
            trailing,
        })
    }

    /// Build a selection from node ids inside `condition`
    pub fn from_ids(condition: &Expr, ids: &[NodeId]) -> Result<Self> {
        let operands = ids
            .iter()
            .map(|id| {
                condition
                    .find(*id)
                    .cloned()
                    .ok_or_else(|| Error::invalid_selection(format!("node {} is not in the condition", id)))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(condition, operands)
    }

    pub fn operands(&self) -> &[Expr] {
        &self.operands
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.operands.iter().map(Expr::id).collect()
    }

    pub fn first(&self) -> Option<&Expr> {
        self.operands.first()
    }

    pub fn len(&self) -> usize {
        self.operands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.operands.iter().any(|e| e.id() == id)
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Parse `source_text` into a standalone expression.
    ///
    /// The result ends with the comments that trailed the last operand.
    pub fn to_expression(&self) -> Result<Expr> {
        let expr = parse_expression(&self.source_text)?;
        if self.trailing.is_empty() {
            return Ok(expr);
        }
        Ok(expr.with_trailing_trivia(self.trailing.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::LogicalChain;

    #[test]
    fn test_selection_orders_and_dedups() {
        let cond = parse_expression("a && (b || c) && d").unwrap();
        let chain = LogicalChain::new(&cond).unwrap();
        let ops = chain.operands();

        let selection = SelectionSet::new(
            &cond,
            vec![ops[2].clone(), ops[1].clone(), ops[2].clone()],
        )
        .unwrap();

        assert_eq!(selection.len(), 2);
        assert_eq!(selection.ids(), vec![ops[1].id(), ops[2].id()]);
        assert_eq!(selection.source_text(), "(b || c) && d");
        assert_eq!(selection.to_expression().unwrap().to_string(), "(b || c) && d");
    }

    #[test]
    fn test_selection_keeps_trailing_comment() {
        let cond = parse_expression("a && b /* keep */ && c").unwrap();
        let chain = LogicalChain::new(&cond).unwrap();
        let ops = chain.operands();

        let selection = SelectionSet::new(&cond, vec![ops[0].clone(), ops[1].clone()]).unwrap();
        assert_eq!(selection.source_text(), "a && b");
        assert_eq!(selection.to_expression().unwrap().to_string(), "a && b /* keep */");
    }

    #[test]
    fn test_selection_rejects_foreign_node() {
        let cond = parse_expression("a && b").unwrap();
        let other = parse_expression("a").unwrap();
        let err = SelectionSet::new(&cond, vec![other]).unwrap_err();
        assert!(matches!(err, Error::InvalidSelection(_)));
    }

    #[test]
    fn test_empty_selection() {
        let cond = parse_expression("a && b").unwrap();
        let selection = SelectionSet::new(&cond, Vec::new()).unwrap();
        assert!(selection.is_empty());
        assert_eq!(selection.source_text(), "");
        assert!(SelectionSet::empty().to_expression().is_err());
    }
}
