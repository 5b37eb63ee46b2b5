//! Binary logical chains and operand removal
//!
//! `a && b && c` parses as `(a && b) && c`: a left-leaning spine of
//! same-operator nodes. [`LogicalChain`] is a flattening view over that
//! spine; the tree itself stays nested. Operands are the spine's leaves,
//! and a child of the other operator (or a parenthesized chain) is an
//! opaque operand.

use crate::error::{Error, Result};
use crate::selection::SelectionSet;
use crate::syntax::{Expr, LogicalExpr, LogicalOperator, NodeId, Token};
use tracing::{debug, trace};

/// Flattened view of a same-operator chain rooted at a condition
#[derive(Debug, Clone, Copy)]
pub struct LogicalChain<'a> {
    root: &'a Expr,
    op: LogicalOperator,
}

/// One operand of a chain with its position context
#[derive(Debug, Clone, Copy)]
pub struct ChainLink<'a> {
    /// The operand itself
    pub operand: &'a Expr,
    /// Operator token in front of the operand (`None` for the leftmost)
    pub operator: Option<&'a Token>,
    /// Spine node holding the operand as a direct child
    pub parent: &'a Expr,
}

/// Shape of a contiguous run of selected operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunShape {
    /// Ends at the rightmost operand
    Suffix,
    /// Starts at the leftmost operand
    Prefix,
    /// Touches neither end
    Middle,
}

impl<'a> LogicalChain<'a> {
    /// `None` when the condition is not a logical expression
    pub fn new(condition: &'a Expr) -> Option<Self> {
        let op = condition.as_logical()?.op;
        Some(Self {
            root: condition,
            op,
        })
    }

    pub fn root(&self) -> &'a Expr {
        self.root
    }

    pub fn operator(&self) -> LogicalOperator {
        self.op
    }

    fn spine_node(&self, expr: &'a Expr) -> Option<&'a LogicalExpr> {
        expr.as_logical().filter(|l| l.op == self.op)
    }

    /// Spine nodes from the deepest (leftmost) up to the root
    fn spine(&self) -> Vec<&'a Expr> {
        let mut spine = vec![self.root];
        let mut current = self.root;
        while let Some(left) = self
            .spine_node(current)
            .map(|l| &l.left)
            .filter(|left| self.spine_node(*left).is_some())
        {
            spine.push(left);
            current = left;
        }
        spine.reverse();
        spine
    }

    /// Operands with their operator and parent, left to right
    pub fn links(&self) -> Vec<ChainLink<'a>> {
        let mut links = Vec::new();
        for (i, node) in self.spine().into_iter().enumerate() {
            let Some(logical) = self.spine_node(node) else {
                continue;
            };
            if i == 0 {
                links.push(ChainLink {
                    operand: &logical.left,
                    operator: None,
                    parent: node,
                });
            }
            links.push(ChainLink {
                operand: &logical.right,
                operator: Some(&logical.operator),
                parent: node,
            });
        }
        links
    }

    /// Operands, left to right
    pub fn operands(&self) -> Vec<&'a Expr> {
        self.links().into_iter().map(|l| l.operand).collect()
    }

    pub fn len(&self) -> usize {
        self.spine().len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn position_of(&self, operand: NodeId) -> Option<usize> {
        self.links().iter().position(|l| l.operand.id() == operand)
    }

    pub fn contains(&self, operand: NodeId) -> bool {
        self.position_of(operand).is_some()
    }

    pub fn is_leftmost(&self, operand: NodeId) -> bool {
        self.position_of(operand) == Some(0)
    }

    pub fn is_rightmost(&self, operand: NodeId) -> bool {
        self.position_of(operand) == Some(self.len() - 1)
    }

    /// Whether `node` is the entire condition
    pub fn is_whole_condition(&self, node: NodeId) -> bool {
        self.root.id() == node
    }

    /// Spine node holding `operand` as a direct child
    pub fn parent_of(&self, operand: NodeId) -> Option<&'a Expr> {
        self.links()
            .into_iter()
            .find(|l| l.operand.id() == operand)
            .map(|l| l.parent)
    }

    /// Classify selected operands as a contiguous run.
    ///
    /// Rejects operands outside the chain, gaps, and runs covering every
    /// operand.
    pub fn run_shape(&self, operands: &[NodeId]) -> Result<RunShape> {
        let mut positions = operands
            .iter()
            .map(|id| {
                self.position_of(*id).ok_or_else(|| {
                    Error::invalid_selection(format!(
                        "operand {} is not part of the `{}` chain",
                        id, self.op
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        positions.sort_unstable();
        positions.dedup();

        let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else {
            return Err(Error::invalid_selection("no operands selected"));
        };
        if last - first + 1 != positions.len() {
            return Err(Error::invalid_selection(
                "selected operands are not contiguous",
            ));
        }
        if positions.len() == self.len() {
            return Err(Error::invalid_selection(
                "cannot remove every operand of the condition",
            ));
        }

        Ok(if last == self.len() - 1 {
            RunShape::Suffix
        } else if first == 0 {
            RunShape::Prefix
        } else {
            RunShape::Middle
        })
    }
}

/// Remove one operand from `condition`.
///
/// The operand's position decides the survivor: a left operand leaves its
/// parent's right side, a right operand leaves the left side. When the
/// parent is the whole condition the survivor's trailing whitespace is
/// trimmed. Only operands of the condition's own chain can be removed.
pub fn remove_operand(condition: &Expr, operand: NodeId) -> Result<Expr> {
    let chain = LogicalChain::new(condition).ok_or_else(|| {
        Error::invalid_selection("condition has a single operand; nothing would remain")
    })?;
    // Nodes nested in an operand would be cut out of that operand instead
    let parent = chain.parent_of(operand).ok_or_else(|| {
        Error::invalid_selection(format!(
            "operand {} is not part of the `{}` chain",
            operand,
            chain.operator()
        ))
    })?;
    let logical = parent.as_logical().ok_or_else(|| {
        Error::invalid_selection(format!(
            "operand {} is not a child of a logical expression",
            operand
        ))
    })?;

    let replacement = if logical.left.id() == operand {
        trace!(%operand, "removing left operand, keeping right sibling");
        logical.right.clone()
    } else if parent.id() == condition.id() {
        trace!(%operand, "removing right operand of the whole condition");
        return Ok(logical.left.trim_trailing_trivia());
    } else {
        trace!(%operand, "removing right operand of a nested node");
        logical.left.clone()
    };

    condition
        .replace(parent.id(), &replacement)
        .ok_or_else(|| Error::invalid_selection(format!("operand {} is not in the condition", operand)))
}

/// Remove a contiguous run of operands from the condition's chain.
///
/// A run that ends at the rightmost operand leaves exactly the left child
/// of the first selected operand's parent. Other runs re-join the
/// surviving operands with the operator tokens that preceded them.
pub fn remove_operands(condition: &Expr, selection: &SelectionSet) -> Result<Expr> {
    let chain = LogicalChain::new(condition).ok_or_else(|| {
        Error::invalid_selection("condition has a single operand; nothing would remain")
    })?;
    let ids = selection.ids();
    let shape = chain.run_shape(&ids)?;
    debug!(?shape, selected = ids.len(), "removing operand run");

    let links = chain.links();
    let positions: Vec<usize> = ids.iter().filter_map(|id| chain.position_of(*id)).collect();
    let (Some(&first), Some(&last)) = (positions.iter().min(), positions.iter().max()) else {
        return Err(Error::invalid_selection("no operands selected"));
    };

    if shape == RunShape::Suffix {
        let parent = links[first].parent;
        let logical = parent
            .as_logical()
            .ok_or_else(|| Error::invalid_selection("selected operand has no logical parent"))?;
        return Ok(logical.left.trim_trailing_trivia());
    }

    // The prefix in front of the run is a spine subtree; reuse it as is.
    let mut remaining = links[last + 1..].iter();
    let mut acc = if first > 0 {
        links[first]
            .parent
            .as_logical()
            .map(|l| l.left.clone())
            .ok_or_else(|| Error::invalid_selection("selected operand has no logical parent"))?
    } else {
        match remaining.next() {
            Some(link) => link.operand.clone(),
            None => return Err(Error::invalid_selection("nothing would remain")),
        }
    };

    for link in remaining {
        let operator = link
            .operator
            .cloned()
            .unwrap_or_else(|| Token::new(chain.operator().as_str()));
        acc = Expr::logical_with_token(acc, operator, chain.operator(), link.operand.clone());
    }

    Ok(acc.trim_trailing_trivia())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_expression;
    use crate::syntax::ExprKind;

    fn operand<'a>(chain: &LogicalChain<'a>, text: &str) -> &'a Expr {
        chain
            .operands()
            .into_iter()
            .find(|o| o.to_string().trim() == text)
            .unwrap()
    }

    #[test]
    fn test_operands_left_to_right() {
        let cond = parse_expression("a && b && (c || d) && e || f").unwrap();
        // `||` binds loosest: the root chain is [a && b && (c || d) && e, f]
        let chain = LogicalChain::new(&cond).unwrap();
        assert_eq!(chain.operator(), LogicalOperator::Or);
        assert_eq!(chain.len(), 2);

        let and_chain = LogicalChain::new(chain.operands()[0]).unwrap();
        let texts: Vec<String> = and_chain
            .operands()
            .iter()
            .map(|o| o.to_string().trim().to_string())
            .collect();
        assert_eq!(texts, vec!["a", "b", "(c || d)", "e"]);
    }

    #[test]
    fn test_positional_queries() {
        let cond = parse_expression("a && b && c").unwrap();
        let chain = LogicalChain::new(&cond).unwrap();
        let a = operand(&chain, "a");
        let c = operand(&chain, "c");

        assert!(chain.is_leftmost(a.id()));
        assert!(!chain.is_leftmost(c.id()));
        assert!(chain.is_rightmost(c.id()));
        assert!(chain.is_whole_condition(cond.id()));
        assert!(!chain.is_whole_condition(a.id()));
        assert_eq!(chain.parent_of(c.id()).map(Expr::id), Some(cond.id()));
    }

    #[test]
    fn test_remove_nested_right_operand_keeps_trivia() {
        let cond = parse_expression("a && b && c").unwrap();
        let chain = LogicalChain::new(&cond).unwrap();
        let b = operand(&chain, "b");
        assert_eq!(remove_operand(&cond, b.id()).unwrap().to_string(), "a && c");
    }

    #[test]
    fn test_remove_top_right_operand_trims() {
        let cond = parse_expression("a || b /* x */ || c").unwrap();
        let chain = LogicalChain::new(&cond).unwrap();
        let c = operand(&chain, "c");
        assert_eq!(
            remove_operand(&cond, c.id()).unwrap().to_string(),
            "a || b /* x */"
        );
    }

    #[test]
    fn test_remove_operand_outside_chain_rejected() {
        let cond = parse_expression("a && (b || c)").unwrap();
        let ExprKind::Parenthesized(group) = cond.as_logical().unwrap().right.kind() else {
            panic!("expected a parenthesized operand");
        };
        let b = &group.inner.as_logical().unwrap().left;
        let err = remove_operand(&cond, b.id()).unwrap_err();
        assert!(matches!(err, Error::InvalidSelection(_)), "{}", err);

        let cond = parse_expression("a && b || c").unwrap();
        let chain = LogicalChain::new(&cond).unwrap();
        let and_chain = LogicalChain::new(chain.operands()[0]).unwrap();
        let a = and_chain.operands()[0];
        assert!(remove_operand(&cond, a.id()).is_err());
    }

    #[test]
    fn test_remove_single_operand_condition_rejected() {
        let cond = parse_expression("a").unwrap();
        let err = remove_operand(&cond, cond.id()).unwrap_err();
        assert!(matches!(err, Error::InvalidSelection(_)));
    }

    #[test]
    fn test_run_shape() {
        let cond = parse_expression("a && b && c && d").unwrap();
        let chain = LogicalChain::new(&cond).unwrap();
        let id = |t: &str| operand(&chain, t).id();

        assert_eq!(chain.run_shape(&[id("c"), id("d")]).unwrap(), RunShape::Suffix);
        assert_eq!(chain.run_shape(&[id("b"), id("a")]).unwrap(), RunShape::Prefix);
        assert_eq!(chain.run_shape(&[id("b"), id("c")]).unwrap(), RunShape::Middle);
        assert!(chain.run_shape(&[id("a"), id("c")]).is_err());
        assert!(chain
            .run_shape(&[id("a"), id("b"), id("c"), id("d")])
            .is_err());
    }
}
