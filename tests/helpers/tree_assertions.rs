//! Assertions over parsed trees.

use rulex::ast::{Expr, RuleAction};
use rulex::base::PositionMap;

/// Every expression in `expr`, parents before children.
pub fn all_nodes(expr: &Expr) -> Vec<&Expr> {
    let mut out = vec![expr];
    for child in expr.children() {
        out.extend(all_nodes(child));
    }
    out
}

/// Every expression reachable from `action`.
pub fn action_nodes(action: &RuleAction) -> Vec<&Expr> {
    action.expressions().into_iter().flat_map(all_nodes).collect()
}

#[track_caller]
pub fn assert_all_positioned<'a>(
    nodes: impl IntoIterator<Item = &'a Expr>,
    positions: &PositionMap,
) {
    for node in nodes {
        assert!(
            positions.contains(node.id),
            "node {:?} has no recorded position: {:?}",
            node.id,
            node.kind
        );
    }
}
