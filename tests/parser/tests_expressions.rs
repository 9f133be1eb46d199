//! Expression shape, lowering and positions.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulex::ast::{BinaryOp, BoundArgument, ExprKind, IntValue, Literal};
use rulex::metadata::{
    Capabilities, MethodDef, ParamDef, ResolutionContext, TypeDef, TypeId, TypeRef,
};
use rulex::{RuleParser, TextSize};

use crate::helpers::catalog_fixtures::{order_parser, shop_catalog};
use crate::helpers::tree_assertions::{all_nodes, assert_all_positioned};

fn render(text: &str) -> String {
    let mut parser = order_parser();
    let parsed = parser
        .parse_condition(text)
        .unwrap_or_else(|err| panic!("{text:?} failed: {err}"));
    parsed.expr.render(&parser.context().catalog)
}

// =============================================================================
// PRECEDENCE AND LOWERING
// =============================================================================

#[rstest]
#[case("1 + 2 * 3 > 0", "((1 + (2 * 3)) > 0)")]
#[case("1 - 2 - 3 < 0", "(((1 - 2) - 3) < 0)")]
#[case("(total + 1) * 2 > 0", "(((this.total + 1) * 2) > 0)")]
#[case("flagged || total > 1 && flagged", "(this.flagged || ((this.total > 1) && this.flagged))")]
#[case("flagged or not flagged", "(this.flagged || (this.flagged == false))")]
#[case("total % 2 == 0", "((this.total % 2) == 0)")]
#[case("total mod 2 = 0", "((this.total % 2) == 0)")]
#[case("(total & 1) == 1 | flagged", "(((this.total & 1) == 1) | this.flagged)")]
fn test_precedence(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(render(text), expected);
}

#[test]
fn test_multiply_is_right_child_of_add() {
    let parsed = order_parser().parse_condition("1 + 2 * 3 == 7").unwrap();
    let ExprKind::Binary { left, .. } = &parsed.expr.kind else {
        panic!("expected an equality");
    };
    let ExprKind::Binary { op, left: lhs, right } = &left.kind else {
        panic!("expected an addition");
    };
    assert_eq!(*op, BinaryOp::Add);
    assert_eq!(lhs.literal(), Some(&Literal::Int(IntValue::I32(1))));
    assert!(matches!(
        right.kind,
        ExprKind::Binary {
            op: BinaryOp::Multiply,
            ..
        }
    ));
}

#[test]
fn test_not_equal_is_two_equality_checks() {
    let parsed = order_parser().parse_condition("total != 3").unwrap();
    let ExprKind::Binary { left, op, right } = &parsed.expr.kind else {
        panic!("expected a binary node");
    };
    assert_eq!(*op, BinaryOp::ValueEquality);
    assert_eq!(right.literal(), Some(&Literal::Bool(false)));
    assert!(matches!(
        left.kind,
        ExprKind::Binary {
            op: BinaryOp::ValueEquality,
            ..
        }
    ));
}

#[rstest]
#[case("!flagged", "(this.flagged == false)")]
#[case("!!flagged", "((this.flagged == false) == false)")]
#[case("-total < 0", "((0 - this.total) < 0)")]
#[case("total != 3", "((this.total == 3) == false)")]
fn test_unary_lowering(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(render(text), expected);
}

#[test]
fn test_negation_matches_explicit_comparison() {
    assert_eq!(render("!flagged"), render("flagged == false"));
    assert_eq!(render("-total > 1"), render("0 - total > 1"));
}

// =============================================================================
// CASTS
// =============================================================================

#[rstest]
#[case("(long)total > 0", "(((long)this.total) > 0)")]
#[case("(double)total * 2.0 > weight", "((((double)this.total) * 2d) > this.weight)")]
fn test_casts(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(render(text), expected);
}

#[test]
fn test_parenthesised_member_is_not_a_cast() {
    // `total` names a member, so `(total)` is a group
    assert_eq!(render("(total) > 1"), "(this.total > 1)");
}

// =============================================================================
// MEMBERS, CALLS AND CREATION
// =============================================================================

#[rstest]
#[case("this.total > 1", "(this.total > 1)")]
#[case("Note == \"x\"", "(this.Note == \"x\")")]
#[case("Customer.Vip", "this.Customer.Vip")]
#[case("Limit > Max(1, 2)", "(Shop.Order.Limit > Shop.Order.Max(1, 2))")]
#[case("Shop.Order.Limit > 0", "(Shop.Order.Limit > 0)")]
#[case("Raise(1) > total", "(this.Raise(1) > this.total)")]
#[case("this.Describe() == \"order\"", "(this.Describe() == \"order\")")]
#[case("codes[0] > 1", "(this.codes[0] > 1)")]
#[case("this[0] == \"a\"", "(this[0] == \"a\")")]
#[case("get_Item(0) == \"a\"", "(this.get_Item(0) == \"a\")")]
#[case(
    "Shop.Tools.Calc.Clamp(total, 0, 10) == 5",
    "(Shop.Tools.Calc.Clamp(this.total, 0, 10) == 5)"
)]
#[case("Tools.Calc.Clamp(1, 2, 3) == 2", "(Shop.Tools.Calc.Clamp(1, 2, 3) == 2)")]
#[case("Calc.Clamp(1, 2, 3) == 2", "(Shop.Tools.Calc.Clamp(1, 2, 3) == 2)")]
#[case("new Shop.Customer(\"Ann\").Vip", "new Shop.Customer(\"Ann\").Vip")]
#[case(
    "new Shop.Customer.Address().City == \"Oslo\"",
    "(new Shop.Customer.Address().City == \"Oslo\")"
)]
#[case("new Box().Size > 0", "(new Shop.Box().Size > 0)")]
#[case("new Box<int>().Value > 1", "(new Shop.Box<int>().Value > 1)")]
#[case("new int[2] { 1, total }[0] > 0", "(new int[2] { 1, this.total }[0] > 0)")]
#[case("new int[] { 2, 3 }[1] > 0", "(new int[] { 2, 3 }[1] > 0)")]
#[case("new int[] {} == null", "(new int[] {} == null)")]
#[case("Adjust(ref total)", "this.Adjust(ref this.total)")]
fn test_postfix_shapes(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(render(text), expected);
}

#[test]
fn test_unadorned_static_member_targets_the_type() {
    let parsed = order_parser().parse_condition("Limit > 0").unwrap();
    let ExprKind::Binary { left, .. } = &parsed.expr.kind else {
        panic!("expected a comparison");
    };
    let ExprKind::FieldReference { target, .. } = &left.kind else {
        panic!("expected a field reference");
    };
    assert!(matches!(target.kind, ExprKind::TypeReference(_)));
}

// =============================================================================
// POSITIONS
// =============================================================================

#[rstest]
#[case("1 + 2 * 3 > 0")]
#[case("total != 3 && !flagged")]
#[case("-total < Max(1, Limit)")]
#[case("(long)total > 0 || Customer.Vip")]
#[case("new Box<int>().Value > codes[1]")]
#[case("Shop.Tools.Calc.Clamp(total, 0, 10) == 5")]
fn test_every_node_has_a_position(#[case] text: &str) {
    let parsed = order_parser().parse_condition(text).unwrap();
    assert_all_positioned(all_nodes(&parsed.expr), &parsed.positions);
}

#[test]
fn test_binary_node_is_positioned_at_its_operator() {
    let parsed = order_parser().parse_condition("total  >  1").unwrap();
    assert_eq!(parsed.positions.get(parsed.expr.id), Some(TextSize::from(7)));
}

#[test]
fn test_group_is_positioned_at_its_open_paren() {
    let parsed = order_parser().parse_condition("(total + 1) > 0").unwrap();
    let ExprKind::Binary { left, .. } = &parsed.expr.kind else {
        panic!("expected a comparison, got {:?}", parsed.expr.kind);
    };
    assert_eq!(parsed.positions.get(left.id), Some(TextSize::from(0)));
    assert_eq!(parsed.positions.get(parsed.expr.id), Some(TextSize::from(12)));
}

#[test]
fn test_member_node_is_positioned_at_its_name() {
    let parsed = order_parser().parse_condition("this.flagged").unwrap();
    assert_eq!(parsed.positions.get(parsed.expr.id), Some(TextSize::from(5)));
}

// =============================================================================
// CUSTOM EXPRESSIONS

/// The shop catalogue plus `Shop.Rules.Threshold`, a custom expression type
/// built from `(int limit)` or `(int limit, params int[] extra)`.
fn threshold_parser() -> (RuleParser, TypeId) {
    let (mut b, types) = shop_catalog();
    let threshold = b.add_type(
        TypeDef::class("Threshold")
            .in_namespace("Shop.Rules")
            .with_capabilities(Capabilities::RULE_EXPRESSION)
            .with_constructor(MethodDef::constructor().param(ParamDef::new("limit", TypeRef::INT)))
            .with_constructor(
                MethodDef::constructor()
                    .param(ParamDef::new("limit", TypeRef::INT))
                    .param(ParamDef::params("extra", TypeRef::INT)),
            ),
    );
    let context = ResolutionContext::new(Arc::new(b.build()), types.order);
    (RuleParser::new(context), threshold)
}

#[test]
fn test_custom_expression_binds_constructor() {
    let (mut parser, threshold) = threshold_parser();
    let parsed = parser.parse_condition("Threshold(3) == null").unwrap();
    let ExprKind::Binary { left, .. } = &parsed.expr.kind else {
        panic!("expected a comparison, got {:?}", parsed.expr.kind);
    };
    let ExprKind::Custom(custom) = &left.kind else {
        panic!("expected a custom expression, got {:?}", left.kind);
    };
    assert_eq!(custom.ty, threshold);
    assert_eq!(custom.constructor, 0);
    assert_eq!(custom.arguments.len(), 1);
    assert_eq!(parsed.positions.get(left.id), Some(TextSize::from(9)));
}

#[test]
fn test_custom_expression_collects_params() {
    let (mut parser, _) = threshold_parser();
    let parsed = parser
        .parse_condition("Shop.Rules.Threshold(1, 2, total) == null")
        .unwrap();
    assert_all_positioned(all_nodes(&parsed.expr), &parsed.positions);
    let ExprKind::Binary { left, .. } = &parsed.expr.kind else {
        panic!("expected a comparison");
    };
    let ExprKind::Custom(custom) = &left.kind else {
        panic!("expected a custom expression, got {:?}", left.kind);
    };
    assert_eq!(custom.constructor, 1);
    let BoundArgument::Params(items) = &custom.arguments[1] else {
        panic!("expected collected params, got {:?}", custom.arguments[1]);
    };
    assert_eq!(items.len(), 2);
}
