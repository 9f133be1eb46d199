//! Statements, update targets and custom actions.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulex::ast::{ActionKind, BoundArgument, Literal, StmtKind};
use rulex::{ErrorCode, TextSize};

use crate::helpers::catalog_fixtures::{order_context, order_parser};
use crate::helpers::tree_assertions::{action_nodes, assert_all_positioned};
use rulex::RuleParser;

fn update_path(text: &str) -> String {
    let parsed = order_parser()
        .parse_single_statement(text)
        .unwrap_or_else(|err| panic!("{text:?} failed: {err}"));
    match parsed.action.kind {
        ActionKind::Update { path } => path,
        other => panic!("expected an update, got {other:?}"),
    }
}

// =============================================================================
// ASSIGNMENT
// =============================================================================

#[rstest]
#[case("total = total + 1")]
#[case("Note = \"checked\"")]
#[case("this.flagged = total > 3")]
#[case("Limit = 10")]
#[case("codes[0] = 4")]
#[case("this[1] = Note")]
#[case("weight = total")]
fn test_assignments(#[case] text: &str) {
    let parsed = order_parser().parse_single_statement(text).unwrap();
    let ActionKind::Statement(stmt) = &parsed.action.kind else {
        panic!("expected a statement");
    };
    assert!(matches!(stmt.kind, StmtKind::Assign { .. }), "{text:?}");
}

#[test]
fn test_expression_statement() {
    let parsed = order_parser().parse_single_statement("Raise(2)").unwrap();
    let ActionKind::Statement(stmt) = &parsed.action.kind else {
        panic!("expected a statement");
    };
    assert!(matches!(stmt.kind, StmtKind::Expression(_)));
    assert_eq!(parsed.positions.get(stmt.id), Some(TextSize::from(0)));
}

#[rstest]
#[case("Customer = null", ErrorCode::E0403, 0)]
#[case("total = \"text\"", ErrorCode::E0403, 6)]
#[case("1 = total", ErrorCode::E0403, 0)]
fn test_invalid_assignments(#[case] text: &str, #[case] code: ErrorCode, #[case] offset: u32) {
    let err = order_parser().parse_single_statement(text).unwrap_err();
    assert_eq!(err.code, code, "{err}");
    assert_eq!(err.offset, TextSize::from(offset));
}

// =============================================================================
// HALT AND UPDATE
// =============================================================================

#[test]
fn test_halt() {
    let parsed = order_parser().parse_single_statement("halt").unwrap();
    assert!(matches!(parsed.action.kind, ActionKind::Halt));
}

#[rstest]
#[case("update(\"this/total\")", "this/total")]
#[case("update(total)", "this/total")]
#[case("update(this.Customer.Vip)", "this/Customer/Vip")]
#[case("update(codes[2])", "this/codes")]
#[case("update(Limit)", "Shop.Order/Limit")]
#[case("update(Adjust(ref total))", "this/total")]
fn test_update_paths(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(update_path(text), expected);
}

#[test]
fn test_update_needs_exactly_one_target() {
    let err = order_parser()
        .parse_single_statement("update(Raise(1))")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::E0501);
    assert_eq!(err.offset, TextSize::from(7));
}

#[test]
fn test_update_needs_parenthesis() {
    let err = order_parser().parse_single_statement("update total").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0204);
}

// =============================================================================
// CUSTOM ACTIONS
// =============================================================================

#[test]
fn test_custom_action_binds_constructor() {
    let (context, types) = order_context();
    let mut parser = RuleParser::new(context);
    let parsed = parser.parse_single_statement("Audit(\"late\")").unwrap();
    let ActionKind::Custom(custom) = &parsed.action.kind else {
        panic!("expected a custom action, got {:?}", parsed.action.kind);
    };
    assert_eq!(custom.ty, types.audit);
    assert_eq!(custom.constructor, 0);
    assert_eq!(custom.arguments.len(), 1);
}

#[test]
fn test_custom_action_collects_params() {
    let parsed = order_parser()
        .parse_single_statement("Shop.Actions.Audit(\"late\", 1, total)")
        .unwrap();
    let ActionKind::Custom(custom) = &parsed.action.kind else {
        panic!("expected a custom action");
    };
    assert_eq!(custom.constructor, 1);
    let BoundArgument::Params(items) = &custom.arguments[1] else {
        panic!("expected collected params, got {:?}", custom.arguments[1]);
    };
    assert_eq!(items.len(), 2);
}

#[test]
fn test_custom_action_null_supplies_params_array() {
    let parsed = order_parser()
        .parse_single_statement("Audit(\"late\", null)")
        .unwrap();
    let ActionKind::Custom(custom) = &parsed.action.kind else {
        panic!("expected a custom action");
    };
    assert_eq!(custom.arguments[1], BoundArgument::Constant(Literal::Null));
}

#[test]
fn test_custom_action_without_matching_constructor() {
    let err = order_parser().parse_single_statement("Audit(5)").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0504);
    assert_eq!(err.offset, TextSize::from(5));
}

#[test]
fn test_non_action_type_is_not_a_custom_action() {
    // read as the expression statement `Shop.Customer`, leaving `(` behind
    let err = order_parser()
        .parse_single_statement("Shop.Customer(\"x\")")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::E0207);
    assert_eq!(err.offset, TextSize::from(13));
}

#[test]
fn test_type_argument_errors_surface_from_statement_start() {
    let err = order_parser()
        .parse_single_statement("Box<int, int>(1)")
        .unwrap_err();
    assert_eq!((err.code, err.offset), (ErrorCode::E0306, TextSize::from(13)));
}

// =============================================================================
// STATEMENT LISTS
// =============================================================================

#[test]
fn test_statement_list_positions() {
    let text = "total = Max(total, 3); Note = \"a\" + Note; Audit(\"x\", total) update(total) halt";
    let parsed = order_parser().parse_statement_list(text).unwrap();
    assert_eq!(parsed.actions.len(), 5);
    for action in &parsed.actions {
        assert!(parsed.positions.contains(action.id));
        assert_all_positioned(action_nodes(action), &parsed.positions);
    }
}

#[test]
fn test_empty_statement_list() {
    let parsed = order_parser().parse_statement_list(" ; ").unwrap_err();
    assert_eq!(parsed.code, ErrorCode::E0209);
}
