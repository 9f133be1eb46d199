//! Overload selection as seen through the parser.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulex::ast::{ActionKind, BoundArgument};
use rulex::{ErrorCode, TextSize};

use crate::helpers::catalog_fixtures::order_parser;

// =============================================================================
// METHODS
// =============================================================================

#[rstest]
#[case::normal_form_is_bool("Pick(1, 2)")]
#[case::expanded_form_is_int("Pick(1, 2, 3) > 0")]
#[case::single_argument_expands("Pick(1) > 0")]
#[case::no_arguments_expand_to_empty("Pick() > 0")]
#[case::only_long_params_fit("Mix(1, 3000000000) > 0")]
#[case::static_normal_form("Max(total, 3) > 0")]
#[case::ref_argument("Adjust(ref total)")]
fn test_overload_accepted(#[case] text: &str) {
    let result = order_parser().parse_condition(text);
    assert!(result.is_ok(), "{text}: {:?}", result.err());
}

#[rstest]
#[case::normal_form_wins_over_params("Pick(1, 2) > 0", ErrorCode::E0401, 11)]
#[case::expanded_form_is_not_bool("Pick(1, 2, 3)", ErrorCode::E0402, 0)]
#[case::equal_params_forms("Mix(1) > 0", ErrorCode::E0308, 3)]
#[case::missing_ref("Adjust(total)", ErrorCode::E0307, 6)]
#[case::ref_type_must_match("Adjust(ref weight)", ErrorCode::E0307, 6)]
#[case::unexpected_ref("Raise(ref total) > 0", ErrorCode::E0307, 5)]
fn test_overload_rejected(#[case] text: &str, #[case] code: ErrorCode, #[case] offset: u32) {
    let err = order_parser().parse_condition(text).unwrap_err();
    assert_eq!((err.code, err.offset), (code, TextSize::from(offset)), "{text}");
}

// =============================================================================
// CONSTRUCTORS
// =============================================================================

#[rstest]
#[case::exact_arity("Audit(\"m\")", 0, 1)]
#[case::one_collected("Audit(\"m\", 1)", 1, 2)]
#[case::several_collected("Audit(\"m\", total, Limit, 3)", 1, 2)]
fn test_action_constructor_choice(
    #[case] text: &str,
    #[case] constructor: usize,
    #[case] bound: usize,
) {
    let parsed = order_parser().parse_single_statement(text).unwrap();
    let ActionKind::Custom(custom) = &parsed.action.kind else {
        panic!("expected a custom action, got {:?}", parsed.action.kind);
    };
    assert_eq!(custom.constructor, constructor);
    assert_eq!(custom.arguments.len(), bound);
}

#[test]
fn test_collected_arguments_keep_order() {
    let parsed = order_parser()
        .parse_single_statement("Audit(\"m\", total, Limit, 3)")
        .unwrap();
    let ActionKind::Custom(custom) = &parsed.action.kind else {
        panic!("expected a custom action");
    };
    let BoundArgument::Params(items) = &custom.arguments[1] else {
        panic!("expected collected params");
    };
    assert_eq!(items.len(), 3);
}

#[test]
fn test_object_creation_picks_by_argument_count() {
    let mut parser = order_parser();
    assert!(parser.parse_condition("new Shop.Customer().Vip").is_ok());
    assert!(parser.parse_condition("new Shop.Customer(\"Ann\").Vip").is_ok());
    assert!(parser.parse_condition("new Shop.Customer(null).Vip").is_ok());

    let err = parser
        .parse_condition("new Shop.Customer(\"a\", \"b\").Vip")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::E0309);
}
