//! Error codes and positions: one error per failed parse.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulex::metadata::{Capabilities, MethodDef, ParamDef, ResolutionContext, TypeDef, TypeRef};
use rulex::{ErrorCode, RuleParser, TextSize};

use crate::helpers::catalog_fixtures::{order_parser, shop_catalog};

#[rstest]
// syntax
#[case("total +", ErrorCode::E0206, 7)]
#[case("(total > 1", ErrorCode::E0201, 10)]
#[case("codes[0 > 1", ErrorCode::E0202, 11)]
#[case("this. > 1", ErrorCode::E0205, 6)]
#[case("flagged flagged", ErrorCode::E0207, 8)]
#[case("", ErrorCode::E0208, 0)]
#[case("> 1", ErrorCode::E0209, 0)]
#[case("new Shop.Order", ErrorCode::E0204, 14)]
#[case("new 5", ErrorCode::E0211, 4)]
#[case("new int[] == null", ErrorCode::E0502, 0)]
#[case("new int[2] { 1, 2", ErrorCode::E0203, 17)]
// resolution
#[case("nothing > 1", ErrorCode::E0301, 0)]
#[case("Shop.Nope", ErrorCode::E0302, 5)]
#[case("this.nope", ErrorCode::E0303, 5)]
#[case("Shop.Customer<int>", ErrorCode::E0305, 13)]
#[case("new Box<int, int>() == null", ErrorCode::E0306, 17)]
#[case("(Box<int, int>)null == null", ErrorCode::E0306, 14)]
#[case("Shop", ErrorCode::E0901, 4)]
#[case("Mix(1, 2) > 0", ErrorCode::E0308, 3)]
#[case("Raise() > 0", ErrorCode::E0307, 5)]
// reported by the type oracle
#[case("this.Raise(\"x\") > 0", ErrorCode::E0307, 10)]
#[case("this.Mix(1, 2) > 0", ErrorCode::E0308, 8)]
#[case("total > \"x\"", ErrorCode::E0401, 6)]
#[case("total + 1", ErrorCode::E0402, 0)]
#[case("new Shop.Customer(1).Vip", ErrorCode::E0309, 17)]
// lexical
#[case("total > 'ab'", ErrorCode::E0103, 8)]
#[case("total # 1", ErrorCode::E0101, 6)]
fn test_condition_errors(#[case] text: &str, #[case] code: ErrorCode, #[case] offset: u32) {
    let err = order_parser().parse_condition(text).unwrap_err();
    assert_eq!((err.code, err.offset), (code, TextSize::from(offset)), "{text:?}: {err}");
}

#[test]
fn test_error_message_names_the_member() {
    let err = order_parser().parse_condition("this.nope").unwrap_err();
    assert!(err.message.contains("nope"), "{}", err.message);
    assert!(err.message.contains("Shop.Order"), "{}", err.message);
}

#[test]
fn test_parser_is_reusable_after_an_error() {
    let mut parser = order_parser();
    assert!(parser.parse_condition("this.nope").is_err());
    assert!(parser.parse_condition("this.total > 1").is_ok());
}

#[test]
fn test_custom_expression_without_matching_constructor() {
    let (mut b, types) = shop_catalog();
    b.add_type(
        TypeDef::class("Threshold")
            .in_namespace("Shop.Rules")
            .with_capabilities(Capabilities::RULE_EXPRESSION)
            .with_constructor(MethodDef::constructor().param(ParamDef::new("limit", TypeRef::INT))),
    );
    let context = ResolutionContext::new(Arc::new(b.build()), types.order);
    let err = RuleParser::new(context)
        .parse_condition("Threshold(\"x\") == null")
        .unwrap_err();
    assert_eq!((err.code, err.offset), (ErrorCode::E0503, TextSize::from(9)));
    assert!(err.message.contains("Threshold"), "{}", err.message);
}

#[test]
fn test_abstract_types_are_not_created() {
    let (mut b, types) = shop_catalog();
    b.add_type(
        TypeDef::class("Shape")
            .in_namespace("Shop")
            .abstract_type()
            .with_constructor(MethodDef::constructor()),
    );
    let context = ResolutionContext::new(Arc::new(b.build()), types.order);
    let err = RuleParser::new(context)
        .parse_condition("new Shape() == null")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::E0310);
}
