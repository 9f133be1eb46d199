//! Symbol tables: shadowing, namespaces, overloaded and ambiguous names.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulex::ast::ExprKind;
use rulex::metadata::{FieldDef, MemberRef, PrimitiveType, ResolutionContext, TypeDef};
use rulex::resolve::{Symbol, SymbolTables};
use rulex::{ErrorCode, RuleParser};

use crate::helpers::catalog_fixtures::{order_context, order_parser, shop_catalog};

// =============================================================================
// SHADOWING
// =============================================================================

#[test]
fn test_member_shadows_global_type() {
    let (context, _) = order_context();
    let tables = SymbolTables::build(&context);

    assert!(matches!(
        tables.lookup("Customer"),
        Some(Symbol::Member(m)) if matches!(m.member, MemberRef::Property { .. })
    ));
    assert!(matches!(
        tables.lookup_type_or_namespace("Customer"),
        Some(Symbol::Type(_))
    ));
}

#[test]
fn test_unqualified_name_parses_as_member() {
    let parsed = order_parser().parse_condition("Customer.Vip").unwrap();
    let ExprKind::FieldReference { target, .. } = &parsed.expr.kind else {
        panic!("expected a field reference");
    };
    assert!(matches!(target.kind, ExprKind::PropertyReference { .. }));
}

#[rstest]
#[case::object_creation("new Customer().Vip", "new Shop.Customer().Vip")]
#[case::nested_creation(
    "new Customer.Address().City == \"Oslo\"",
    "(new Shop.Customer.Address().City == \"Oslo\")"
)]
#[case::cast("(Customer)null == null", "(((Shop.Customer)null) == null)")]
fn test_type_contexts_ignore_members(#[case] text: &str, #[case] expected: &str) {
    let mut parser = order_parser();
    let parsed = parser.parse_condition(text).unwrap();
    assert_eq!(parsed.expr.render(&parser.context().catalog), expected);
}

// =============================================================================
// GLOBAL TABLE
// =============================================================================

#[test]
fn test_namespaces_and_types_are_published() {
    let (context, types) = order_context();
    let tables = SymbolTables::build(&context);

    for name in ["Shop", "Actions", "Tools", "Vendor"] {
        assert!(
            matches!(tables.global().get(name), Some(Symbol::Namespace(_))),
            "{name} should be a namespace"
        );
    }
    assert!(matches!(
        tables.global().get("Calc"),
        Some(Symbol::Type(t)) if t.ty == types.calc
    ));
    let Some(Symbol::OverloadedType(boxes)) = tables.global().get("Box") else {
        panic!("Box and Box<T> should merge");
    };
    assert_eq!(boxes.non_generic().map(|t| t.ty), Some(types.plain_box));
    assert_eq!(boxes.with_arity(1).map(|t| t.ty), Some(types.generic_box));
}

#[test]
fn test_nested_types_are_not_global() {
    let (context, _) = order_context();
    let tables = SymbolTables::build(&context);
    assert_eq!(tables.global().get("Address"), None);
}

#[test]
fn test_private_members_of_this_are_local() {
    let (context, _) = order_context();
    let tables = SymbolTables::build(&context);
    assert!(tables.local().contains_key("secret"));
    assert!(tables.local().contains_key("get_Item"));
    assert!(!tables.local().contains_key("Item"));
}

#[test]
fn test_same_arity_clash_drops_the_name() {
    let (mut b, types) = shop_catalog();
    b.add_type(
        TypeDef::class("Calc")
            .in_namespace("Vendor")
            .in_assembly("vendor")
            .with_field(FieldDef::new("Scale", PrimitiveType::Int32)),
    );
    let context = ResolutionContext::new(Arc::new(b.build()), types.order);
    let tables = SymbolTables::build(&context);
    assert_eq!(tables.global().get("Calc"), None);

    let mut parser = RuleParser::new(context);
    let err = parser.parse_condition("Calc.Clamp(1, 2, 3) > 0").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0301);
    assert!(parser
        .parse_condition("Shop.Tools.Calc.Clamp(1, 2, 3) > 0")
        .is_ok());
}

#[test]
fn test_namespace_members() {
    let (context, types) = order_context();
    let tables = SymbolTables::build(&context);
    let Some(Symbol::Namespace(shop)) = tables.global().get("Shop") else {
        panic!("Shop should be a namespace");
    };
    let shop = tables.namespace(*shop);
    assert!(matches!(shop.find_member("Order"), Some(Symbol::Type(t)) if t.ty == types.order));
    assert!(matches!(shop.find_member("Tools"), Some(Symbol::Namespace(_))));
    assert_eq!(shop.find_member("Calc"), None);
}

#[test]
fn test_qualified_namespace_names() {
    let (context, _) = order_context();
    let tables = SymbolTables::build(&context);
    let Some(Symbol::Namespace(tools)) = tables.global().get("Tools") else {
        panic!("Tools should be a namespace");
    };
    assert_eq!(tables.qualified_name(*tools), "Shop.Tools");
}
