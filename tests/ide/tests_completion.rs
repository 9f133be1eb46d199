//! Completion sets for the shop domain.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulex::ide::CompletionTarget;
use rulex::{CompletionItem, CompletionKind};

use crate::helpers::catalog_fixtures::order_parser;

fn complete(text: &str) -> Vec<CompletionItem> {
    order_parser()
        .get_completions(text)
        .unwrap_or_else(|| panic!("no completions for {text:?}"))
}

fn labels(text: &str) -> Vec<String> {
    complete(text).into_iter().map(|i| i.label.to_string()).collect()
}

fn find(items: &[CompletionItem], label: &str) -> CompletionItem {
    items
        .iter()
        .find(|i| i.label == label)
        .cloned()
        .unwrap_or_else(|| panic!("no item {label}"))
}

// =============================================================================
// LABELS
// =============================================================================

#[rstest]
#[case::instance_members(
    "this.",
    &["Adjust", "Customer", "Describe", "Mix", "Note", "Pick", "Raise", "codes", "flagged",
      "get_Item", "secret", "set_Item", "total", "weight"]
)]
#[case::after_a_condition("total > 1 && this.Customer.", &["Name", "Vip"])]
#[case::unadorned_property("Customer.", &["Name", "Vip"])]
#[case::static_members("Shop.Order.", &["Limit", "Max"])]
#[case::nested_types("Shop.Customer.", &["Address"])]
#[case::namespace("Shop.", &["Actions", "Box", "Box", "Customer", "Order", "Tools"])]
#[case::nested_namespace("Shop.Tools.", &["Calc", "OrderExtensions"])]
#[case::other_assembly("Vendor.", &["Supplier"])]
#[case::overloads("this.Pick(", &["Pick", "Pick"])]
#[case::unadorned_call("Raise(", &["Raise"])]
#[case::static_call("Shop.Tools.Calc.Clamp(", &["Clamp"])]
#[case::constructors("new Shop.Customer(", &["Customer", "Customer"])]
#[case::root_t("t", &["Tools", "this", "total", "true"])]
#[case::root_upper_t("T", &["Tools", "this", "total", "true"])]
#[case::root_c("c", &["Calc", "Customer", "char", "codes"])]
fn test_completion_labels(#[case] text: &str, #[case] expected: &[&str]) {
    assert_eq!(labels(text), expected);
}

#[rstest]
#[case::partial_member("x.a")]
#[case::complete_identifier("total")]
#[case::multi_letter_root("to")]
#[case::operator("total >")]
#[case::empty("")]
fn test_no_completion_point(#[case] text: &str) {
    assert_eq!(order_parser().get_completions(text), None);
}

// =============================================================================
// ITEMS
// =============================================================================

#[test]
fn test_member_kinds_and_details() {
    let items = complete("this.");
    let total = find(&items, "total");
    assert_eq!(total.kind, CompletionKind::Field);
    assert_eq!(total.detail.as_deref(), Some("int"));

    let customer = find(&items, "Customer");
    assert_eq!(customer.kind, CompletionKind::Property);
    assert_eq!(customer.detail.as_deref(), Some("Shop.Customer"));

    let raise = find(&items, "Raise");
    assert_eq!(raise.kind, CompletionKind::Method);
    assert_eq!(raise.detail.as_deref(), Some("int Raise(by)"));

    let describe = find(&items, "Describe");
    assert_eq!(describe.detail.as_deref(), Some("string Describe()"));
}

#[test]
fn test_overload_details() {
    let mut details: Vec<_> = complete("this.Pick(")
        .into_iter()
        .filter_map(|i| i.detail)
        .collect();
    details.sort();
    assert_eq!(details, vec!["bool Pick(a, b)", "int Pick(params all)"]);
}

#[test]
fn test_constructor_details() {
    let items = complete("new Shop.Customer(");
    assert!(items.iter().all(|i| i.kind == CompletionKind::Constructor));
    let mut details: Vec<_> = items.into_iter().filter_map(|i| i.detail).collect();
    details.sort();
    assert_eq!(details, vec!["Customer()", "Customer(name)"]);
}

#[test]
fn test_root_items_shadowed_by_members() {
    let items = complete("c");
    assert_eq!(find(&items, "Customer").kind, CompletionKind::Property);
    assert_eq!(find(&items, "char").kind, CompletionKind::Keyword);
    assert_eq!(find(&items, "Calc").kind, CompletionKind::Type);
}

#[test]
fn test_namespace_items() {
    let items = complete("Shop.");
    let tools = find(&items, "Tools");
    assert_eq!(tools.kind, CompletionKind::Namespace);
    assert_eq!(tools.detail.as_deref(), Some("namespace Shop.Tools"));
    assert!(matches!(tools.target, CompletionTarget::Namespace(_)));

    let order = find(&items, "Order");
    assert_eq!(order.detail.as_deref(), Some("Shop.Order"));
}

#[test]
fn test_private_nested_type_hidden() {
    let items = complete("Shop.Customer.");
    assert!(items.iter().all(|i| i.label != "Secret"));
}

#[test]
fn test_completion_does_not_disturb_parsing() {
    let mut parser = order_parser();
    assert!(parser.get_completions("this.").is_some());
    assert!(parser.parse_condition("this.total > 1").is_ok());
    assert!(parser.get_completions("this.").is_some());
}
