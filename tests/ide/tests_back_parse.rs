//! Backward parsing is independent of whatever precedes the expression.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulex::parser::{tokenize, TokenKind, TokenValue};
use rulex::IntellisenseParser;

use crate::helpers::catalog_fixtures::order_parser;

fn shape(kinds: impl IntoIterator<Item = (TokenKind, TokenValue)>) -> Vec<(TokenKind, TokenValue)> {
    kinds.into_iter().collect()
}

/// Tokens of `expr` as written, without end of input.
fn forward(expr: &str) -> Vec<(TokenKind, TokenValue)> {
    shape(
        tokenize(expr)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::EndOfInput)
            .map(|t| (t.kind, t.value)),
    )
}

/// Tokens back-parsed from `text`, without the trailing `.` and end of input.
fn backward(text: &str) -> Vec<(TokenKind, TokenValue)> {
    let mut suffix = IntellisenseParser::new(text)
        .back_parse()
        .unwrap_or_else(|| panic!("no completion context in {text:?}"));
    assert_eq!(suffix.pop().map(|t| t.kind), Some(TokenKind::EndOfInput));
    assert_eq!(suffix.pop().map(|t| t.kind), Some(TokenKind::Dot));
    shape(suffix.into_iter().map(|t| (t.kind, t.value)))
}

#[rstest]
fn test_back_parse_recovers_expression(
    #[values(
        "this.Customer",
        "Shop.Order",
        "Customer",
        "this.codes",
        "Raise(1)",
        "new Shop.Box<int>()",
        "(total + 1)",
        "this[0]"
    )]
    expr: &str,
    #[values("", "flagged && ", "total > 3 or ", "Max(1, ")] prefix: &str,
) {
    let text = format!("{prefix}{expr}.");
    assert_eq!(backward(&text), forward(expr), "{text}");
}

#[rstest]
fn test_completions_ignore_prefix(
    #[values("this.Customer", "Shop.Order", "Customer", "Raise(1)", "new Shop.Box<int>()")]
    expr: &str,
    #[values("flagged && ", "not ", "Max(1, ")] prefix: &str,
) {
    let mut parser = order_parser();
    let bare = parser.get_completions(&format!("{expr}."));
    let prefixed = parser.get_completions(&format!("{prefix}{expr}."));
    assert!(bare.is_some(), "{expr}");
    assert_eq!(prefixed, bare, "{prefix}{expr}");
}

#[test]
fn test_unbalanced_close_has_no_context() {
    assert_eq!(IntellisenseParser::new("total)].").back_parse(), None);
    assert_eq!(IntellisenseParser::new("a > b).").back_parse(), None);
}

#[test]
fn test_lenient_scan_keeps_prefix_errors_out() {
    // the unterminated string stops the scan, so nothing trails it
    assert_eq!(IntellisenseParser::new("Note == \"x.").back_parse(), None);
}
