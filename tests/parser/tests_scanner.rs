//! Scanner tests through the public API.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulex::ast::IntValue;
use rulex::parser::{tokenize, tokenize_lenient, TokenKind, TokenValue};
use rulex::{ErrorCode, TextSize};

fn single_value(text: &str) -> TokenValue {
    let tokens = tokenize(text).unwrap();
    assert_eq!(tokens.len(), 2, "expected one token for {text:?}: {tokens:?}");
    tokens[0].value.clone()
}

// =============================================================================
// NUMERIC WIDTHS
// =============================================================================

#[rstest]
#[case("2147483647", IntValue::I32(2147483647))]
#[case("2147483648", IntValue::I64(2147483648))]
#[case("9223372036854775807", IntValue::I64(i64::MAX))]
#[case("18446744073709551615", IntValue::U64(u64::MAX))]
#[case("0xFF", IntValue::I32(255))]
#[case("0xFFFFFFFF", IntValue::I64(0xFFFF_FFFF))]
#[case("7u", IntValue::U32(7))]
#[case("7L", IntValue::I64(7))]
#[case("7UL", IntValue::U64(7))]
fn test_integer_widths(#[case] text: &str, #[case] expected: IntValue) {
    assert_eq!(single_value(text), TokenValue::Int(expected));
}

#[test]
fn test_real_suffixes() {
    assert_eq!(single_value("1.5f"), TokenValue::Float(1.5));
    assert_eq!(single_value("1.5"), TokenValue::Double(1.5));
    assert!(matches!(single_value("1.5m"), TokenValue::Decimal(_)));
}

// =============================================================================
// STRINGS
// =============================================================================

#[test]
fn test_verbatim_string_doubles_quotes() {
    assert_eq!(single_value(r#"@"a""b""#), TokenValue::String("a\"b".into()));
}

#[test]
fn test_unicode_escape() {
    assert_eq!(single_value(r#""\u0041b""#), TokenValue::String("Ab".into()));
}

// =============================================================================
// KEYWORDS
// =============================================================================

#[test]
fn test_keywords_are_case_insensitive_except_after_dot() {
    let kinds: Vec<TokenKind> = tokenize("THIS.new Or x")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::This,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::Or,
            TokenKind::Identifier,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_identifiers_with_digits_are_not_keywords() {
    let tokens = tokenize("or2 _and").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
}

// =============================================================================
// LENIENT SCANNING
// =============================================================================

#[test]
fn test_lenient_scan_replaces_error_with_illegal_token() {
    let tokens = tokenize_lenient("this.total > \"open");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::This,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::Greater,
            TokenKind::Illegal,
            TokenKind::EndOfInput,
        ]
    );
    assert_eq!(tokens[4].offset, TextSize::from(13));
}

#[test]
fn test_strict_scan_reports_position() {
    let err = tokenize("total > 0xZZ").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0107);
    assert_eq!(err.offset, TextSize::from(8));
}

#[test]
fn test_offsets_never_decrease() {
    let tokens = tokenize("Shop.Order.Max(1, total) >= 2 && !flagged").unwrap();
    assert!(tokens.windows(2).all(|w| w[0].offset <= w[1].offset));
}
