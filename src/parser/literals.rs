//! Literal scanning callbacks for the logos lexer.
//!
//! Numbers, strings, verbatim strings and character literals are scanned by
//! hand once logos has matched their first character(s); the callbacks bump
//! the lexer over the rest of the literal and return its value.

use std::str::FromStr;

use bitflags::bitflags;
use logos::Lexer;
use rust_decimal::Decimal;
use smol_str::SmolStr;

use super::lexer::{LexError, RawToken};
use super::token::TokenValue;
use crate::ast::IntValue;

bitflags! {
    /// Numeric literal suffix flags. Valid combinations are `U`, `L`, `UL`
    /// (in either order), `F`, `D` and `M`, all case-insensitive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NumberKind: u8 {
        const UNSIGNED = 1 << 0;
        const LONG = 1 << 1;
        const FLOAT = 1 << 2;
        const DOUBLE = 1 << 3;
        const DECIMAL = 1 << 4;

        const INTEGRAL = Self::UNSIGNED.bits() | Self::LONG.bits();
        const REAL = Self::FLOAT.bits() | Self::DOUBLE.bits() | Self::DECIMAL.bits();
    }
}

impl NumberKind {
    /// Parse a suffix such as `ul` or `M`. Returns `None` for invalid suffixes.
    pub fn from_suffix(suffix: &str) -> Option<NumberKind> {
        let mut kind = NumberKind::empty();
        for c in suffix.chars() {
            let flag = match c.to_ascii_lowercase() {
                'u' => NumberKind::UNSIGNED,
                'l' => NumberKind::LONG,
                'f' => NumberKind::FLOAT,
                'd' => NumberKind::DOUBLE,
                'm' => NumberKind::DECIMAL,
                _ => return None,
            };
            if kind.contains(flag) {
                return None;
            }
            kind |= flag;
        }
        let valid = NumberKind::INTEGRAL.contains(kind)
            || kind == NumberKind::FLOAT
            || kind == NumberKind::DOUBLE
            || kind == NumberKind::DECIMAL;
        valid.then_some(kind)
    }

    /// Apply the width rule to an integer value.
    fn integer(self, value: u64) -> IntValue {
        let unsigned = self.contains(NumberKind::UNSIGNED);
        let long = self.contains(NumberKind::LONG);
        match (unsigned, long) {
            (false, false) => IntValue::unsuffixed(value),
            (true, false) => u32::try_from(value)
                .map(IntValue::U32)
                .unwrap_or(IntValue::U64(value)),
            (false, true) => i64::try_from(value)
                .map(IntValue::I64)
                .unwrap_or(IntValue::U64(value)),
            (true, true) => IntValue::U64(value),
        }
    }
}

// =============================================================================
// NUMBERS
// =============================================================================

/// Callback for `[0-9]` and `\.[0-9]`.
pub(super) fn number(lex: &mut Lexer<'_, RawToken>) -> Result<TokenValue, LexError> {
    let start = lex.slice();
    let rest = lex.remainder().as_bytes();
    let hex = start == "0" && matches!(rest.first(), Some(b'x' | b'X'));
    let len = if hex {
        1 + rest[1..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric())
            .count()
    } else {
        scan_decimal(start.starts_with('.'), rest)
    };
    lex.bump(len);
    let text = lex.slice();
    if hex {
        hex_value(&text[2..])
    } else {
        decimal_value(text)
    }
}

fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of the remainder of a decimal literal: digits, an optional
/// fraction, an optional exponent and a trailing suffix run.
fn scan_decimal(has_fraction: bool, rest: &[u8]) -> usize {
    let mut i = digits(rest);
    if !has_fraction
        && rest.get(i) == Some(&b'.')
        && rest.get(i + 1).is_some_and(u8::is_ascii_digit)
    {
        i += 1;
        i += digits(&rest[i..]);
    }
    if matches!(rest.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(rest.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if rest.get(j).is_some_and(u8::is_ascii_digit) {
            i = j + digits(&rest[j..]);
        }
    }
    i + rest[i..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count()
}

fn decimal_value(text: &str) -> Result<TokenValue, LexError> {
    let split = text.trim_end_matches(|c: char| c.is_ascii_alphabetic()).len();
    let (number, suffix) = text.split_at(split);
    let kind = NumberKind::from_suffix(suffix).ok_or(LexError::InvalidNumber)?;
    let is_real = number.contains(['.', 'e', 'E']);

    if is_real || kind.intersects(NumberKind::REAL) {
        if kind.intersects(NumberKind::INTEGRAL) {
            return Err(LexError::InvalidNumber);
        }
        let number = if number.starts_with('.') {
            format!("0{number}")
        } else {
            number.to_string()
        };
        return if kind == NumberKind::FLOAT {
            number
                .parse::<f32>()
                .map(TokenValue::Float)
                .map_err(|_| LexError::InvalidNumber)
        } else if kind == NumberKind::DECIMAL {
            let parsed = if number.contains(['e', 'E']) {
                Decimal::from_scientific(&number)
            } else {
                Decimal::from_str(&number)
            };
            parsed
                .map(TokenValue::Decimal)
                .map_err(|_| LexError::InvalidNumber)
        } else {
            number
                .parse::<f64>()
                .map(TokenValue::Double)
                .map_err(|_| LexError::InvalidNumber)
        };
    }

    if !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LexError::InvalidNumber);
    }
    let mut value: u64 = 0;
    for digit in number.bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
            .ok_or(LexError::IntegerOverflow)?;
    }
    Ok(TokenValue::Int(kind.integer(value)))
}

fn hex_value(text: &str) -> Result<TokenValue, LexError> {
    let split = text.bytes().take_while(u8::is_ascii_hexdigit).count();
    let (digits, suffix) = text.split_at(split);
    if digits.is_empty() {
        return Err(LexError::InvalidHexDigit);
    }
    let kind = NumberKind::from_suffix(suffix)
        .filter(|k| !k.intersects(NumberKind::REAL))
        .ok_or(LexError::InvalidHexDigit)?;
    let mut value: u64 = 0;
    for c in digits.chars() {
        let digit = c.to_digit(16).ok_or(LexError::InvalidHexDigit)?;
        value = value
            .checked_mul(16)
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(LexError::IntegerOverflow)?;
    }
    Ok(TokenValue::Int(kind.integer(value)))
}

// =============================================================================
// STRINGS AND CHARACTERS
// =============================================================================

/// Walks the lexer remainder one character at a time.
struct CharCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> CharCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Decode the escape sequence following a backslash.
    fn escape(&mut self) -> Result<char, LexError> {
        let c = match self.bump().ok_or(LexError::InvalidEscape)? {
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            '0' => '\0',
            'n' => '\n',
            'r' => '\r',
            'b' => '\u{8}',
            'a' => '\u{7}',
            't' => '\t',
            'f' => '\u{c}',
            'v' => '\u{b}',
            'u' => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = self
                        .bump()
                        .and_then(|h| h.to_digit(16))
                        .ok_or(LexError::InvalidEscape)?;
                    code = code * 16 + digit;
                }
                char::from_u32(code).ok_or(LexError::InvalidEscape)?
            }
            _ => return Err(LexError::InvalidEscape),
        };
        Ok(c)
    }
}

/// Callback for `"`.
pub(super) fn string(lex: &mut Lexer<'_, RawToken>) -> Result<SmolStr, LexError> {
    let mut cursor = CharCursor::new(lex.remainder());
    let mut out = String::new();
    let result = loop {
        match cursor.bump() {
            None | Some('\n' | '\r') => break Err(LexError::UnterminatedString),
            Some('"') => break Ok(SmolStr::from(out)),
            Some('\\') => match cursor.escape() {
                Ok(c) => out.push(c),
                Err(e) => break Err(e),
            },
            Some(c) => out.push(c),
        }
    };
    lex.bump(cursor.pos);
    result
}

/// Callback for `@"`. Only `""` is an escape; newlines are kept verbatim.
pub(super) fn verbatim_string(lex: &mut Lexer<'_, RawToken>) -> Result<SmolStr, LexError> {
    let mut cursor = CharCursor::new(lex.remainder());
    let mut out = String::new();
    let result = loop {
        match cursor.bump() {
            None => break Err(LexError::UnterminatedString),
            Some('"') if cursor.peek() == Some('"') => {
                cursor.bump();
                out.push('"');
            }
            Some('"') => break Ok(SmolStr::from(out)),
            Some(c) => out.push(c),
        }
    };
    lex.bump(cursor.pos);
    result
}

/// Callback for `'`.
pub(super) fn character(lex: &mut Lexer<'_, RawToken>) -> Result<char, LexError> {
    let mut cursor = CharCursor::new(lex.remainder());
    let result = match cursor.bump() {
        None | Some('\n' | '\r') => Err(LexError::UnterminatedChar),
        Some('\'') => Err(LexError::EmptyChar),
        Some('\\') => cursor.escape(),
        Some(c) => Ok(c),
    }
    .and_then(|c| match cursor.bump() {
        Some('\'') => Ok(c),
        _ => Err(LexError::UnterminatedChar),
    });
    lex.bump(cursor.pos);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", Some(NumberKind::empty()))]
    #[case("u", Some(NumberKind::UNSIGNED))]
    #[case("LU", Some(NumberKind::INTEGRAL))]
    #[case("uL", Some(NumberKind::INTEGRAL))]
    #[case("M", Some(NumberKind::DECIMAL))]
    #[case("uu", None)]
    #[case("fd", None)]
    #[case("x", None)]
    fn test_suffix_grammar(#[case] suffix: &str, #[case] expected: Option<NumberKind>) {
        assert_eq!(NumberKind::from_suffix(suffix), expected);
    }

    #[rstest]
    #[case("2147483647", IntValue::I32(i32::MAX))]
    #[case("2147483648", IntValue::I64(2_147_483_648))]
    #[case("18446744073709551615", IntValue::U64(u64::MAX))]
    #[case("7u", IntValue::U32(7))]
    #[case("4294967296u", IntValue::U64(4_294_967_296))]
    #[case("7L", IntValue::I64(7))]
    #[case("7ul", IntValue::U64(7))]
    fn test_integer_widths(#[case] text: &str, #[case] expected: IntValue) {
        assert_eq!(decimal_value(text), Ok(TokenValue::Int(expected)));
    }

    #[test]
    fn test_integer_overflow() {
        assert_eq!(
            decimal_value("18446744073709551616"),
            Err(LexError::IntegerOverflow)
        );
        assert_eq!(hex_value("1FFFFFFFFFFFFFFFF"), Err(LexError::IntegerOverflow));
    }

    #[rstest]
    #[case("FF", IntValue::I32(255))]
    #[case("ffu", IntValue::U32(255))]
    #[case("FFFFFFFF", IntValue::I64(4_294_967_295))]
    fn test_hex_values(#[case] text: &str, #[case] expected: IntValue) {
        assert_eq!(hex_value(text), Ok(TokenValue::Int(expected)));
    }

    #[rstest]
    #[case("")]
    #[case("G")]
    #[case("1m")]
    fn test_bad_hex(#[case] text: &str) {
        assert_eq!(hex_value(text), Err(LexError::InvalidHexDigit));
    }

    #[test]
    fn test_real_literals() {
        assert_eq!(decimal_value("1.5"), Ok(TokenValue::Double(1.5)));
        assert_eq!(decimal_value(".25"), Ok(TokenValue::Double(0.25)));
        assert_eq!(decimal_value("2f"), Ok(TokenValue::Float(2.0)));
        assert_eq!(decimal_value("1e3"), Ok(TokenValue::Double(1000.0)));
        assert_eq!(
            decimal_value("1.5m"),
            Ok(TokenValue::Decimal(Decimal::new(15, 1)))
        );
        assert_eq!(decimal_value("1.5u"), Err(LexError::InvalidNumber));
        assert_eq!(decimal_value("1e"), Err(LexError::InvalidNumber));
    }
}
