//! Rule language keywords.
//!
//! Keywords are case-insensitive. Primitive type keywords resolve directly to
//! their [`PrimitiveType`].

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::token::{TokenKind, TokenValue};
use crate::metadata::PrimitiveType;

/// Keyword spellings, lowercase, in the order completion lists them.
pub const KEYWORDS: &[&str] = &[
    "and", "bool", "byte", "char", "decimal", "double", "false", "float", "halt", "in", "int",
    "long", "mod", "new", "not", "null", "object", "or", "out", "ref", "sbyte", "short", "string",
    "this", "true", "uint", "ulong", "update", "ushort",
];

static TABLE: LazyLock<FxHashMap<&'static str, (TokenKind, TokenValue)>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();
    let words = [
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("not", TokenKind::Not),
        ("mod", TokenKind::Modulus),
        ("null", TokenKind::Null),
        ("this", TokenKind::This),
        ("in", TokenKind::In),
        ("out", TokenKind::Out),
        ("ref", TokenKind::Ref),
        ("halt", TokenKind::Halt),
        ("update", TokenKind::Update),
        ("new", TokenKind::New),
    ];
    for (word, kind) in words {
        table.insert(word, (kind, TokenValue::None));
    }
    table.insert("true", (TokenKind::True, TokenValue::Bool(true)));
    table.insert("false", (TokenKind::False, TokenValue::Bool(false)));
    for primitive in PrimitiveType::ALL {
        if primitive != PrimitiveType::Void {
            table.insert(
                primitive.keyword(),
                (TokenKind::TypeName, TokenValue::Type(primitive)),
            );
        }
    }
    table
});

/// Look up a word in the keyword table, ignoring case.
pub fn lookup(word: &str) -> Option<(TokenKind, TokenValue)> {
    if word.bytes().all(|b| b.is_ascii_lowercase()) {
        return TABLE.get(word).cloned();
    }
    TABLE.get(word.to_lowercase().as_str()).cloned()
}

/// Keywords whose first letter matches `first`, ignoring case.
pub fn keywords_starting_with(first: char) -> impl Iterator<Item = &'static str> {
    let lower = first.to_lowercase().next().unwrap_or(first);
    KEYWORDS.iter().copied().filter(move |k| k.starts_with(lower))
}
