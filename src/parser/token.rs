//! Tokens produced by the [`Scanner`](super::Scanner).

use std::fmt;

use rust_decimal::Decimal;
use smol_str::SmolStr;
use text_size::TextSize;

use crate::ast::{IntValue, Literal};
use crate::metadata::PrimitiveType;

/// Token kinds of the rule language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================================================
    // NAMES AND LITERALS
    // =========================================================================
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    DecimalLiteral,
    StringLiteral,
    CharacterLiteral,
    True,
    False,
    Null,
    This,
    /// A primitive type keyword such as `int` or `string`.
    TypeName,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulus,
    /// `==`
    Equal,
    /// `=`; assignment or equality depending on context.
    Assign,
    /// `!=` or `<>`
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    /// `&&` or `and`
    And,
    /// `&`
    BitAnd,
    /// `||` or `or`
    Or,
    /// `|`
    BitOr,
    /// `!` or `not`
    Not,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    Dot,
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    In,
    Out,
    Ref,
    Halt,
    Update,
    New,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Placeholder for a lexical error in lenient mode.
    Illegal,
    EndOfInput,
}

impl TokenKind {
    /// Whether the token is a literal that can start a primary expression.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntegerLiteral
                | Self::FloatLiteral
                | Self::DecimalLiteral
                | Self::StringLiteral
                | Self::CharacterLiteral
                | Self::True
                | Self::False
                | Self::Null
        )
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::IntegerLiteral | Self::FloatLiteral | Self::DecimalLiteral => "number",
            Self::StringLiteral => "string",
            Self::CharacterLiteral => "character",
            Self::True => "'true'",
            Self::False => "'false'",
            Self::Null => "'null'",
            Self::This => "'this'",
            Self::TypeName => "type name",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Multiply => "'*'",
            Self::Divide => "'/'",
            Self::Modulus => "'%'",
            Self::Equal => "'=='",
            Self::Assign => "'='",
            Self::NotEqual => "'!='",
            Self::Less => "'<'",
            Self::LessEqual => "'<='",
            Self::Greater => "'>'",
            Self::GreaterEqual => "'>='",
            Self::And => "'&&'",
            Self::BitAnd => "'&'",
            Self::Or => "'||'",
            Self::BitOr => "'|'",
            Self::Not => "'!'",
            Self::Dot => "'.'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::In => "'in'",
            Self::Out => "'out'",
            Self::Ref => "'ref'",
            Self::Halt => "'halt'",
            Self::Update => "'update'",
            Self::New => "'new'",
            Self::Illegal => "invalid token",
            Self::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Literal payload of a token.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenValue {
    #[default]
    None,
    /// Identifier name or string literal contents.
    String(SmolStr),
    Char(char),
    Int(IntValue),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Bool(bool),
    /// The type denoted by a primitive type keyword.
    Type(PrimitiveType),
}

/// A token with its kind, position and literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: TextSize,
    pub value: TokenValue,
}

impl Token {
    pub fn new(kind: TokenKind, offset: TextSize, value: TokenValue) -> Self {
        Self {
            kind,
            offset,
            value,
        }
    }

    pub fn end_of_input(offset: TextSize) -> Self {
        Self::new(TokenKind::EndOfInput, offset, TokenValue::None)
    }

    /// Identifier name, if this is an identifier.
    pub fn ident(&self) -> Option<&SmolStr> {
        match (&self.kind, &self.value) {
            (TokenKind::Identifier, TokenValue::String(name)) => Some(name),
            _ => None,
        }
    }

    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self.value {
            TokenValue::Type(p) => Some(p),
            _ => None,
        }
    }

    /// The literal this token denotes, for literal tokens.
    pub fn literal(&self) -> Option<Literal> {
        let lit = match (&self.kind, &self.value) {
            (TokenKind::Null, _) => Literal::Null,
            (TokenKind::True, _) => Literal::Bool(true),
            (TokenKind::False, _) => Literal::Bool(false),
            (TokenKind::StringLiteral, TokenValue::String(s)) => Literal::String(s.clone()),
            (TokenKind::CharacterLiteral, TokenValue::Char(c)) => Literal::Char(*c),
            (TokenKind::IntegerLiteral, TokenValue::Int(v)) => Literal::Int(*v),
            (TokenKind::FloatLiteral, TokenValue::Float(v)) => Literal::Float(*v),
            (TokenKind::FloatLiteral, TokenValue::Double(v)) => Literal::Double(*v),
            (TokenKind::DecimalLiteral, TokenValue::Decimal(v)) => Literal::Decimal(*v),
            _ => return None,
        };
        Some(lit)
    }
}
