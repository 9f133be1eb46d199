//! Logos-based scanner for rule text
//!
//! Converts a rule string into [`Token`]s terminated by `EndOfInput`.
//! Literal values are decoded while scanning, and identifiers are promoted to
//! keywords when they are letters-only and do not follow a `.`.

use logos::Logos;
use smol_str::SmolStr;
use text_size::TextSize;
use thiserror::Error;

use super::keywords;
use super::literals;
use super::token::{Token, TokenKind, TokenValue};
use crate::errors::{ErrorCode, RuleSyntaxError};

/// Lexical failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
pub enum LexError {
    #[default]
    #[error("invalid character")]
    InvalidCharacter,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("empty character literal")]
    EmptyChar,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid hexadecimal digit")]
    InvalidHexDigit,
    #[error("invalid number")]
    InvalidNumber,
    #[error("integer literal is too large")]
    IntegerOverflow,
}

impl LexError {
    pub fn code(self) -> ErrorCode {
        match self {
            Self::InvalidCharacter => ErrorCode::E0101,
            Self::UnterminatedString => ErrorCode::E0102,
            Self::UnterminatedChar => ErrorCode::E0103,
            Self::InvalidNumber => ErrorCode::E0104,
            Self::IntegerOverflow => ErrorCode::E0105,
            Self::InvalidEscape => ErrorCode::E0106,
            Self::InvalidHexDigit => ErrorCode::E0107,
            Self::EmptyChar => ErrorCode::E0108,
        }
    }

    fn into_syntax_error(self, offset: TextSize, text: &str) -> RuleSyntaxError {
        let message = match self {
            Self::InvalidCharacter => format!("invalid character '{}'", text),
            _ => self.code().default_message().to_string(),
        };
        RuleSyntaxError::new(self.code(), message, offset)
    }
}

/// Raw logos tokens, before keyword promotion.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f\x0B]+")]
pub(crate) enum RawToken {
    // =========================================================================
    // NAMES AND LITERALS
    // =========================================================================
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Word,

    #[regex(r"[0-9]", literals::number)]
    #[regex(r"\.[0-9]", literals::number)]
    Number(TokenValue),

    #[token("\"", literals::string)]
    #[token("@\"", literals::verbatim_string)]
    String(SmolStr),

    #[token("'", literals::character)]
    Char(char),

    // =========================================================================
    // OPERATORS
    // =========================================================================
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    #[token("<>")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("&")]
    Amp,
    #[token("||")]
    PipePipe,
    #[token("|")]
    Pipe,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
}

impl RawToken {
    fn cook(self, text: &str, after_dot: bool) -> (TokenKind, TokenValue) {
        let kind = match self {
            RawToken::Word => return word(text, after_dot),
            RawToken::Number(value) => {
                let kind = match value {
                    TokenValue::Decimal(_) => TokenKind::DecimalLiteral,
                    TokenValue::Float(_) | TokenValue::Double(_) => TokenKind::FloatLiteral,
                    _ => TokenKind::IntegerLiteral,
                };
                return (kind, value);
            }
            RawToken::String(s) => return (TokenKind::StringLiteral, TokenValue::String(s)),
            RawToken::Char(c) => return (TokenKind::CharacterLiteral, TokenValue::Char(c)),
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Multiply,
            RawToken::Slash => TokenKind::Divide,
            RawToken::Percent => TokenKind::Modulus,
            RawToken::EqEq => TokenKind::Equal,
            RawToken::Eq => TokenKind::Assign,
            RawToken::NotEq => TokenKind::NotEqual,
            RawToken::Bang => TokenKind::Not,
            RawToken::Lt => TokenKind::Less,
            RawToken::LtEq => TokenKind::LessEqual,
            RawToken::Gt => TokenKind::Greater,
            RawToken::GtEq => TokenKind::GreaterEqual,
            RawToken::AmpAmp => TokenKind::And,
            RawToken::Amp => TokenKind::BitAnd,
            RawToken::PipePipe => TokenKind::Or,
            RawToken::Pipe => TokenKind::BitOr,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
        };
        (kind, TokenValue::None)
    }
}

/// Identifier or keyword. Member names after `.` are never keywords.
fn word(text: &str, after_dot: bool) -> (TokenKind, TokenValue) {
    if !after_dot && text.chars().all(char::is_alphabetic) {
        if let Some(keyword) = keywords::lookup(text) {
            return keyword;
        }
    }
    (TokenKind::Identifier, TokenValue::String(SmolStr::new(text)))
}

/// Single-use scanner over one rule string.
pub struct Scanner<'a> {
    text: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Scan the whole text; the first lexical error aborts.
    pub fn tokenize(self) -> Result<Vec<Token>, RuleSyntaxError> {
        self.scan(false)
    }

    /// Scan without failing: the first lexical error becomes a single
    /// `Illegal` token and scanning stops there.
    pub fn tokenize_lenient(self) -> Vec<Token> {
        self.scan(true).unwrap_or_else(|err| {
            vec![
                Token::new(TokenKind::Illegal, err.offset, TokenValue::None),
                Token::end_of_input(err.offset),
            ]
        })
    }

    fn scan(self, lenient: bool) -> Result<Vec<Token>, RuleSyntaxError> {
        let mut lexer = RawToken::lexer(self.text);
        let mut tokens = Vec::new();
        let mut after_dot = false;

        while let Some(raw) = lexer.next() {
            let offset = TextSize::new(lexer.span().start as u32);
            let (kind, value) = match raw {
                Ok(raw) => raw.cook(lexer.slice(), after_dot),
                Err(err) if lenient => {
                    tracing::trace!(
                        ?err,
                        offset = u32::from(offset),
                        "lenient scan hit illegal token"
                    );
                    tokens.push(Token::new(TokenKind::Illegal, offset, TokenValue::None));
                    break;
                }
                Err(err) => return Err(err.into_syntax_error(offset, lexer.slice())),
            };
            after_dot = kind == TokenKind::Dot;
            tokens.push(Token::new(kind, offset, value));
        }

        tokens.push(Token::end_of_input(TextSize::new(self.text.len() as u32)));
        tracing::trace!(tokens = tokens.len(), "scanned rule text");
        Ok(tokens)
    }
}

/// Tokenize rule text, failing on the first lexical error.
pub fn tokenize(text: &str) -> Result<Vec<Token>, RuleSyntaxError> {
    Scanner::new(text).tokenize()
}

/// Tokenize rule text for completion; never fails.
pub fn tokenize_lenient(text: &str) -> Vec<Token> {
    Scanner::new(text).tokenize_lenient()
}
