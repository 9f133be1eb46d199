//! Lexer and recursive-descent parser for rule text
//!
//! ## Architecture
//!
//! ```text
//! Rule text
//!     ↓
//! Scanner (logos) → Tokens with literal values, terminated by EndOfInput
//!     ↓
//! ParserContext → cursor with save/restore, node ids, position map
//!     ↓
//! grammar → precedence climbing over `RuleGrammar`, symbol resolution,
//!           type oracle called after every node
//!     ↓
//! RuleParser → conditions, single statements, statement lists
//! ```
//!
//! Parsing stops at the first error. In completion mode, running out of
//! input at a member, call or constructor position stops the parse with a
//! [`CompletionRequest`] instead.

#[allow(clippy::module_inception)]
mod parser;

pub mod cursor;
pub mod grammar;
pub mod keywords;
mod lexer;
mod literals;
mod rule_parser;
mod token;

pub use cursor::{Mark, ParserContext};
pub use grammar::{CompletionRequest, PResult, ParseStop, RuleGrammar};
pub use lexer::{tokenize, tokenize_lenient, LexError, Scanner};
pub use parser::Parser;
pub use rule_parser::{ParsedActions, ParsedCondition, ParsedStatement, RuleParser};
pub use token::{Token, TokenKind, TokenValue};
