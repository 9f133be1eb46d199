//! # rulex-base
//!
//! Front end for a small rule language: short boolean conditions and
//! statements written against a host type ("this"), checked against a
//! reflection-style metadata catalogue.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide        → backward parsing of partial text, completion items
//!   ↓
//! parser     → logos lexer, recursive-descent parser, RuleParser
//!   ↓
//! resolve    → symbol tables, overload resolution
//!   ↓
//! validation → TypeOracle trait, RuleValidator
//!   ↓
//! ast        → expression / statement / rule action trees
//!   ↓
//! metadata   → type catalogue, members, conversions
//!   ↓
//! base       → NodeId, PositionMap, TextSize
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rulex::{RuleParser, metadata::ResolutionContext};
//!
//! let context = ResolutionContext::new(Arc::new(catalog), order_type);
//! let mut parser = RuleParser::new(context);
//! let condition = parser.parse_condition("this.total > 100")?;
//! let completions = parser.get_completions("this.");
//! ```

// ============================================================================
// MODULES
// dependency order: base → metadata → ast → validation → resolve → parser → ide
// ============================================================================

/// Foundation types: NodeId, PositionMap, TextSize
pub mod base;

/// Reflection-style type catalogue
pub mod metadata;

/// Expression, statement and rule action trees
pub mod ast;

/// Error codes and the positioned syntax error
pub mod errors;

/// Type oracle and the reference validator
pub mod validation;

/// Symbol tables and overload resolution
pub mod resolve;

/// Logos lexer and recursive-descent parser
pub mod parser;

/// Completion over partial input
pub mod ide;

// Re-export commonly needed items
pub use parser::keywords;

pub use base::{NodeId, PositionMap, TextSize};
pub use errors::{ErrorCode, RuleSyntaxError};
pub use ide::{CompletionItem, CompletionKind, IntellisenseParser};
pub use parser::{ParsedActions, ParsedCondition, ParsedStatement, RuleParser};
pub use validation::{RuleValidator, TypeOracle};
