//! Code completion over partial rule text.
//!
//! ## Usage
//!
//! ```ignore
//! use rulex::parser::RuleParser;
//!
//! let mut parser = RuleParser::new(context);
//! let items = parser.get_completions("this.total > this.")?;
//! ```
//!
//! [`IntellisenseParser`] isolates the expression in front of the cursor,
//! the parser runs over it in completion mode, and [`Completions`] turns the
//! point where it stopped into [`CompletionItem`]s.

mod completion;
mod intellisense;

pub use completion::{CompletionItem, CompletionKind, CompletionTarget, Completions};
pub use intellisense::IntellisenseParser;
