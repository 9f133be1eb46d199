//! Error handling for the rule front end
//!
//! - Categorized error codes for filtering and documentation
//! - A single positioned error type shared by scanner, parser and resolver

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::RuleSyntaxError;
