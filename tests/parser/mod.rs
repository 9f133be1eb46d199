//! Parser tests
//!
//! Tests for:
//! - Scanning (numeric widths, escapes, keywords)
//! - Expression shape and lowering
//! - Statements and custom actions
//! - Error codes and positions

pub mod tests_errors;
pub mod tests_expressions;
pub mod tests_scanner;
pub mod tests_statements;
