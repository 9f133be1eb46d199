//! Completion tests
//!
//! Tests for:
//! - Backward parsing of partial text
//! - Member, method, constructor and namespace completions
//! - Root completions by first letter

pub mod tests_back_parse;
pub mod tests_completion;
