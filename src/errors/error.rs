//! Positioned rule syntax errors
//!
//! Every failed parse produces exactly one [`RuleSyntaxError`]: an error code,
//! a message and the byte offset where the problem was detected.

use text_size::TextSize;
use thiserror::Error;

use super::codes::ErrorCode;

/// A fatal error from scanning, parsing or validating a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message} (at offset {offset:?})")]
pub struct RuleSyntaxError {
    /// Categorized error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Byte offset into the rule text
    pub offset: TextSize,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
}

impl RuleSyntaxError {
    pub fn new(code: ErrorCode, message: impl Into<String>, offset: TextSize) -> Self {
        Self {
            code,
            message: message.into(),
            offset,
            hint: None,
        }
    }

    /// An error carrying the default message of its code.
    pub fn from_code(code: ErrorCode, offset: TextSize) -> Self {
        Self::new(code, code.default_message(), offset)
    }

    /// Add a hint to this error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Numeric error code, e.g. `205` for `E0205`.
    pub fn number(&self) -> u32 {
        self.code.number()
    }

    /// Format the error for display, including the hint
    pub fn format(&self) -> String {
        let mut result = format!("{}: {}", self.code, self.message);
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}
