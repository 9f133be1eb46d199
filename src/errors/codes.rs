//! Error code definitions for rule diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (characters, literals)
//! - E02xx: Syntax errors (missing tokens, operands)
//! - E03xx: Resolution errors (identifiers, types, overloads)
//! - E04xx: Semantic errors reported by the type oracle
//! - E05xx: Statement and action errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for rule diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated character literal
    E0103,
    /// Invalid numeric literal (digits or suffix)
    E0104,
    /// Integer literal does not fit in 64 bits
    E0105,
    /// Invalid escape sequence
    E0106,
    /// Invalid hexadecimal digit
    E0107,
    /// Empty character literal
    E0108,

    // =========================================================================
    // E02xx: Syntax errors
    // =========================================================================
    /// Missing `)`
    E0201,
    /// Missing `]`
    E0202,
    /// Missing `}`
    E0203,
    /// Missing `(`
    E0204,
    /// Missing identifier after `.`
    E0205,
    /// Missing operand
    E0206,
    /// Unexpected input after a complete expression
    E0207,
    /// Empty expression
    E0208,
    /// Token cannot start an expression
    E0209,
    /// Missing `>` after type arguments
    E0210,
    /// Expected a type name
    E0211,

    // =========================================================================
    // E03xx: Resolution errors
    // =========================================================================
    /// Unknown identifier
    E0301,
    /// Namespace has no member of that name
    E0302,
    /// Unknown field or property
    E0303,
    /// Generic type used without type arguments
    E0304,
    /// Type arguments given to a non-generic type
    E0305,
    /// Wrong number of type arguments
    E0306,
    /// Unknown method
    E0307,
    /// Ambiguous method or constructor call
    E0308,
    /// No matching constructor
    E0309,
    /// Cannot create an instance of an abstract type
    E0310,

    // =========================================================================
    // E04xx: Semantic errors (type oracle)
    // =========================================================================
    /// Operand types do not support the operator
    E0401,
    /// Condition does not evaluate to a boolean
    E0402,
    /// Expression cannot be written to
    E0403,
    /// Static member accessed through an instance, or vice versa
    E0404,
    /// Invalid cast
    E0405,
    /// Invalid index or indexer
    E0406,
    /// Argument direction does not match the parameter
    E0407,
    /// Expression type could not be determined
    E0408,

    // =========================================================================
    // E05xx: Statement and action errors
    // =========================================================================
    /// `update` target does not resolve to exactly one path
    E0501,
    /// Array creation without size or initializer
    E0502,
    /// Invalid custom expression
    E0503,
    /// Invalid custom action
    E0504,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 43] = [
        Self::E0101,
        Self::E0102,
        Self::E0103,
        Self::E0104,
        Self::E0105,
        Self::E0106,
        Self::E0107,
        Self::E0108,
        Self::E0201,
        Self::E0202,
        Self::E0203,
        Self::E0204,
        Self::E0205,
        Self::E0206,
        Self::E0207,
        Self::E0208,
        Self::E0209,
        Self::E0210,
        Self::E0211,
        Self::E0301,
        Self::E0302,
        Self::E0303,
        Self::E0304,
        Self::E0305,
        Self::E0306,
        Self::E0307,
        Self::E0308,
        Self::E0309,
        Self::E0310,
        Self::E0401,
        Self::E0402,
        Self::E0403,
        Self::E0404,
        Self::E0405,
        Self::E0406,
        Self::E0407,
        Self::E0408,
        Self::E0501,
        Self::E0502,
        Self::E0503,
        Self::E0504,
        Self::E0901,
        Self::E0999,
    ];

    /// Numeric value of the code, e.g. `E0205` is `205`.
    pub fn number(&self) -> u32 {
        self.as_str()[1..].parse().unwrap_or(999)
    }

    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0105 => "E0105",
            Self::E0106 => "E0106",
            Self::E0107 => "E0107",
            Self::E0108 => "E0108",
            // Syntax
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0206 => "E0206",
            Self::E0207 => "E0207",
            Self::E0208 => "E0208",
            Self::E0209 => "E0209",
            Self::E0210 => "E0210",
            Self::E0211 => "E0211",
            // Resolution
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0306 => "E0306",
            Self::E0307 => "E0307",
            Self::E0308 => "E0308",
            Self::E0309 => "E0309",
            Self::E0310 => "E0310",
            // Semantic
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0405 => "E0405",
            Self::E0406 => "E0406",
            Self::E0407 => "E0407",
            Self::E0408 => "E0408",
            // Statement/action
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::E0504 => "E0504",
            // Generic
            Self::E0901 => "E0901",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self.number() / 100 {
            1 => "lexical error",
            2 => "syntax error",
            3 => "resolution error",
            4 => "semantic error",
            5 => "statement error",
            _ => "error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated character literal",
            Self::E0104 => "invalid numeric literal",
            Self::E0105 => "integer literal is too large",
            Self::E0106 => "invalid escape sequence",
            Self::E0107 => "invalid hexadecimal digit",
            Self::E0108 => "empty character literal",
            // Syntax
            Self::E0201 => "missing ')'",
            Self::E0202 => "missing ']'",
            Self::E0203 => "missing '}'",
            Self::E0204 => "missing '('",
            Self::E0205 => "missing identifier after '.'",
            Self::E0206 => "missing operand",
            Self::E0207 => "unexpected characters after expression",
            Self::E0208 => "empty expression",
            Self::E0209 => "unknown literal or expression",
            Self::E0210 => "missing '>' after type arguments",
            Self::E0211 => "expected a type name",
            // Resolution
            Self::E0301 => "unknown identifier",
            Self::E0302 => "unknown namespace member",
            Self::E0303 => "unknown field or property",
            Self::E0304 => "missing type arguments",
            Self::E0305 => "not a generic type",
            Self::E0306 => "wrong number of type arguments",
            Self::E0307 => "unknown method",
            Self::E0308 => "ambiguous call",
            Self::E0309 => "no matching constructor",
            Self::E0310 => "cannot create an abstract type",
            // Semantic
            Self::E0401 => "operator cannot be applied to these operands",
            Self::E0402 => "condition must be boolean",
            Self::E0403 => "expression cannot be assigned",
            Self::E0404 => "static and instance access mismatch",
            Self::E0405 => "invalid cast",
            Self::E0406 => "invalid index",
            Self::E0407 => "argument direction mismatch",
            Self::E0408 => "expression type is unknown",
            // Statement/action
            Self::E0501 => "update target must be exactly one path",
            Self::E0502 => "array creation needs a size or an initializer",
            Self::E0503 => "invalid custom expression",
            Self::E0504 => "invalid custom action",
            // Generic
            Self::E0901 => "unexpected token",
            Self::E0999 => "internal parser error",
        }
    }

    /// Check if this is a lexical error
    pub fn is_lexical(&self) -> bool {
        self.number() / 100 == 1
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E0201.as_str(), "E0201");
        assert_eq!(ErrorCode::E0901.as_str(), "E0901");
    }

    #[test]
    fn test_error_code_number() {
        assert_eq!(ErrorCode::E0105.number(), 105);
        assert_eq!(ErrorCode::E0999.number(), 999);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0102.category_description(), "lexical error");
        assert_eq!(ErrorCode::E0201.category_description(), "syntax error");
        assert_eq!(ErrorCode::E0308.category_description(), "resolution error");
        assert_eq!(ErrorCode::E0501.category_description(), "statement error");
    }

    #[test]
    fn test_is_lexical() {
        assert!(ErrorCode::E0107.is_lexical());
        assert!(!ErrorCode::E0201.is_lexical());
    }
}
