//! Type checking of parsed nodes.
//!
//! The parser never infers types itself. After building each node it hands
//! the node to a [`TypeOracle`], which records the node's type or a
//! [`Diagnostic`]. [`RuleValidator`] is the oracle used unless the caller
//! supplies its own.

mod usage;
mod validator;

use bitflags::bitflags;

use crate::ast::{Expr, RuleAction, Stmt};
use crate::base::NodeId;
use crate::errors::ErrorCode;
use crate::metadata::TypeRef;

pub use usage::written_paths;
pub use validator::{constructor_signatures, method_signatures, MethodTarget, RuleValidator};

bitflags! {
    /// How the value of an expression is used.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ValueCheck: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}

/// A validation failure, tied to the node it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub node: Option<NodeId>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>, node: NodeId) -> Self {
        Self {
            code,
            message: message.into(),
            node: Some(node),
        }
    }
}

/// The type-and-semantics interface the parser validates nodes through.
pub trait TypeOracle {
    /// Forget recorded types and diagnostics before a new parse.
    fn reset(&mut self);

    /// Check an expression for reading, or for writing when `is_written`.
    /// Returns its type, or `None` after recording a diagnostic.
    fn validate_expression(&mut self, expr: &Expr, is_written: bool) -> Option<TypeRef>;

    fn validate_statement(&mut self, stmt: &Stmt) -> bool;

    fn validate_action(&mut self, action: &RuleAction) -> bool;

    /// Type recorded by the last successful validation of `id`.
    fn expression_type(&self, id: NodeId) -> Option<&TypeRef>;

    fn errors(&self) -> &[Diagnostic];

    /// `this/a/b` style paths the expression writes to.
    fn written_paths(&self, expr: &Expr) -> Vec<String>;
}
