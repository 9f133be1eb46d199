//! Statements and rule actions.

use super::expr::{CustomConstruction, Expr};
use crate::base::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub id: NodeId,
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Assign { lhs: Expr, rhs: Expr },
    Expression(Expr),
}

impl Stmt {
    pub fn new(id: NodeId, kind: StmtKind) -> Self {
        Self { id, kind }
    }

    pub fn expressions(&self) -> Vec<&Expr> {
        match &self.kind {
            StmtKind::Assign { lhs, rhs } => vec![lhs, rhs],
            StmtKind::Expression(expr) => vec![expr],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleAction {
    pub id: NodeId,
    pub kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    Halt,
    /// Mark a `this/...` path as modified.
    Update { path: String },
    Statement(Stmt),
    Custom(CustomConstruction),
}

impl RuleAction {
    pub fn new(id: NodeId, kind: ActionKind) -> Self {
        Self { id, kind }
    }

    /// Expressions directly owned by the action.
    pub fn expressions(&self) -> Vec<&Expr> {
        match &self.kind {
            ActionKind::Halt | ActionKind::Update { .. } => Vec::new(),
            ActionKind::Statement(stmt) => stmt.expressions(),
            ActionKind::Custom(custom) => custom.expressions(),
        }
    }
}
