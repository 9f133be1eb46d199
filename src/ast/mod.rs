//! Host expression, statement and rule-action trees.
//!
//! The parser assembles these but leaves their meaning to the type oracle.
//! Nodes carry a [`NodeId`] instead of a position; positions live in the
//! parser's [`PositionMap`](crate::base::PositionMap).
//!
//! There is deliberately no inequality or negation primitive: `a != b` is
//! represented as `(a == b) == false`, `!x` as `x == false` and `-x` as `0 - x`.

mod expr;
mod literal;
mod stmt;

pub use expr::{BinaryOp, BoundArgument, CustomConstruction, Expr, ExprKind};
pub use literal::{IntValue, Literal};
pub use stmt::{ActionKind, RuleAction, Stmt, StmtKind};
