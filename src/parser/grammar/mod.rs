//! Rule grammar.
//!
//! Precedence, lowest first:
//!
//! ```text
//! || / or  →  && / and  →  |  →  &  →  == != =  →  < > <= >=  →  + -  →  * / % mod
//!     → unary (! not, -, (Type) cast) → postfix (.member, .method(args), [index])
//!     → primary
//! ```
//!
//! The parsing functions are generic over [`RuleGrammar`], which supplies the
//! cursor, node construction, validation and symbol lookup. [`Parser`] is the
//! implementation used by [`RuleParser`].
//!
//! [`Parser`]: crate::parser::Parser
//! [`RuleParser`]: crate::parser::RuleParser

mod expressions;
mod primary;
mod statements;
mod types;

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::TextSize;

// Shared imports, reached by submodules through `use super::*;`
pub(super) use crate::ast::{
    ActionKind, BinaryOp, BoundArgument, CustomConstruction, Expr, ExprKind, IntValue, Literal,
    RuleAction, Stmt, StmtKind,
};
pub(super) use crate::errors::{ErrorCode, RuleSyntaxError};
pub(super) use crate::metadata::{
    Capabilities, Catalog, FieldOrProperty, MemberFilter, ParamDirection, ResolutionContext,
    TypeId, TypeRef,
};
pub(super) use crate::parser::cursor::Mark;
pub(super) use crate::parser::token::{Token, TokenKind};
pub(super) use crate::resolve::overload::{self, ArgumentInfo, OverloadError};
pub(super) use crate::resolve::ArgBinding;
pub(super) use crate::resolve::{NamespaceId, Symbol};
pub(super) use crate::validation::ValueCheck;

pub use self::expressions::*;
pub use self::primary::*;
pub use self::statements::*;
pub use self::types::*;

/// What to offer when a completion-mode parse runs out of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionRequest {
    /// Members after `expr.`; static members and nested types when `expr` names a type.
    TypeMembers { ty: TypeRef, is_static: bool },
    /// Overloads of `name` after `expr.name(` or an unadorned `name(`.
    Methods {
        ty: TypeRef,
        name: SmolStr,
        include_static: bool,
        include_instance: bool,
    },
    /// Constructors after `new T(`.
    Constructors { ty: TypeRef },
    /// Nested types after `new T`.
    NestedTypes { ty: TypeRef },
    /// Members of a namespace after `Ns.`.
    Namespace(NamespaceId),
}

/// Why a parse stopped early.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseStop {
    Error(RuleSyntaxError),
    /// A completion-mode parse reached the end of its input.
    Complete(CompletionRequest),
}

impl From<RuleSyntaxError> for ParseStop {
    fn from(err: RuleSyntaxError) -> Self {
        ParseStop::Error(err)
    }
}

pub type PResult<T> = Result<T, ParseStop>;

/// Operations the grammar needs from a parser.
pub trait RuleGrammar {
    // Token inspection
    fn current(&self) -> &Token;
    fn current_kind(&self) -> TokenKind;
    fn offset(&self) -> TextSize;
    fn peek_kind(&self, n: usize) -> TokenKind;
    fn at(&self, kind: TokenKind) -> bool;
    fn at_end(&self) -> bool;

    // Token consumption
    fn bump(&mut self) -> Token;
    fn eat(&mut self, kind: TokenKind) -> bool;
    fn save(&self) -> Mark;
    fn restore(&mut self, mark: Mark);

    // Completion
    fn is_completion(&self) -> bool;

    /// A completion-mode parse with nothing left to read.
    fn at_completion_point(&self) -> bool {
        self.is_completion() && self.at_end()
    }

    // Node building; every node is positioned when it is created
    fn node(&mut self, offset: TextSize, kind: ExprKind) -> Expr;
    fn stmt(&mut self, offset: TextSize, kind: StmtKind) -> Stmt;
    fn action(&mut self, offset: TextSize, kind: ActionKind) -> RuleAction;
    /// Move `expr` to `offset`, as for a parenthesised group.
    fn reposition(&mut self, expr: &Expr, offset: TextSize);

    // Validation
    /// Hand `expr` to the type oracle. A following `=` outside equality
    /// context turns the check into a write check.
    fn validate(&mut self, expr: &Expr, check: ValueCheck, assign_is_equality: bool) -> PResult<()>;
    fn validate_statement(&mut self, stmt: &Stmt) -> PResult<()>;
    fn validate_action(&mut self, action: &RuleAction) -> PResult<()>;
    /// Type recorded for an already validated node.
    fn type_of(&self, expr: &Expr) -> PResult<TypeRef>;
    fn written_paths(&self, expr: &Expr) -> Vec<String>;

    // Symbols
    fn context(&self) -> &ResolutionContext;
    /// Bare identifier lookup; members of "this" shadow global names.
    fn lookup(&self, name: &str) -> Option<Symbol>;
    /// Namespaces and types only.
    fn lookup_global(&self, name: &str) -> Option<Symbol>;
    fn namespace_member(&self, ns: NamespaceId, name: &str) -> Option<Symbol>;
    fn namespace_name(&self, ns: NamespaceId) -> String;

    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.context().catalog)
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

pub(super) fn error(code: ErrorCode, message: impl Into<String>, offset: TextSize) -> ParseStop {
    ParseStop::Error(RuleSyntaxError::new(code, message, offset))
}

pub(super) fn error_at(code: ErrorCode, offset: TextSize) -> ParseStop {
    ParseStop::Error(RuleSyntaxError::from_code(code, offset))
}

/// Consume a token of `kind` or fail with `code` at the current token.
pub(super) fn expect<P: RuleGrammar>(
    p: &mut P,
    kind: TokenKind,
    code: ErrorCode,
) -> PResult<Token> {
    if p.at(kind) {
        Ok(p.bump())
    } else {
        Err(error_at(code, p.offset()))
    }
}

/// Stop with `request` when a completion-mode parse is out of input.
pub(super) fn complete_here<P: RuleGrammar>(
    p: &P,
    request: impl FnOnce() -> CompletionRequest,
) -> PResult<()> {
    if p.at_completion_point() {
        Err(ParseStop::Complete(request()))
    } else {
        Ok(())
    }
}

/// Build a node at `offset` and validate it.
pub(super) fn validated<P: RuleGrammar>(
    p: &mut P,
    offset: TextSize,
    kind: ExprKind,
    check: ValueCheck,
    assign_is_equality: bool,
) -> PResult<Expr> {
    let node = p.node(offset, kind);
    p.validate(&node, check, assign_is_equality)?;
    Ok(node)
}

pub(super) fn ident_of(token: &Token) -> SmolStr {
    token.ident().cloned().unwrap_or_default()
}

/// Argument descriptions for overload resolution. Literal arguments keep
/// their value so they can convert more freely.
pub(super) fn argument_infos<'e, P: RuleGrammar>(
    p: &P,
    args: &'e [Expr],
) -> PResult<Vec<ArgumentInfo<'e>>> {
    args.iter()
        .map(|arg| match &arg.kind {
            ExprKind::Direction { direction, expr } => {
                Ok(ArgumentInfo::new(p.type_of(expr)?).with_direction(*direction))
            }
            ExprKind::Primitive(literal) => Ok(ArgumentInfo::literal(literal)),
            _ => Ok(ArgumentInfo::new(p.type_of(arg)?)),
        })
        .collect()
}

/// Bind `TypeName(args)` to a constructor of a custom action or expression
/// type. The cursor sits after `(` and binding errors are reported at `lparen`.
pub(super) fn bind_construction<P: RuleGrammar>(
    p: &mut P,
    ty: &TypeRef,
    type_id: TypeId,
    lparen: TextSize,
    (not_found, what): (ErrorCode, &str),
) -> PResult<CustomConstruction> {
    let catalog = p.catalog();
    let args = parse_argument_list(p)?;
    let infos = argument_infos(p, &args)?;
    let signatures = crate::validation::constructor_signatures(p.context(), ty);
    let best = overload::resolve(&catalog, &signatures, &infos).map_err(|err| {
        let name = catalog.display(ty);
        match err {
            OverloadError::NotFound => error(
                not_found,
                format!("no constructor of {what} '{name}' matches the arguments"),
                lparen,
            ),
            OverloadError::Ambiguous(_) => error(
                ErrorCode::E0308,
                format!("constructor call for {what} '{name}' is ambiguous"),
                lparen,
            ),
        }
    })?;
    tracing::trace!(%what, ty = %catalog.display(ty), constructor = best.key, "bound constructor");

    let arguments = best
        .bindings
        .iter()
        .map(|binding| bind_argument(&args, binding))
        .collect();
    Ok(CustomConstruction {
        ty: type_id,
        constructor: best.key,
        arguments,
    })
}

fn bind_argument(args: &[Expr], binding: &ArgBinding) -> BoundArgument {
    let at = |i: usize| args.get(i).cloned();
    let null = || BoundArgument::Constant(Literal::Null);
    match binding {
        ArgBinding::Value(i) => at(*i).map_or_else(null, BoundArgument::Expr),
        ArgBinding::Coerced(i) => match at(*i) {
            Some(expr) => match expr.literal() {
                Some(literal) => BoundArgument::Constant(literal.clone()),
                None => BoundArgument::Expr(expr),
            },
            None => null(),
        },
        ArgBinding::NullArray(_) => null(),
        ArgBinding::Params(items) => {
            BoundArgument::Params(items.iter().map(|b| bind_argument(args, b)).collect())
        }
    }
}
