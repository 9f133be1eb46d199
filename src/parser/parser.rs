//! The parser state behind the grammar functions.

use text_size::TextSize;

use super::cursor::{Mark, ParserContext};
use super::grammar::{ParseStop, PResult, RuleGrammar};
use super::token::{Token, TokenKind};
use crate::ast::{ActionKind, Expr, ExprKind, RuleAction, Stmt, StmtKind};
use crate::base::NodeId;
use crate::errors::{ErrorCode, RuleSyntaxError};
use crate::metadata::{ResolutionContext, TypeRef};
use crate::resolve::{NamespaceId, Symbol, SymbolTables};
use crate::validation::{TypeOracle, ValueCheck};

/// One parse: a token cursor over shared symbol tables, validating every
/// node through `oracle` as it is built.
pub struct Parser<'a, V: TypeOracle> {
    cx: ParserContext,
    tables: &'a SymbolTables,
    context: &'a ResolutionContext,
    oracle: &'a mut V,
}

impl<'a, V: TypeOracle> Parser<'a, V> {
    pub fn new(
        cx: ParserContext,
        tables: &'a SymbolTables,
        context: &'a ResolutionContext,
        oracle: &'a mut V,
    ) -> Self {
        Self {
            cx,
            tables,
            context,
            oracle,
        }
    }

    pub fn cursor(&self) -> &ParserContext {
        &self.cx
    }

    pub fn into_context(self) -> ParserContext {
        self.cx
    }

    pub fn oracle(&self) -> &V {
        &*self.oracle
    }

    /// The oracle's first diagnostic as a positioned syntax error.
    fn oracle_error(&self) -> ParseStop {
        let err = match self.oracle.errors().first() {
            Some(diagnostic) => RuleSyntaxError::new(
                diagnostic.code,
                diagnostic.message.clone(),
                self.cx.positions().offset_or_start(diagnostic.node),
            ),
            None => RuleSyntaxError::from_code(ErrorCode::E0408, self.cx.offset()),
        };
        ParseStop::Error(err)
    }

    fn position_of(&self, id: NodeId) -> TextSize {
        self.cx.positions().offset_or_start(Some(id))
    }
}

impl<V: TypeOracle> RuleGrammar for Parser<'_, V> {
    fn current(&self) -> &Token {
        self.cx.current()
    }

    fn current_kind(&self) -> TokenKind {
        self.cx.current_kind()
    }

    fn offset(&self) -> TextSize {
        self.cx.offset()
    }

    fn peek_kind(&self, n: usize) -> TokenKind {
        self.cx.peek_kind(n)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.cx.at(kind)
    }

    fn at_end(&self) -> bool {
        self.cx.at_end()
    }

    fn bump(&mut self) -> Token {
        self.cx.advance()
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        self.cx.eat(kind)
    }

    fn save(&self) -> Mark {
        self.cx.save()
    }

    fn restore(&mut self, mark: Mark) {
        self.cx.restore(mark);
    }

    fn is_completion(&self) -> bool {
        self.cx.is_completion()
    }

    fn node(&mut self, offset: TextSize, kind: ExprKind) -> Expr {
        Expr::new(self.cx.fresh_id(offset), kind)
    }

    fn stmt(&mut self, offset: TextSize, kind: StmtKind) -> Stmt {
        Stmt::new(self.cx.fresh_id(offset), kind)
    }

    fn action(&mut self, offset: TextSize, kind: ActionKind) -> RuleAction {
        RuleAction::new(self.cx.fresh_id(offset), kind)
    }

    fn reposition(&mut self, expr: &Expr, offset: TextSize) {
        self.cx.reposition(expr.id, offset);
    }

    fn validate(
        &mut self,
        expr: &Expr,
        check: ValueCheck,
        assign_is_equality: bool,
    ) -> PResult<()> {
        let check = if self.cx.at(TokenKind::Assign) && !assign_is_equality {
            ValueCheck::WRITE
        } else {
            check
        };

        let valid = if check.contains(ValueCheck::READ) {
            self.oracle.validate_expression(expr, false).is_some()
                && (!check.contains(ValueCheck::WRITE)
                    || self.oracle.validate_expression(expr, true).is_some())
        } else if check.contains(ValueCheck::WRITE) {
            self.oracle.validate_expression(expr, true).is_some()
        } else {
            true
        };

        if valid {
            Ok(())
        } else {
            Err(self.oracle_error())
        }
    }

    fn validate_statement(&mut self, stmt: &Stmt) -> PResult<()> {
        if self.oracle.validate_statement(stmt) {
            Ok(())
        } else {
            Err(self.oracle_error())
        }
    }

    fn validate_action(&mut self, action: &RuleAction) -> PResult<()> {
        if self.oracle.validate_action(action) {
            Ok(())
        } else {
            Err(self.oracle_error())
        }
    }

    fn type_of(&self, expr: &Expr) -> PResult<TypeRef> {
        self.oracle
            .expression_type(expr.id)
            .cloned()
            .ok_or_else(|| {
                ParseStop::Error(RuleSyntaxError::from_code(
                    ErrorCode::E0408,
                    self.position_of(expr.id),
                ))
            })
    }

    fn written_paths(&self, expr: &Expr) -> Vec<String> {
        self.oracle.written_paths(expr)
    }

    fn context(&self) -> &ResolutionContext {
        self.context
    }

    fn lookup(&self, name: &str) -> Option<Symbol> {
        self.tables.lookup(name).cloned()
    }

    fn lookup_global(&self, name: &str) -> Option<Symbol> {
        self.tables.lookup_type_or_namespace(name).cloned()
    }

    fn namespace_member(&self, ns: NamespaceId, name: &str) -> Option<Symbol> {
        self.tables.namespace(ns).find_member(name).cloned()
    }

    fn namespace_name(&self, ns: NamespaceId) -> String {
        self.tables.qualified_name(ns)
    }
}
