//! Entry points for parsing rule conditions and actions.
//!
//! A [`RuleParser`] builds the symbol tables for its [`ResolutionContext`]
//! once and reuses them for every parse.
//!
//! # Example
//!
//! ```ignore
//! use rulex::parser::RuleParser;
//!
//! let mut parser = RuleParser::new(context);
//! let condition = parser.parse_condition("this.total > 100 && !this.flagged")?;
//! let actions = parser.parse_statement_list("this.discount = 5; halt")?;
//! ```

use std::sync::Arc;

use text_size::TextSize;

use super::cursor::ParserContext;
use super::grammar::{
    parse_binary, parse_postfix, parse_statement, CompletionRequest, ParseStop, RuleGrammar,
};
use super::lexer::tokenize;
use super::parser::Parser;
use super::token::{Token, TokenKind};
use crate::ast::{Expr, RuleAction};
use crate::base::PositionMap;
use crate::errors::{ErrorCode, RuleSyntaxError};
use crate::metadata::ResolutionContext;
use crate::resolve::SymbolTables;
use crate::validation::{RuleValidator, TypeOracle, ValueCheck};

/// A parsed condition and the source offset of each of its nodes.
#[derive(Debug, Clone)]
pub struct ParsedCondition {
    pub expr: Expr,
    pub positions: PositionMap,
}

#[derive(Debug, Clone)]
pub struct ParsedStatement {
    pub action: RuleAction,
    pub positions: PositionMap,
}

#[derive(Debug, Clone)]
pub struct ParsedActions {
    pub actions: Vec<RuleAction>,
    pub positions: PositionMap,
}

fn into_syntax_error(stop: ParseStop, offset: TextSize) -> RuleSyntaxError {
    match stop {
        ParseStop::Error(err) => err,
        ParseStop::Complete(_) => RuleSyntaxError::from_code(ErrorCode::E0999, offset),
    }
}

/// Parser for one resolution context, validating through `V`.
#[derive(Debug)]
pub struct RuleParser<V: TypeOracle = RuleValidator> {
    context: ResolutionContext,
    tables: Arc<SymbolTables>,
    oracle: V,
}

impl RuleParser<RuleValidator> {
    pub fn new(context: ResolutionContext) -> Self {
        let oracle = RuleValidator::new(context.clone());
        Self::with_oracle(context, oracle)
    }
}

impl<V: TypeOracle> RuleParser<V> {
    pub fn with_oracle(context: ResolutionContext, oracle: V) -> Self {
        let tables = Arc::new(SymbolTables::build(&context));
        Self::with_tables(context, tables, oracle)
    }

    /// Reuse tables already built for the same context.
    pub fn with_tables(context: ResolutionContext, tables: Arc<SymbolTables>, oracle: V) -> Self {
        Self {
            context,
            tables,
            oracle,
        }
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    pub fn tables(&self) -> &Arc<SymbolTables> {
        &self.tables
    }

    /// The oracle, holding the types recorded by the last parse.
    pub fn oracle(&self) -> &V {
        &self.oracle
    }

    fn parser(&mut self, cx: ParserContext) -> Parser<'_, V> {
        self.oracle.reset();
        Parser::new(cx, &self.tables, &self.context, &mut self.oracle)
    }

    /// Parse the whole text as one boolean expression. `=` means equality.
    pub fn parse_condition(&mut self, text: &str) -> Result<ParsedCondition, RuleSyntaxError> {
        let tokens = tokenize(text)?;
        tracing::debug!(tokens = tokens.len(), "parsing condition");
        let mut p = self.parser(ParserContext::new(tokens));

        if p.at_end() {
            return Err(RuleSyntaxError::from_code(ErrorCode::E0208, p.offset()));
        }
        let expr = parse_binary(&mut p, true, ValueCheck::READ)
            .map_err(|s| into_syntax_error(s, p.offset()))?;
        expect_end(&p, "condition")?;

        let ty = p.type_of(&expr).map_err(|s| into_syntax_error(s, TextSize::from(0)))?;
        if !ty.is_bool() {
            let message = format!(
                "condition must be boolean, found '{}'",
                p.catalog().display(&ty)
            );
            return Err(RuleSyntaxError::new(ErrorCode::E0402, message, TextSize::from(0)));
        }
        Ok(ParsedCondition {
            expr,
            positions: p.into_context().into_positions(),
        })
    }

    /// Parse exactly one statement.
    pub fn parse_single_statement(
        &mut self,
        text: &str,
    ) -> Result<ParsedStatement, RuleSyntaxError> {
        let tokens = tokenize(text)?;
        tracing::debug!(tokens = tokens.len(), "parsing statement");
        let mut p = self.parser(ParserContext::new(tokens));

        let action = parse_statement(&mut p).map_err(|s| into_syntax_error(s, p.offset()))?;
        expect_end(&p, "statement")?;
        Ok(ParsedStatement {
            action,
            positions: p.into_context().into_positions(),
        })
    }

    /// Parse statements up to the end of the text, each optionally followed by `;`.
    pub fn parse_statement_list(&mut self, text: &str) -> Result<ParsedActions, RuleSyntaxError> {
        let tokens = tokenize(text)?;
        tracing::debug!(tokens = tokens.len(), "parsing statement list");
        let mut p = self.parser(ParserContext::new(tokens));

        let mut actions = Vec::new();
        while !p.at_end() {
            actions.push(parse_statement(&mut p).map_err(|s| into_syntax_error(s, p.offset()))?);
            while p.eat(TokenKind::Semicolon) {}
        }
        Ok(ParsedActions {
            actions,
            positions: p.into_context().into_positions(),
        })
    }

    /// Parse `tokens` as a postfix expression in completion mode and return
    /// where it stopped, if it stopped at a completion point.
    pub(crate) fn completion_request(&mut self, tokens: Vec<Token>) -> Option<CompletionRequest> {
        let mut p = self.parser(ParserContext::completion(tokens));
        match parse_postfix(&mut p, true, ValueCheck::READ) {
            Err(ParseStop::Complete(request)) => Some(request),
            Err(ParseStop::Error(err)) => {
                tracing::debug!(code = %err.code, "no completion context");
                None
            }
            Ok(_) => None,
        }
    }
}

fn expect_end<P: RuleGrammar>(p: &P, what: &str) -> Result<(), RuleSyntaxError> {
    if p.at_end() {
        Ok(())
    } else {
        let message = format!("unexpected {} after the {what}", p.current_kind());
        Err(RuleSyntaxError::new(ErrorCode::E0207, message, p.offset()))
    }
}
