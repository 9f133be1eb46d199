//! Token cursor shared by the grammar functions.

use text_size::TextSize;

use super::token::{Token, TokenKind};
use crate::base::{NodeId, NodeIdGen, PositionMap};

/// A saved cursor position, for speculative parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// Token buffer plus everything one parse accumulates: the cursor, the node
/// position map and the node id allocator.
#[derive(Debug)]
pub struct ParserContext {
    tokens: Vec<Token>,
    pos: usize,
    end: Token,
    positions: PositionMap,
    ids: NodeIdGen,
    completion: bool,
}

impl ParserContext {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = match tokens.last() {
            Some(last) if last.kind == TokenKind::EndOfInput => last.clone(),
            Some(last) => Token::end_of_input(last.offset),
            None => Token::end_of_input(TextSize::from(0)),
        };
        Self {
            tokens,
            pos: 0,
            end,
            positions: PositionMap::new(),
            ids: NodeIdGen::new(),
            completion: false,
        }
    }

    /// A context that reports completion points instead of failing at end of input.
    pub fn completion(tokens: Vec<Token>) -> Self {
        Self {
            completion: true,
            ..Self::new(tokens)
        }
    }

    pub fn is_completion(&self) -> bool {
        self.completion
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// The current token; past the end this is the trailing end-of-input token.
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.end)
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub fn offset(&self) -> TextSize {
        self.current().offset
    }

    /// Kind of the token `n` places ahead of the current one.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::EndOfInput, |t| t.kind)
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub fn at_end(&self) -> bool {
        self.at(TokenKind::EndOfInput)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn save(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn restore(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    // =========================================================================
    // Node bookkeeping
    // =========================================================================

    /// A new node id positioned at `offset`.
    pub fn fresh_id(&mut self, offset: TextSize) -> NodeId {
        let id = self.ids.fresh();
        self.positions.insert(id, offset);
        id
    }

    /// Move an existing node to `offset`.
    pub fn reposition(&mut self, id: NodeId, offset: TextSize) {
        self.positions.insert(id, offset);
    }

    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    pub fn into_positions(self) -> PositionMap {
        self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;

    #[test]
    fn test_reading_past_the_end_yields_end_of_input() {
        let mut cx = ParserContext::new(tokenize("a").unwrap());
        assert_eq!(cx.advance().kind, TokenKind::Identifier);
        assert!(cx.at_end());
        assert_eq!(cx.advance().kind, TokenKind::EndOfInput);
        assert_eq!(cx.advance().kind, TokenKind::EndOfInput);
        assert_eq!(cx.offset(), TextSize::from(1));
    }

    #[test]
    fn test_save_and_restore() {
        let mut cx = ParserContext::new(tokenize("a . b").unwrap());
        let mark = cx.save();
        cx.advance();
        assert!(cx.eat(TokenKind::Dot));
        assert_eq!(cx.peek_kind(1), TokenKind::EndOfInput);
        cx.restore(mark);
        assert!(cx.at(TokenKind::Identifier));
        assert_eq!(cx.peek_kind(1), TokenKind::Dot);
    }

    #[test]
    fn test_fresh_ids_are_positioned() {
        let mut cx = ParserContext::new(Vec::new());
        assert!(cx.at_end());
        let id = cx.fresh_id(TextSize::from(4));
        assert_eq!(cx.positions().get(id), Some(TextSize::from(4)));
    }
}
