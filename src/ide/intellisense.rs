//! Backward parsing of partial rule text.
//!
//! Completion runs on text that is usually invalid as a whole. Instead of
//! parsing it forward, [`IntellisenseParser`] walks the tokens backward from
//! the cursor to isolate the longest trailing postfix expression, and
//! [`RuleParser::get_completions`] parses only that slice.

use super::completion::{CompletionItem, Completions};
use crate::parser::{tokenize_lenient, RuleParser, Token, TokenKind};
use crate::validation::TypeOracle;

/// Scans partial text backward to find what is being completed.
#[derive(Debug, Clone)]
pub struct IntellisenseParser {
    tokens: Vec<Token>,
    end: Token,
}

impl IntellisenseParser {
    pub fn new(text: &str) -> Self {
        Self::from_tokens(tokenize_lenient(text))
    }

    /// `tokens` may end with the end-of-input token.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        let end = if tokens.last().is_some_and(|t| t.kind == TokenKind::EndOfInput) {
            tokens.pop()
        } else {
            None
        };
        let end = end.unwrap_or_else(|| {
            Token::end_of_input(tokens.last().map(|t| t.offset).unwrap_or_default())
        });
        Self { tokens, end }
    }

    /// The trailing tokens to parse forward, terminated by end of input.
    ///
    /// * a one-letter identifier not preceded by `.` stands alone;
    /// * a trailing `.` or `(` takes the postfix chain in front of it;
    /// * anything else has no completion context.
    pub fn back_parse(&self) -> Option<Vec<Token>> {
        let tokens = &self.tokens;
        let last = tokens.len().checked_sub(1)?;
        let trailing = &tokens[last];

        let start = match trailing.kind {
            TokenKind::Identifier => {
                let single = trailing.ident().is_some_and(|n| n.chars().count() == 1);
                let after_dot = last > 0 && tokens[last - 1].kind == TokenKind::Dot;
                (single && !after_dot).then_some(last)?
            }
            TokenKind::Dot | TokenKind::LParen => self.chain_start(last.checked_sub(1)?)?,
            _ => return None,
        };

        tracing::trace!(start, last, "back-parsed completion context");
        let mut slice = tokens[start..=last].to_vec();
        slice.push(self.end.clone());
        Some(slice)
    }

    /// Start of the postfix chain ending at `index`.
    fn chain_start(&self, mut index: usize) -> Option<usize> {
        let tokens = &self.tokens;
        loop {
            let before = index.checked_sub(1).map(|i| tokens[i].kind);
            match tokens[index].kind {
                TokenKind::Identifier | TokenKind::TypeName => match before {
                    Some(TokenKind::Dot) => index = index.checked_sub(2)?,
                    Some(TokenKind::New) => return Some(index - 1),
                    _ => return Some(index),
                },
                TokenKind::This => return Some(index),
                TokenKind::RParen => {
                    let open = self.matching_open(index, TokenKind::LParen, TokenKind::RParen)?;
                    match open.checked_sub(1).map(|i| tokens[i].kind) {
                        Some(TokenKind::Identifier) => index = open - 1,
                        // `new T<A>(...)`, or a comparison in front of a group
                        Some(TokenKind::Greater) => {
                            return self.chain_start(open - 1).or(Some(open));
                        }
                        _ => return Some(open),
                    }
                }
                TokenKind::RBracket => {
                    let open =
                        self.matching_open(index, TokenKind::LBracket, TokenKind::RBracket)?;
                    index = open.checked_sub(1)?;
                }
                TokenKind::Greater => {
                    let open = self.matching_open(index, TokenKind::Less, TokenKind::Greater)?;
                    index = open.checked_sub(1)?;
                }
                _ => return None,
            }
        }
    }

    /// Index of the `open` token balancing the `close` token at `index`.
    fn matching_open(&self, index: usize, open: TokenKind, close: TokenKind) -> Option<usize> {
        let mut depth = 0usize;
        for i in (0..=index).rev() {
            let kind = self.tokens[i].kind;
            if kind == close {
                depth += 1;
            } else if kind == open {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }
}

impl<V: TypeOracle> RuleParser<V> {
    /// Completion candidates for the end of `text`, sorted by label.
    ///
    /// `None` when the text does not end at a completion point.
    pub fn get_completions(&mut self, text: &str) -> Option<Vec<CompletionItem>> {
        let suffix = IntellisenseParser::new(text).back_parse()?;
        tracing::debug!(tokens = suffix.len(), "collecting completions");

        let mut items = match suffix.as_slice() {
            [root, _] if root.kind == TokenKind::Identifier => {
                let first = root.ident()?.chars().next()?;
                Completions::new(self.context(), self.tables()).root(first)
            }
            _ => {
                let request = self.completion_request(suffix)?;
                Completions::new(self.context(), self.tables()).for_request(&request)
            }
        };
        items.sort_by(|a, b| a.label.cmp(&b.label));
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[rstest]
    #[case("total > this.", &[TokenKind::This, TokenKind::Dot])]
    #[case("a", &[TokenKind::Identifier])]
    #[case("x + Shop.Order.", &[
        TokenKind::Identifier, TokenKind::Dot, TokenKind::Identifier, TokenKind::Dot,
    ])]
    #[case("f(Raise(1, (2)).", &[
        TokenKind::Identifier, TokenKind::LParen, TokenKind::IntegerLiteral, TokenKind::Comma,
        TokenKind::LParen, TokenKind::IntegerLiteral, TokenKind::RParen, TokenKind::RParen,
        TokenKind::Dot,
    ])]
    #[case("new Shop.Order(", &[
        TokenKind::New, TokenKind::Identifier, TokenKind::Dot, TokenKind::Identifier,
        TokenKind::LParen,
    ])]
    #[case("items[0][1].Max(", &[
        TokenKind::Identifier, TokenKind::LBracket, TokenKind::IntegerLiteral,
        TokenKind::RBracket, TokenKind::LBracket, TokenKind::IntegerLiteral,
        TokenKind::RBracket, TokenKind::Dot, TokenKind::Identifier, TokenKind::LParen,
    ])]
    #[case("1 + (a + b).", &[
        TokenKind::LParen, TokenKind::Identifier, TokenKind::Plus, TokenKind::Identifier,
        TokenKind::RParen, TokenKind::Dot,
    ])]
    fn test_back_parse_isolates_suffix(#[case] text: &str, #[case] expected: &[TokenKind]) {
        let suffix = IntellisenseParser::new(text).back_parse().unwrap();
        let (end, body) = suffix.split_last().unwrap();
        assert_eq!(end.kind, TokenKind::EndOfInput);
        assert_eq!(kinds(body), expected);
    }

    #[rstest]
    #[case("")]
    #[case("total")]
    #[case("this.ab")]
    #[case("1 + 2")]
    #[case("x.a")]
    #[case("a + ).")]
    #[case("\"open.")]
    fn test_back_parse_without_context(#[case] text: &str) {
        assert_eq!(IntellisenseParser::new(text).back_parse(), None);
    }
}
