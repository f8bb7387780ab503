//! Read-only sequential view over a token slice.

use crate::token::{Token, TokenKind};

/// Cursor with one-step advance and bounded lookahead.
///
/// Advancing past the last token is a no-op, so the cursor never fails;
/// it simply reports end of input through `None`.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Token under the cursor, or `None` at end of input.
    #[must_use]
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Token `k` positions ahead of the current one (`peek(0)` is current).
    #[must_use]
    pub fn peek(&self, k: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + k)
    }

    /// Token immediately before the current position.
    #[must_use]
    pub fn previous(&self) -> Option<&'a Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Move back one token. Used only to re-read an operand that was
    /// already consumed.
    pub const fn step_back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// True when the current token has the given kind and lexeme.
    #[must_use]
    pub fn check(&self, kind: TokenKind, text: &str) -> bool {
        self.current().is_some_and(|t| t.is(kind, text))
    }

    /// True when the token `k` ahead has the given kind and lexeme.
    #[must_use]
    pub fn check_at(&self, k: usize, kind: TokenKind, text: &str) -> bool {
        self.peek(k).is_some_and(|t| t.is(kind, text))
    }

    /// True when the current token has the given kind.
    #[must_use]
    pub fn check_kind(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }
}
