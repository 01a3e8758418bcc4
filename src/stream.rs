use crate::error::{Result, TsutaError};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Pull-based token buffer over the lexer.
///
/// Tokens are pulled lazily and retained in an index-addressable list with a
/// movable cursor, so arbitrary backtracking is a cursor move rather than a
/// pair of history/backlog stacks.
pub struct TokenStream {
    lexer: Lexer,
    read: Vec<Token>,
    cursor: usize,
}

/// Opaque cursor position, restored with [`TokenStream::reset`]
#[derive(Debug, Clone, Copy)]
pub struct Mark(usize);

impl TokenStream {
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            read: Vec::new(),
            cursor: 0,
        }
    }

    /// Return the next token, preferring backtracked tokens over fresh
    /// lexer output
    pub fn next(&mut self) -> Token {
        if self.cursor == self.read.len() {
            let token = self.lexer.next_token();
            self.read.push(token);
        }
        let token = self.read[self.cursor].clone();
        self.cursor += 1;
        token
    }

    /// Un-read the most recently read token.
    ///
    /// Only valid immediately following a matching [`next`]; calling it with
    /// no read history is a programming error and panics.
    ///
    /// [`next`]: TokenStream::next
    pub fn backup(&mut self) {
        assert!(self.cursor > 0, "backup called with no read tokens");
        self.cursor -= 1;
    }

    /// Non-destructive single-token lookahead
    pub fn peek(&mut self) -> Token {
        let token = self.next();
        self.backup();
        token
    }

    /// Return the next non-whitespace token, discarding whitespace
    pub fn next_non_space(&mut self) -> Token {
        loop {
            let token = self.next();
            if !matches!(token.kind, TokenKind::Whitespace(_)) {
                return token;
            }
        }
    }

    /// Return the next non-whitespace token, failing fatally if its kind
    /// does not match
    pub fn expect(&mut self, expected: &TokenKind) -> Result<Token> {
        let token = self.next_non_space();
        if std::mem::discriminant(&token.kind) != std::mem::discriminant(expected) {
            return Err(TsutaError::ParseError {
                message: format!("expected {}, got {}", expected, token.kind),
                location: token.location,
            });
        }
        Ok(token)
    }

    /// Save the cursor for a later [`reset`]
    ///
    /// [`reset`]: TokenStream::reset
    pub fn mark(&self) -> Mark {
        Mark(self.cursor)
    }

    /// Restore the cursor to a previously saved position
    pub fn reset(&mut self, mark: Mark) {
        self.cursor = mark.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(source: &str) -> TokenStream {
        TokenStream::new(Lexer::new(source))
    }

    #[test]
    fn test_next_returns_tokens_in_order() {
        let mut s = stream("{{ x }}");
        assert!(matches!(s.next().kind, TokenKind::PrintOpen));
        assert!(matches!(s.next().kind, TokenKind::Whitespace(_)));
        assert!(matches!(s.next().kind, TokenKind::Name(_)));
    }

    #[test]
    fn test_backup_replays_token() {
        let mut s = stream("{{ x }}");
        let first = s.next();
        s.backup();
        let again = s.next();
        assert_eq!(first.kind, again.kind);
    }

    #[test]
    fn test_backup_multiple() {
        let mut s = stream("{{ x }}");
        s.next();
        s.next();
        s.next();
        s.backup();
        s.backup();
        s.backup();
        assert!(matches!(s.next().kind, TokenKind::PrintOpen));
    }

    #[test]
    #[should_panic(expected = "backup called with no read tokens")]
    fn test_backup_without_history_panics() {
        let mut s = stream("{{ x }}");
        s.backup();
    }

    #[test]
    fn test_peek_is_non_destructive() {
        let mut s = stream("{{ x }}");
        let peeked = s.peek();
        let next = s.next();
        assert_eq!(peeked.kind, next.kind);
    }

    #[test]
    fn test_next_non_space_skips_whitespace() {
        let mut s = stream("{{ x }}");
        s.next(); // print open
        let token = s.next_non_space();
        assert!(matches!(&token.kind, TokenKind::Name(n) if n == "x"));
    }

    #[test]
    fn test_expect_match() {
        let mut s = stream("{{ x }}");
        assert!(s.expect(&TokenKind::PrintOpen).is_ok());
        assert!(s.expect(&TokenKind::Name(String::new())).is_ok());
        assert!(s.expect(&TokenKind::PrintClose).is_ok());
    }

    #[test]
    fn test_expect_mismatch_reports_both_kinds() {
        let mut s = stream("{{ x }}");
        let err = s.expect(&TokenKind::TagOpen).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expected tag open"));
        assert!(message.contains("got print open"));
    }

    #[test]
    fn test_mark_and_reset() {
        let mut s = stream("{{ x }}");
        let mark = s.mark();
        s.next();
        s.next();
        s.next();
        s.reset(mark);
        assert!(matches!(s.next().kind, TokenKind::PrintOpen));
    }
}
