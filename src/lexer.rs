use crate::error::Location;
use crate::token::{Token, TokenKind};

const PRINT_OPEN: &str = "{{";
const PRINT_CLOSE: &str = "}}";
const TAG_OPEN: &str = "{%";
const TAG_CLOSE: &str = "%}";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    /// Outside any delimiter, lexing raw text
    Data,
    /// Between {{ }} or {% %}
    Delim,
    /// Between string quotes inside a delimiter
    Str,
}

/// Lexer for tokenizing Tsuta template source.
///
/// The lexer is a synchronous pull producer: each call to [`next_token`]
/// yields the next token in strict source order, and `Eof` is returned
/// indefinitely once the input is exhausted. There is no lexer-level error
/// kind; malformed delimiter sequences are tokenized permissively and left
/// for the parser to reject.
///
/// [`next_token`]: Lexer::next_token
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    mode: Mode,
}

impl Lexer {
    /// Create a new lexer for the given source
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            mode: Mode::Data,
        }
    }

    /// Produce the next token in source order
    pub fn next_token(&mut self) -> Token {
        if self.eof() {
            return Token::new(TokenKind::Eof, self.location());
        }

        match self.mode {
            Mode::Data => self.lex_data(),
            Mode::Delim => self.lex_delim(),
            Mode::Str => self.lex_str(),
        }
    }

    fn lex_data(&mut self) -> Token {
        let location = self.location();

        if self.match_str(PRINT_OPEN) {
            self.advance_n(PRINT_OPEN.len());
            self.mode = Mode::Delim;
            return Token::new(TokenKind::PrintOpen, location);
        }
        if self.match_str(TAG_OPEN) {
            self.advance_n(TAG_OPEN.len());
            self.mode = Mode::Delim;
            return Token::new(TokenKind::TagOpen, location);
        }

        // Text runs are verbatim, embedded whitespace included
        let mut text = String::new();
        while !self.eof() && !self.match_str(PRINT_OPEN) && !self.match_str(TAG_OPEN) {
            text.push(self.advance());
        }
        Token::new(TokenKind::Text(text), location)
    }

    fn lex_delim(&mut self) -> Token {
        let location = self.location();

        if self.current_char().map_or(false, Self::is_whitespace) {
            let mut value = String::new();
            while self.current_char().map_or(false, Self::is_whitespace) {
                value.push(self.advance());
            }
            return Token::new(TokenKind::Whitespace(value), location);
        }

        if self.match_str(PRINT_CLOSE) {
            self.advance_n(PRINT_CLOSE.len());
            self.mode = Mode::Data;
            return Token::new(TokenKind::PrintClose, location);
        }
        if self.match_str(TAG_CLOSE) {
            self.advance_n(TAG_CLOSE.len());
            self.mode = Mode::Data;
            return Token::new(TokenKind::TagClose, location);
        }
        if self.current_char() == Some('"') {
            self.advance();
            self.mode = Mode::Str;
            return Token::new(TokenKind::StringOpen, location);
        }

        // Anything else is a name run, ending at whitespace, a quote, or a
        // closing delimiter
        let mut value = String::new();
        while let Some(c) = self.current_char() {
            if Self::is_whitespace(c)
                || c == '"'
                || self.match_str(PRINT_CLOSE)
                || self.match_str(TAG_CLOSE)
            {
                break;
            }
            value.push(self.advance());
        }
        Token::new(TokenKind::Name(value), location)
    }

    fn lex_str(&mut self) -> Token {
        let location = self.location();

        if self.current_char() == Some('"') {
            self.advance();
            self.mode = Mode::Delim;
            return Token::new(TokenKind::StringClose, location);
        }

        let mut text = String::new();
        while !self.eof() && self.current_char() != Some('"') {
            text.push(self.advance());
        }
        Token::new(TokenKind::Text(text), location)
    }

    fn eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    fn current_char(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.pos];
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn match_str(&self, s: &str) -> bool {
        let remaining = &self.chars[self.pos..];
        if remaining.len() < s.chars().count() {
            return false;
        }
        s.chars().zip(remaining.iter()).all(|(a, b)| a == *b)
    }

    fn is_whitespace(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\r' | '\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    #[test]
    fn test_plain_text() {
        let tokens = tokenize("Hello, world!");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(&tokens[0].kind, TokenKind::Text(s) if s == "Hello, world!"));
        assert!(matches!(tokens[1].kind, TokenKind::Eof));
    }

    #[test]
    fn test_print_delimiters() {
        let tokens = tokenize("{{ name }}");
        assert!(matches!(tokens[0].kind, TokenKind::PrintOpen));
        assert!(matches!(&tokens[1].kind, TokenKind::Whitespace(_)));
        assert!(matches!(&tokens[2].kind, TokenKind::Name(s) if s == "name"));
        assert!(matches!(&tokens[3].kind, TokenKind::Whitespace(_)));
        assert!(matches!(tokens[4].kind, TokenKind::PrintClose));
        assert!(matches!(tokens[5].kind, TokenKind::Eof));
    }

    #[test]
    fn test_tag_delimiters() {
        let tokens = tokenize("{% block title %}");
        assert!(matches!(tokens[0].kind, TokenKind::TagOpen));
        assert!(matches!(&tokens[2].kind, TokenKind::Name(s) if s == "block"));
        assert!(matches!(&tokens[4].kind, TokenKind::Name(s) if s == "title"));
        assert!(matches!(tokens[6].kind, TokenKind::TagClose));
    }

    #[test]
    fn test_string_literal() {
        let tokens = tokenize("{% block \"title\" %}");
        assert!(matches!(tokens[4].kind, TokenKind::StringOpen));
        assert!(matches!(&tokens[5].kind, TokenKind::Text(s) if s == "title"));
        assert!(matches!(tokens[6].kind, TokenKind::StringClose));
    }

    #[test]
    fn test_string_preserves_whitespace() {
        let tokens = tokenize("{{ \"a b\" }}");
        assert!(matches!(&tokens[3].kind, TokenKind::Text(s) if s == "a b"));
    }

    #[test]
    fn test_text_around_print() {
        let tokens = tokenize("a{{ x }}b");
        assert!(matches!(&tokens[0].kind, TokenKind::Text(s) if s == "a"));
        assert!(matches!(tokens[1].kind, TokenKind::PrintOpen));
        assert!(matches!(&tokens[5].kind, TokenKind::PrintClose));
        assert!(matches!(&tokens[6].kind, TokenKind::Text(s) if s == "b"));
    }

    #[test]
    fn test_text_keeps_embedded_whitespace() {
        let tokens = tokenize("  two words \n");
        assert!(matches!(&tokens[0].kind, TokenKind::Text(s) if s == "  two words \n"));
    }

    #[test]
    fn test_unterminated_print_is_not_a_lexer_error() {
        let tokens = tokenize("{{ name");
        assert!(matches!(tokens[0].kind, TokenKind::PrintOpen));
        assert!(matches!(&tokens[2].kind, TokenKind::Name(s) if s == "name"));
        assert!(matches!(tokens[3].kind, TokenKind::Eof));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("");
        assert!(matches!(lexer.next_token().kind, TokenKind::Eof));
        assert!(matches!(lexer.next_token().kind, TokenKind::Eof));
    }

    #[test]
    fn test_locations_track_lines() {
        let tokens = tokenize("ab\n{{ x }}");
        assert_eq!(tokens[0].location, Location::new(1, 1));
        assert_eq!(tokens[1].location, Location::new(2, 1));
        assert_eq!(tokens[3].location, Location::new(2, 4));
    }
}
