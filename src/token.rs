use crate::error::Location;

/// Token kinds in the Tsuta template language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Raw text outside of any delimiter
    Text(String),
    /// Identifier or tag keyword
    Name(String),

    /// Opening string delimiter "
    StringOpen,
    /// Closing string delimiter "
    StringClose,
    /// Opening print delimiter {{
    PrintOpen,
    /// Closing print delimiter }}
    PrintClose,
    /// Opening tag delimiter {%
    TagOpen,
    /// Closing tag delimiter %}
    TagClose,

    /// Whitespace inside a delimiter (elided by the token stream, not the lexer)
    Whitespace(String),

    /// End of input
    Eof,
}

impl TokenKind {
    /// Short kind name used in parse error messages
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Text(_) => "text",
            TokenKind::Name(_) => "name",
            TokenKind::StringOpen => "string open",
            TokenKind::StringClose => "string close",
            TokenKind::PrintOpen => "print open",
            TokenKind::PrintClose => "print close",
            TokenKind::TagOpen => "tag open",
            TokenKind::TagClose => "tag close",
            TokenKind::Whitespace(_) => "whitespace",
            TokenKind::Eof => "end of input",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its kind and source location
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }
}
