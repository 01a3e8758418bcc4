use thiserror::Error;

/// Source location for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// All errors that can occur in Tsuta
#[derive(Error, Debug)]
pub enum TsutaError {
    #[error("Parse error at {location}: {message}")]
    ParseError { message: String, location: Location },

    #[error("Unknown tag '{name}' at {location}")]
    UnknownTag { name: String, location: Location },

    #[error("No escaper registered for content type '{name}'")]
    UnknownContentType { name: String },

    #[error("Type error: {message}")]
    TypeError { message: String },
}

/// Result type alias for Tsuta operations
pub type Result<T> = std::result::Result<T, TsutaError>;
