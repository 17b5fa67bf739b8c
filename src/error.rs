//! Error types shared by the algorithms, dataset parsing and the benchmark harness.

use std::fmt;
use std::path::PathBuf;

/// Errors returned by the public entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation precondition was violated (too few points, malformed integer, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A single record of a text dataset could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A dataset file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// A malformed line in a points or integers dataset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number in the source text.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line has no comma separating the two fields.
    MissingComma,
    /// A field is empty or not an integer literal.
    InvalidNumber { field: usize, text: String },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingComma => write!(f, "expected two comma-separated fields"),
            Self::InvalidNumber { field, text } => {
                write!(f, "field {field} is not an integer: {text:?}")
            }
        }
    }
}
