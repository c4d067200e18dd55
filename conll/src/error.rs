use std::io;

use thiserror::Error;

/// CoNLL IO error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IOError {
    /// Error in file IO.
    #[error("error reading or writing treebank")]
    IO(#[from] io::Error),

    /// Parsing error.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// CoNLL parsing errors.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// A token has a different number of fields than the first token of
    /// its sentence.
    #[error("expected {expected:?} fields, found {found:?}: {line:?}")]
    FieldCount {
        expected: usize,
        found: usize,
        line: String,
    },

    /// An integer field could not be parsed as an integer.
    #[error("cannot parse as integer field: {value:?}")]
    ParseIntField { value: String },
}
