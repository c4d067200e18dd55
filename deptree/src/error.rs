use thiserror::Error;

/// Graph processing error.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("head {head:?} of token {dependent:?} is out of bounds for a tree with {len:?} tokens")]
    HeadOutOfBounds {
        head: usize,
        dependent: usize,
        len: usize,
    },

    #[error("token {token:?} is its own head")]
    SelfLoop { token: usize },

    #[error("no token is attached to the root")]
    MissingRoot,

    #[error("tokens {first:?} and {second:?} are both attached to the root")]
    MultipleRoots { first: usize, second: usize },

    #[error("token {token:?} is part of a cycle")]
    Cycle { token: usize },

    /// The number of heads differs from the number of tokens.
    #[error("expected {expected:?} heads, found {found:?}")]
    HeadCount { expected: usize, found: usize },

    /// The head field is not present in a token.
    #[error("token {token:?} has {n_fields:?} fields, no head field")]
    MissingHeadField { token: usize, n_fields: usize },

    /// The head field could not be parsed as an integer.
    #[error("cannot parse head field: {value:?}")]
    ParseHeadField { value: String },
}
