use deptree::GraphError;
use thiserror::Error;

/// Projectivization errors.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// An edge score was set for a position outside the sentence, or for
    /// the root as a dependent.
    #[error("cannot score edge {head:?} -> {dependent:?} in a sentence with {len:?} tokens")]
    ScoreOutOfBounds {
        head: usize,
        dependent: usize,
        len: usize,
    },

    /// An edge score was set for an edge from a token to itself.
    #[error("cannot score edge from token {token:?} to itself")]
    SelfLoop { token: usize },

    /// The heads of a sentence cannot be read, or they do not form a
    /// well-formed dependency tree.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The decoder recovered a different number of edges than there are
    /// tokens.
    #[error("decoder recovered {edges:?} edges for {tokens:?} tokens")]
    InconsistentDecode { edges: usize, tokens: usize },
}
