mod error;
pub use crate::error::GraphError;

pub mod graph;

pub mod sentence;

pub mod token;

#[cfg(test)]
mod tests;
