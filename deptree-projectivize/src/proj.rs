//! Projectivization of dependency trees.

use deptree::graph::{DepEdge, DepTree};
use deptree::sentence::Sentence;
use deptree::token::HeadColumn;

use crate::eisner::EisnerDecoder;
use crate::Error;

/// Graph projectivizer.
pub trait Projectivize {
    /// Projectivize a sentence.
    ///
    /// This method rewrites the heads of a non-projective sentence, such
    /// that they form a projective tree.
    fn projectivize(&self, sentence: &mut Sentence) -> Result<(), Error>;
}

/// A projectivizer that finds the projective tree that shares the most
/// edges with the input tree.
///
/// Every edge of the input tree gets score 1, all other edges score 0.
/// The highest-scoring projective tree, as found by the Eisner decoder,
/// is then the projective tree that preserves the largest number of
/// input edges. Projective trees are left unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EisnerProjectivizer {
    head_column: HeadColumn,
    validate: bool,
}

impl EisnerProjectivizer {
    /// Construct a projectivizer that reads and writes the fourth field
    /// from the end and does not validate trees.
    pub fn new() -> Self {
        EisnerProjectivizer {
            head_column: HeadColumn::default(),
            validate: false,
        }
    }

    /// Read and write heads in `head_column`.
    pub fn with_head_column(mut self, head_column: HeadColumn) -> Self {
        self.head_column = head_column;
        self
    }

    /// Reject sentences whose heads do not form a well-formed tree.
    ///
    /// Without validation, any parent array with heads in range and
    /// without self-loops is decoded, including arrays with cycles or
    /// several root dependents.
    pub fn validating(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Projectivize a parent array.
    pub fn projectivize_parents(&self, parents: &[usize]) -> Result<Vec<usize>, Error> {
        if self.validate {
            projectivize_parents_checked(parents)
        } else {
            projectivize_parents(parents)
        }
    }
}

impl Default for EisnerProjectivizer {
    fn default() -> Self {
        EisnerProjectivizer::new()
    }
}

impl Projectivize for EisnerProjectivizer {
    fn projectivize(&self, sentence: &mut Sentence) -> Result<(), Error> {
        let heads = sentence.heads(self.head_column)?;
        let projective_heads = self.projectivize_parents(&heads)?;

        if projective_heads != heads {
            sentence.set_heads(self.head_column, &projective_heads)?;
        }

        Ok(())
    }
}

/// Projectivize the head column of a CoNLL sentence.
///
/// Heads are read from and written to the fourth field from the end.
/// All other fields are left untouched.
pub fn projectivize_conll(sentence: &mut Sentence) -> Result<(), Error> {
    EisnerProjectivizer::new().projectivize(sentence)
}

/// Projectivize a parent array.
///
/// `parents[i]` is the head of token *i + 1*, where 0 is the root. Returns
/// the parent array of the projective tree that agrees with `parents` on
/// the largest number of edges.
///
/// The parent array is not validated beyond the bounds of its heads: a
/// head that is out of range or a token that is its own head results in
/// an error, other malformed trees are still mapped to a projective
/// tree.
///
/// ```
/// use deptree_projectivize::projectivize_parents;
///
/// assert_eq!(projectivize_parents(&[2, 3, 0]).unwrap(), vec![2, 3, 0]);
/// ```
pub fn projectivize_parents(parents: &[usize]) -> Result<Vec<usize>, Error> {
    let mut decoder = EisnerDecoder::from_sentence_length(parents.len(), 0.0);
    for (idx, &head) in parents.iter().enumerate() {
        decoder.set_score(head, idx + 1, 1.0)?;
    }

    let edges = decoder.decode(0.0)?;

    Ok(edges.iter().map(DepEdge::head).collect())
}

/// Projectivize a parent array, after verifying that it is a
/// well-formed tree.
pub fn projectivize_parents_checked(parents: &[usize]) -> Result<Vec<usize>, Error> {
    DepTree::from_parents(parents)?;
    projectivize_parents(parents)
}
