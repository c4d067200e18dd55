//! Eisner's decoder for projective dependency trees.
//!
//! The decoder finds the projective dependency tree with the highest
//! total edge score in O(n³) time and O(n²) space. See: *Three New
//! Probabilistic Models for Dependency Parsing: An Exploration*, Eisner,
//! 1996.

use std::ops::{Index, IndexMut};

use deptree::graph::DepEdge;

use crate::Error;

/// Chart cell: the best score of a span and the split that achieves it.
#[derive(Clone, Copy, Debug)]
struct Cell {
    score: f64,
    split: usize,
}

impl Cell {
    const UNREACHABLE: Cell = Cell {
        score: f64::NEG_INFINITY,
        split: 0,
    };
}

/// A dense chart, indexed by span `(i, j)`.
struct Chart {
    size: usize,
    cells: Vec<Cell>,
}

impl Chart {
    fn new(size: usize) -> Self {
        let mut chart = Chart {
            size,
            cells: vec![Cell::UNREACHABLE; size * size],
        };

        for i in 0..size {
            chart[(i, i)] = Cell {
                score: 0.0,
                split: i,
            };
        }

        chart
    }
}

impl Index<(usize, usize)> for Chart {
    type Output = Cell;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.cells[i * self.size + j]
    }
}

impl IndexMut<(usize, usize)> for Chart {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        &mut self.cells[i * self.size + j]
    }
}

/// Span types of the back-tracing agenda.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Span {
    /// Head `i`, dependent `j`, the dependent's left half is still open.
    OpenRight,

    /// Head `j`, dependent `i`.
    OpenLeft,

    /// Head `i` with all its right descendants up to `j`.
    ClosedRight,

    /// Head `j` with all its left descendants down to `i`.
    ClosedLeft,
}

/// Find the best split. Splits are tried in order and a later split only
/// wins when its score is strictly higher, so ties go to the smallest
/// split.
fn best_split(mut splits: impl Iterator<Item = usize>, score: impl Fn(usize) -> f64) -> Cell {
    let first = match splits.next() {
        Some(split) => Cell {
            score: score(split),
            split,
        },
        None => return Cell::UNREACHABLE,
    };

    splits.fold(first, |best, split| {
        let split_score = score(split);
        if split_score > best.score {
            Cell {
                score: split_score,
                split,
            }
        } else {
            best
        }
    })
}

/// Decoder for maximum-score projective dependency trees.
///
/// A decoder is constructed for a sentence of *n* tokens. Tokens are
/// numbered *1..=n*, position 0 is the artificial root. After scoring the
/// possible edges with `set_score` or `add_score`, `decode` returns the
/// projective tree with the highest total score. In this tree, the root
/// has exactly one dependent.
///
/// ```
/// use deptree_projectivize::EisnerDecoder;
///
/// let mut decoder = EisnerDecoder::from_sentence_length(2, 0.0);
/// decoder.set_score(0, 2, 1.0).unwrap();
/// decoder.set_score(2, 1, 1.0).unwrap();
///
/// let edges = decoder.decode(0.0).unwrap();
/// assert_eq!(
///     edges.iter().map(|e| (e.head(), e.dependent())).collect::<Vec<_>>(),
///     vec![(2, 1), (0, 2)]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct EisnerDecoder {
    len: usize,
    default_score: f64,
    scores: Vec<Option<f64>>,
}

impl EisnerDecoder {
    /// Construct a decoder for a sentence of `len` tokens.
    ///
    /// All edges have score `default_score` until they are set.
    pub fn from_sentence_length(len: usize, default_score: f64) -> Self {
        EisnerDecoder {
            len,
            default_score,
            scores: vec![None; (len + 1) * (len + 1)],
        }
    }

    /// Add `score` to the score of the edge `head -> dependent`.
    ///
    /// An edge that was not set before starts at 0.
    pub fn add_score(&mut self, head: usize, dependent: usize, score: f64) -> Result<(), Error> {
        let idx = self.score_index(head, dependent)?;
        self.scores[idx] = Some(self.scores[idx].unwrap_or(0.0) + score);
        Ok(())
    }

    /// Decode the projective tree with the highest score.
    ///
    /// Edges that were not scored get `default_score`. Returns one edge
    /// per token, ordered by dependent. Ties between trees are broken
    /// deterministically: every chart cell keeps the smallest split
    /// point among the splits with the highest score.
    pub fn decode(&self, default_score: f64) -> Result<Vec<DepEdge>, Error> {
        self.decode_with_score(default_score).map(|(_, edges)| edges)
    }

    /// Decode the projective tree with the highest score.
    ///
    /// This method is the same as `decode`, but also returns the score of
    /// the tree.
    pub fn decode_with_score(&self, default_score: f64) -> Result<(f64, Vec<DepEdge>), Error> {
        let n = self.len;
        if n == 0 {
            return Ok((0.0, Vec::new()));
        }

        let size = n + 1;
        let score = |head: usize, dependent: usize| {
            self.scores[head * size + dependent].unwrap_or(default_score)
        };

        let mut open_right = Chart::new(size);
        let mut open_left = Chart::new(size);
        let mut closed_right = Chart::new(size);
        let mut closed_left = Chart::new(size);

        for width in 1..=n {
            for i in 0..=n - width {
                let j = i + width;

                // The root takes a single dependent: its open span cannot
                // contain other root dependents to the left of j.
                let last_split = if i == 0 { 0 } else { j - 1 };
                let open = best_split(i..=last_split, |k| {
                    closed_right[(i, k)].score + closed_left[(k + 1, j)].score
                });

                open_right[(i, j)] = Cell {
                    score: open.score + score(i, j),
                    split: open.split,
                };

                // The root is never a dependent.
                if i != 0 {
                    open_left[(i, j)] = Cell {
                        score: open.score + score(j, i),
                        split: open.split,
                    };
                }

                let closed = best_split(i + 1..=j, |k| {
                    open_right[(i, k)].score + closed_right[(k, j)].score
                });
                closed_right[(i, j)] = closed;

                if i != 0 {
                    let closed = best_split(i..j, |k| {
                        closed_left[(i, k)].score + open_left[(k, j)].score
                    });
                    closed_left[(i, j)] = closed;
                }
            }
        }

        let mut edges = Vec::with_capacity(n);
        let mut agenda = vec![(Span::ClosedRight, 0, n)];
        while let Some((span, i, j)) = agenda.pop() {
            if i == j {
                continue;
            }

            match span {
                Span::OpenRight => {
                    edges.push(DepEdge::new(i, j));
                    let k = open_right[(i, j)].split;
                    agenda.push((Span::ClosedRight, i, k));
                    agenda.push((Span::ClosedLeft, k + 1, j));
                }
                Span::OpenLeft => {
                    edges.push(DepEdge::new(j, i));
                    let k = open_left[(i, j)].split;
                    agenda.push((Span::ClosedRight, i, k));
                    agenda.push((Span::ClosedLeft, k + 1, j));
                }
                Span::ClosedRight => {
                    let k = closed_right[(i, j)].split;
                    agenda.push((Span::OpenRight, i, k));
                    agenda.push((Span::ClosedRight, k, j));
                }
                Span::ClosedLeft => {
                    let k = closed_left[(i, j)].split;
                    agenda.push((Span::ClosedLeft, i, k));
                    agenda.push((Span::OpenLeft, k, j));
                }
            }
        }

        if edges.len() != n {
            return Err(Error::InconsistentDecode {
                edges: edges.len(),
                tokens: n,
            });
        }

        edges.sort_by_key(DepEdge::dependent);

        Ok((closed_right[(0, n)].score, edges))
    }

    /// Returns `true` if the decoder is for an empty sentence.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Get the score of the edge `head -> dependent`.
    ///
    /// Returns the score given at construction for edges that were not
    /// set, and `None` for edges that cannot be scored.
    pub fn score(&self, head: usize, dependent: usize) -> Option<f64> {
        self.score_index(head, dependent)
            .ok()
            .map(|idx| self.scores[idx].unwrap_or(self.default_score))
    }

    /// Set the score of the edge `head -> dependent`.
    ///
    /// Replaces the score that was set before.
    pub fn set_score(&mut self, head: usize, dependent: usize, score: f64) -> Result<(), Error> {
        let idx = self.score_index(head, dependent)?;
        self.scores[idx] = Some(score);
        Ok(())
    }

    fn score_index(&self, head: usize, dependent: usize) -> Result<usize, Error> {
        if head > self.len || dependent == 0 || dependent > self.len {
            return Err(Error::ScoreOutOfBounds {
                head,
                dependent,
                len: self.len,
            });
        }

        if head == dependent {
            return Err(Error::SelfLoop { token: head });
        }

        Ok(head * (self.len + 1) + dependent)
    }
}

#[cfg(test)]
mod tests {
    use deptree::graph::{DepEdge, DepTree};
    use quickcheck::quickcheck;

    use super::EisnerDecoder;
    use crate::tests::{projective_trees, random_scores};
    use crate::Error;

    fn heads(edges: &[DepEdge]) -> Vec<usize> {
        edges.iter().map(DepEdge::head).collect()
    }

    #[test]
    fn empty_sentence() {
        let decoder = EisnerDecoder::from_sentence_length(0, 0.0);
        assert!(decoder.is_empty());
        assert_eq!(decoder.decode(0.0), Ok(vec![]));
    }

    #[test]
    fn single_token() {
        let decoder = EisnerDecoder::from_sentence_length(1, 0.0);
        assert_eq!(decoder.len(), 1);
        assert!(!decoder.is_empty());
        assert_eq!(decoder.decode(0.0), Ok(vec![DepEdge::new(0, 1)]));
    }

    #[test]
    fn uniform_scores_break_ties_by_smallest_split() {
        let decoder = EisnerDecoder::from_sentence_length(4, 0.0);
        let first = decoder.decode(0.0).unwrap();
        assert_eq!(heads(&first), vec![0, 1, 2, 3]);
        assert_eq!(decoder.decode(0.0).unwrap(), first);
    }

    #[test]
    fn prefers_highest_scoring_tree() {
        let mut decoder = EisnerDecoder::from_sentence_length(3, 0.0);
        decoder.set_score(0, 2, 10.0).unwrap();
        decoder.set_score(2, 1, 2.0).unwrap();
        decoder.set_score(2, 3, 2.0).unwrap();
        decoder.set_score(1, 3, 3.0).unwrap();

        let (score, edges) = decoder.decode_with_score(0.0).unwrap();
        assert_eq!(heads(&edges), vec![2, 0, 2]);
        assert_eq!(score, 14.0);
    }

    #[test]
    fn root_takes_a_single_dependent() {
        let mut decoder = EisnerDecoder::from_sentence_length(3, 0.0);
        decoder.set_score(0, 1, 1.0).unwrap();
        decoder.set_score(0, 2, 1.0).unwrap();
        decoder.set_score(0, 3, 1.0).unwrap();

        let edges = decoder.decode(0.0).unwrap();
        assert_eq!(edges.iter().filter(|edge| edge.head() == 0).count(), 1);
    }

    #[test]
    fn default_score_applies_to_unset_edges() {
        let mut decoder = EisnerDecoder::from_sentence_length(2, 0.0);
        decoder.set_score(0, 1, -1.0).unwrap();
        decoder.set_score(1, 2, -1.0).unwrap();

        // With unset edges at 0, the tree avoids the penalized edges.
        assert_eq!(heads(&decoder.decode(0.0).unwrap()), vec![2, 0]);

        // With unset edges at -5, the penalized edges are the better deal.
        assert_eq!(heads(&decoder.decode(-5.0).unwrap()), vec![0, 1]);
    }

    #[test]
    fn set_score_overwrites() {
        let mut decoder = EisnerDecoder::from_sentence_length(2, 0.5);
        assert_eq!(decoder.score(2, 1), Some(0.5));
        decoder.set_score(2, 1, 3.0).unwrap();
        decoder.set_score(2, 1, 1.0).unwrap();
        assert_eq!(decoder.score(2, 1), Some(1.0));
    }

    #[test]
    fn add_score_accumulates() {
        let mut decoder = EisnerDecoder::from_sentence_length(2, 0.5);
        decoder.add_score(0, 2, 1.0).unwrap();
        decoder.add_score(0, 2, 2.0).unwrap();
        assert_eq!(decoder.score(0, 2), Some(3.0));
    }

    #[test]
    fn rejects_invalid_edges() {
        let mut decoder = EisnerDecoder::from_sentence_length(2, 0.0);
        assert_eq!(
            decoder.set_score(3, 1, 1.0),
            Err(Error::ScoreOutOfBounds {
                head: 3,
                dependent: 1,
                len: 2
            })
        );
        assert_eq!(
            decoder.set_score(1, 0, 1.0),
            Err(Error::ScoreOutOfBounds {
                head: 1,
                dependent: 0,
                len: 2
            })
        );
        assert_eq!(
            decoder.add_score(1, 3, 1.0),
            Err(Error::ScoreOutOfBounds {
                head: 1,
                dependent: 3,
                len: 2
            })
        );
        assert_eq!(
            decoder.set_score(2, 2, 1.0),
            Err(Error::SelfLoop { token: 2 })
        );
        assert_eq!(decoder.score(2, 2), None);
    }

    #[test]
    fn negative_infinity_scores_still_give_a_tree() {
        let decoder = EisnerDecoder::from_sentence_length(3, 0.0);
        let edges = decoder.decode(f64::NEG_INFINITY).unwrap();
        assert_eq!(edges.len(), 3);
        assert!(DepTree::from_parents(&heads(&edges)).is_ok());
    }

    quickcheck! {
        fn decodes_highest_scoring_projective_tree(seeds: Vec<u32>) -> bool {
            let n = seeds.len() % 5;
            let scores = random_scores(n, &seeds);

            let mut decoder = EisnerDecoder::from_sentence_length(n, 0.0);
            for (head, dependent, score) in &scores {
                decoder.set_score(*head, *dependent, *score).unwrap();
            }

            let (score, edges) = decoder.decode_with_score(0.0).unwrap();
            let tree = DepTree::from_parents(&heads(&edges)).unwrap();

            let tree_score = |tree: &DepTree| -> f64 {
                tree.edges()
                    .map(|edge| decoder.score(edge.head(), edge.dependent()).unwrap())
                    .sum()
            };

            let best = projective_trees(n)
                .iter()
                .map(|tree| tree_score(tree))
                .fold(f64::NEG_INFINITY, f64::max);

            tree.is_projective()
                && (tree_score(&tree) - best).abs() < 1e-9
                && (score - best).abs() < 1e-9
        }
    }
}
