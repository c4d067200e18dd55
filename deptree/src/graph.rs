//! Dependency trees.

use std::cmp::{max, min};
use std::collections::HashSet;

use petgraph::graph::{node_index, DiGraph};
use petgraph::visit::{Bfs, EdgeRef};

use crate::error::GraphError;

/// A dependency edge.
///
/// An edge consists of a head position and a dependent position. Position
/// 0 is the artificial root, tokens are numbered from 1.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct DepEdge {
    head: usize,
    dependent: usize,
}

impl DepEdge {
    /// Construct a new dependency edge.
    pub fn new(head: usize, dependent: usize) -> Self {
        DepEdge { head, dependent }
    }

    /// Get the dependent.
    pub fn dependent(&self) -> usize {
        self.dependent
    }

    /// Get the head.
    pub fn head(&self) -> usize {
        self.head
    }

    /// The distance between the head and the dependent.
    pub fn distance(&self) -> usize {
        max(self.head, self.dependent) - min(self.head, self.dependent)
    }
}

/// A well-formed dependency tree.
///
/// `DepTree` stores the heads of a sentence as a parent array: the head of
/// token *i* is stored at index *i - 1*, a head of 0 attaches a token to
/// the root. Construction verifies that the parent array describes a tree
/// with a single root dependent, so that the methods of this type can
/// rely on that.
///
/// The edges are also kept in a `petgraph` `DiGraph` over positions
/// *0..=n*, which is used for the reachability queries.
#[derive(Clone, Debug)]
pub struct DepTree {
    heads: Vec<usize>,
    graph: DiGraph<(), ()>,
}

impl DepTree {
    /// Construct a tree from a parent array.
    ///
    /// ```
    /// use deptree::graph::DepTree;
    ///
    /// let tree = DepTree::from_parents(&[2, 0, 2]).unwrap();
    /// assert_eq!(tree.head(1), Some(2));
    /// assert!(tree.is_projective());
    ///
    /// assert!(DepTree::from_parents(&[0, 3, 2]).is_err());
    /// ```
    pub fn from_parents(parents: &[usize]) -> Result<Self, GraphError> {
        let len = parents.len();

        let mut root = None;
        for (idx, &head) in parents.iter().enumerate() {
            let dependent = idx + 1;

            if head > len {
                return Err(GraphError::HeadOutOfBounds {
                    head,
                    dependent,
                    len,
                });
            }

            if head == dependent {
                return Err(GraphError::SelfLoop { token: dependent });
            }

            if head == 0 {
                if let Some(first) = root {
                    return Err(GraphError::MultipleRoots {
                        first,
                        second: dependent,
                    });
                }
                root = Some(dependent);
            }
        }

        if len != 0 && root.is_none() {
            return Err(GraphError::MissingRoot);
        }

        let mut graph = DiGraph::with_capacity(len + 1, len);
        for _ in 0..=len {
            graph.add_node(());
        }
        for (idx, &head) in parents.iter().enumerate() {
            graph.add_edge(node_index(head), node_index(idx + 1), ());
        }

        let tree = DepTree {
            heads: parents.to_owned(),
            graph,
        };

        // With a single head per token, every token that cannot be reached
        // from the root hangs from a cycle.
        let reachable = tree.reachable_from(0);
        if let Some(unreachable) = (1..=len).find(|token| !reachable.contains(token)) {
            return Err(GraphError::Cycle {
                token: tree.cycle_member(unreachable),
            });
        }

        Ok(tree)
    }

    /// Get the edges of the tree, ordered by dependent.
    pub fn edges(&self) -> impl Iterator<Item = DepEdge> + '_ {
        self.heads
            .iter()
            .enumerate()
            .map(|(idx, &head)| DepEdge::new(head, idx + 1))
    }

    /// Return the head of `dependent`.
    ///
    /// Returns `None` for the root and for positions past the last token.
    pub fn head(&self, dependent: usize) -> Option<usize> {
        if dependent == 0 {
            return None;
        }

        self.heads.get(dependent - 1).copied()
    }

    /// Get the parent array of the tree.
    pub fn heads(&self) -> &[usize] {
        &self.heads
    }

    /// Returns `true` if `node` is `ancestor` or one of its descendants.
    pub fn dominates(&self, ancestor: usize, node: usize) -> bool {
        let mut cur = node;
        loop {
            if cur == ancestor {
                return true;
            }

            match self.head(cur) {
                Some(head) => cur = head,
                None => return false,
            }
        }
    }

    /// Returns `true` if the tree does not have tokens.
    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    /// Returns `true` if the tree does not have crossing edges.
    pub fn is_projective(&self) -> bool {
        self.edges().all(|edge| self.edge_is_projective(edge))
    }

    /// Get the number of tokens in the tree.
    ///
    /// The root is not counted.
    pub fn len(&self) -> usize {
        self.heads.len()
    }

    /// Returns non-projective edges in the tree, ordered by distance.
    ///
    /// Edges of the same distance are ordered by head and then dependent.
    pub fn non_projective_edges(&self) -> Vec<DepEdge> {
        let mut non_projective = Vec::new();

        for head in 0..self.graph.node_count() {
            let head_reachable = self.reachable_from(head);

            for edge in self.graph.edges(node_index(head)) {
                // An edge i -> k is projective, iff:
                //
                // i > j > k or i < j < k, and i ->* j
                let dependent = edge.target().index();
                if (min(head, dependent) + 1..max(head, dependent))
                    .any(|between| !head_reachable.contains(&between))
                {
                    non_projective.push(DepEdge::new(head, dependent));
                }
            }
        }

        non_projective.sort_by_key(|edge| (edge.distance(), *edge));

        non_projective
    }

    fn edge_is_projective(&self, edge: DepEdge) -> bool {
        let lower = min(edge.head(), edge.dependent());
        let upper = max(edge.head(), edge.dependent());
        (lower + 1..upper).all(|between| self.dominates(edge.head(), between))
    }

    fn reachable_from(&self, node: usize) -> HashSet<usize> {
        let mut reachable = HashSet::new();
        let mut bfs = Bfs::new(&self.graph, node_index(node));
        while let Some(node) = bfs.next(&self.graph) {
            reachable.insert(node.index());
        }
        reachable
    }

    /// Follow heads from `token` until a position repeats.
    fn cycle_member(&self, token: usize) -> usize {
        let mut seen = HashSet::new();
        let mut cur = token;
        while seen.insert(cur) {
            cur = self.heads[cur - 1];
        }
        cur
    }
}

impl Eq for DepTree {}

impl PartialEq for DepTree {
    fn eq(&self, other: &Self) -> bool {
        self.heads == other.heads
    }
}
