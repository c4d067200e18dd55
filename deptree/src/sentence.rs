//! CoNLL sentences.

use std::iter::FromIterator;
use std::ops::{Index, IndexMut};
use std::slice;

use crate::error::GraphError;
use crate::token::{HeadColumn, Token};

/// A CoNLL sentence.
///
/// A sentence consists of the comment lines that precede it and its
/// tokens. Tokens are stored in sentence order; unlike in the tree
/// positions, the first token has index 0.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sentence {
    comments: Vec<String>,
    tokens: Vec<Token>,
}

impl Sentence {
    /// Construct a new, empty sentence.
    pub fn new() -> Self {
        Sentence {
            comments: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Get the comments of the sentence.
    ///
    /// Comments are stored without the leading `#` and without the
    /// trailing line separator.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut Vec<String> {
        &mut self.comments
    }

    /// Get the heads of the tokens.
    ///
    /// The head field of every token is parsed as an unsigned integer,
    /// 0 marks the root. The returned parent array is not validated, use
    /// `DepTree::from_parents` for that.
    pub fn heads(&self, column: HeadColumn) -> Result<Vec<usize>, GraphError> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| {
                let field = token
                    .head_field(column)
                    .ok_or(GraphError::MissingHeadField {
                        token: idx + 1,
                        n_fields: token.len(),
                    })?;

                field.parse::<usize>().map_err(|_| GraphError::ParseHeadField {
                    value: field.to_owned(),
                })
            })
            .collect()
    }

    /// Returns `true` when the sentence does not have tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get an iterator over the tokens.
    pub fn iter(&self) -> slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Get a mutable iterator over the tokens.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Token> {
        self.tokens.iter_mut()
    }

    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Add a token to the sentence.
    ///
    /// Tokens should always be pushed in sentence order.
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Replace the heads of the tokens.
    ///
    /// Every head is written as a decimal number into the head field of
    /// the corresponding token. No other field is changed. The sentence
    /// is not modified when an error is returned.
    pub fn set_heads(&mut self, column: HeadColumn, heads: &[usize]) -> Result<(), GraphError> {
        if heads.len() != self.tokens.len() {
            return Err(GraphError::HeadCount {
                expected: self.tokens.len(),
                found: heads.len(),
            });
        }

        let field_indices = self
            .tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| {
                column.index(token.len()).ok_or(GraphError::MissingHeadField {
                    token: idx + 1,
                    n_fields: token.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for ((token, field_idx), head) in self.tokens.iter_mut().zip(field_indices).zip(heads) {
            token.set_field(field_idx, head.to_string());
        }

        Ok(())
    }

    /// Get the tokens of the sentence.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl FromIterator<Token> for Sentence {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Token>,
    {
        Sentence {
            comments: Vec::new(),
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a Token;
    type IntoIter = slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Sentence {
    type Item = &'a mut Token;
    type IntoIter = slice::IterMut<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl Index<usize> for Sentence {
    type Output = Token;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.tokens[idx]
    }
}

impl IndexMut<usize> for Sentence {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.tokens[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::Sentence;
    use crate::error::GraphError;
    use crate::tests::TEST_SENTENCES;
    use crate::token::{HeadColumn, Token};

    #[test]
    fn heads() {
        assert_eq!(
            TEST_SENTENCES[0].heads(HeadColumn::default()),
            Ok(vec![2, 0])
        );
        assert_eq!(
            TEST_SENTENCES[1].heads(HeadColumn::FromStart(6)),
            Ok(vec![0, 1, 4, 1])
        );
    }

    #[test]
    fn heads_rejects_missing_field() {
        let sentence: Sentence = vec![vec!["1", "a", "0"], vec!["2", "b"]]
            .into_iter()
            .map(|fields| fields.into_iter().collect::<Token>())
            .collect();

        assert_eq!(
            sentence.heads(HeadColumn::FromStart(2)),
            Err(GraphError::MissingHeadField {
                token: 2,
                n_fields: 2
            })
        );
    }

    #[test]
    fn heads_rejects_non_numeric_field() {
        let mut sentence = TEST_SENTENCES[0].clone();
        sentence[1].set_field(6, "root");
        assert_eq!(
            sentence.heads(HeadColumn::default()),
            Err(GraphError::ParseHeadField {
                value: "root".to_owned()
            })
        );
    }

    #[test]
    fn set_heads_only_changes_head_field() {
        let mut sentence = TEST_SENTENCES[1].clone();
        sentence
            .set_heads(HeadColumn::default(), &[0, 1, 2, 1])
            .unwrap();

        assert_eq!(sentence.heads(HeadColumn::default()), Ok(vec![0, 1, 2, 1]));
        assert_eq!(sentence.comments(), TEST_SENTENCES[1].comments());
        for (token, original) in sentence.iter().zip(TEST_SENTENCES[1].iter()) {
            for idx in (0..token.len()).filter(|&idx| idx != 6) {
                assert_eq!(token.field(idx), original.field(idx));
            }
        }
    }

    #[test]
    fn set_heads_rejects_head_count_mismatch() {
        let mut sentence = TEST_SENTENCES[1].clone();
        assert_eq!(
            sentence.set_heads(HeadColumn::default(), &[0, 1]),
            Err(GraphError::HeadCount {
                expected: 4,
                found: 2
            })
        );
        assert_eq!(sentence, TEST_SENTENCES[1]);
    }

    #[test]
    fn set_heads_leaves_sentence_untouched_on_error() {
        let mut sentence: Sentence = vec![vec!["a", "2", "x"], vec!["b"]]
            .into_iter()
            .map(|fields| fields.into_iter().collect::<Token>())
            .collect();
        let original = sentence.clone();

        assert_eq!(
            sentence.set_heads(HeadColumn::FromStart(1), &[7, 7]),
            Err(GraphError::MissingHeadField {
                token: 2,
                n_fields: 1
            })
        );
        assert_eq!(sentence, original);
        assert_eq!(sentence[0].fields(), &["a", "2", "x"]);
    }
}
