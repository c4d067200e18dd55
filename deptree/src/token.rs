//! Tokens of a CoNLL sentence.

use std::iter::FromIterator;
use std::mem;
use std::ops::Index;

/// The column of a token that holds the head index.
///
/// CoNLL dialects differ in the number and order of their columns. The
/// head column can be addressed from the start or from the end of a
/// token's fields, the latter works for layouts that only differ in
/// leading columns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeadColumn {
    /// Zero-based field index from the start.
    FromStart(usize),

    /// One-based field index from the end, `FromEnd(1)` is the last field.
    FromEnd(usize),
}

impl HeadColumn {
    /// Get the field index of the head column in a token with `n_fields`
    /// fields.
    ///
    /// Returns `None` if the token does not have the column.
    ///
    /// ```
    /// use deptree::token::HeadColumn;
    ///
    /// assert_eq!(HeadColumn::default().index(10), Some(6));
    /// assert_eq!(HeadColumn::FromStart(6).index(10), Some(6));
    /// assert_eq!(HeadColumn::FromEnd(4).index(3), None);
    /// ```
    pub fn index(self, n_fields: usize) -> Option<usize> {
        match self {
            HeadColumn::FromStart(idx) if idx < n_fields => Some(idx),
            HeadColumn::FromEnd(offset) if offset != 0 && offset <= n_fields => {
                Some(n_fields - offset)
            }
            _ => None,
        }
    }
}

impl Default for HeadColumn {
    /// The fourth field from the end, which is the seventh (head) field of
    /// the ten-column CoNLL-X layout.
    fn default() -> Self {
        HeadColumn::FromEnd(4)
    }
}

/// A token.
///
/// A token is one line of a CoNLL sentence, stored as its list of fields.
/// Fields are not interpreted, except for the head field when the
/// sentence's heads are requested.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    fields: Vec<String>,
}

impl Token {
    /// Create a new token from its fields.
    pub fn new(fields: Vec<String>) -> Token {
        Token { fields }
    }

    /// Get the field at `idx`.
    pub fn field(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    /// Get the fields of the token.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Get the head field.
    pub fn head_field(&self, column: HeadColumn) -> Option<&str> {
        column.index(self.len()).and_then(|idx| self.field(idx))
    }

    /// Returns `true` when the token has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Set the field at `idx`.
    ///
    /// Returns the field that is replaced, or `None` if the token does not
    /// have a field at `idx`.
    pub fn set_field(&mut self, idx: usize, value: impl Into<String>) -> Option<String> {
        self.fields
            .get_mut(idx)
            .map(|field| mem::replace(field, value.into()))
    }
}

impl<S> FromIterator<S> for Token
where
    S: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Token {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Index<usize> for Token {
    type Output = str;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.fields[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::{HeadColumn, Token};

    fn conllx_token() -> Token {
        "1\tDie\tdie\tART\tART\tcase=nominative\t2\tDET\t_\t_"
            .split('\t')
            .collect()
    }

    #[test]
    fn head_column_index() {
        assert_eq!(HeadColumn::FromStart(0).index(1), Some(0));
        assert_eq!(HeadColumn::FromStart(1).index(1), None);
        assert_eq!(HeadColumn::FromEnd(1).index(1), Some(0));
        assert_eq!(HeadColumn::FromEnd(0).index(1), None);
        assert_eq!(HeadColumn::FromEnd(4).index(8), Some(4));
    }

    #[test]
    fn head_field() {
        let token = conllx_token();
        assert_eq!(token.head_field(HeadColumn::default()), Some("2"));
        assert_eq!(token.head_field(HeadColumn::FromStart(6)), Some("2"));
        assert_eq!(token.head_field(HeadColumn::FromStart(10)), None);
    }

    #[test]
    fn set_field() {
        let mut token = conllx_token();
        assert_eq!(token.set_field(6, "0"), Some("2".to_owned()));
        assert_eq!(&token[6], "0");
        assert_eq!(&token[7], "DET");
        assert_eq!(token.set_field(10, "0"), None);
        assert_eq!(token.len(), 10);
    }

    #[test]
    fn new_token() {
        let token = Token::new(vec!["1".to_owned(), "Die".to_owned(), "0".to_owned()]);
        assert_eq!(token, vec!["1", "Die", "0"].into_iter().collect::<Token>());
        assert_eq!(token.field(1), Some("Die"));
        assert!(!token.is_empty());
        assert!(Token::new(Vec::new()).is_empty());
    }
}
