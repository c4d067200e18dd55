//! Readers/writers for parent lists.
//!
//! A parent list is a line of whitespace-separated head indices, one per
//! token, where 0 attaches a token to the root. An index may be followed by
//! a colon and a dependency label (`2:SUBJ`); the label is ignored.

use std::io;

use itertools::Itertools;

use crate::error::{IOError, ParseError};

/// A trait for objects that can read parent lists.
pub trait ReadParents {
    /// Read the next parent list.
    ///
    /// Returns `None` when the input is exhausted.
    fn read_parents(&mut self) -> Result<Option<Vec<usize>>, IOError>;

    /// Get an iterator over the parent lists in this reader.
    fn parent_lists(self) -> ParentLists<Self>
    where
        Self: Sized,
    {
        ParentLists { reader: self }
    }
}

/// A reader for parent lists.
///
/// Blank lines are skipped.
pub struct ParentsReader<R> {
    read: R,
}

impl<R: io::BufRead> ParentsReader<R> {
    pub fn new(read: R) -> Self {
        ParentsReader { read }
    }
}

impl<R: io::BufRead> ReadParents for ParentsReader<R> {
    fn read_parents(&mut self) -> Result<Option<Vec<usize>>, IOError> {
        let mut line = String::new();

        loop {
            line.clear();

            if self.read.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let parents = line
                .split_whitespace()
                .map(parse_head)
                .collect::<Result<Vec<_>, _>>()?;

            if !parents.is_empty() {
                return Ok(Some(parents));
            }
        }
    }
}

fn parse_head(item: &str) -> Result<usize, ParseError> {
    let head = item.split(':').next().unwrap_or(item);
    head.parse().map_err(|_| ParseError::ParseIntField {
        value: item.to_owned(),
    })
}

/// An iterator over the parent lists in a reader.
pub struct ParentLists<R>
where
    R: ReadParents,
{
    reader: R,
}

impl<R> Iterator for ParentLists<R>
where
    R: ReadParents,
{
    type Item = Result<Vec<usize>, IOError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_parents().transpose()
    }
}

/// A trait for objects that can write parent lists.
pub trait WriteParents {
    fn write_parents(&mut self, parents: &[usize]) -> Result<(), IOError>;
}

/// A writer for parent lists.
///
/// Heads are separated by a single space, every list is terminated by
/// a newline.
pub struct ParentsWriter<W> {
    write: W,
}

impl<W: io::Write> ParentsWriter<W> {
    pub fn new(write: W) -> Self {
        ParentsWriter { write }
    }

    /// Borrow the embedded writer.
    pub fn get_ref(&self) -> &W {
        &self.write
    }

    /// Unwrap the embedded writer.
    pub fn into_inner(self) -> W {
        self.write
    }
}

impl<W: io::Write> WriteParents for ParentsWriter<W> {
    fn write_parents(&mut self, parents: &[usize]) -> Result<(), IOError> {
        writeln!(self.write, "{}", parents.iter().join(" "))?;
        Ok(())
    }
}
