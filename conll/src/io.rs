//! CoNLL format reader and writers.

use std::io;

use deptree::sentence::Sentence;
use deptree::token::Token;
use itertools::Itertools;

use crate::error::{IOError, ParseError};

/// A trait for objects that can read CoNLL `Sentence`s
pub trait ReadSentence {
    /// Read a `Sentence` from this object.
    ///
    /// # Errors
    ///
    /// A call to `read_sentence` may generate an error to indicate that
    /// the operation could not be completed.
    fn read_sentence(&mut self) -> Result<Option<Sentence>, IOError>;

    /// Get an iterator over the sentences in this reader.
    fn sentences(self) -> Sentences<Self>
    where
        Self: Sized,
    {
        Sentences { reader: self }
    }
}

/// A reader for CoNLL sentences.
///
/// Every non-blank line is a token. Fields are separated by tabs; lines
/// without tabs are split on whitespace instead, so that the
/// space-separated output of older tools can be read as well. Lines
/// starting with `#` that precede the first token of a sentence are
/// comments.
pub struct Reader<R> {
    read: R,
}

impl<R: io::BufRead> Reader<R> {
    /// Construct a new reader from an object that implements the
    /// `io::BufRead` trait.
    pub fn new(read: R) -> Reader<R> {
        Reader { read }
    }
}

impl<R: io::BufRead> IntoIterator for Reader<R> {
    type Item = Result<Sentence, IOError>;
    type IntoIter = Sentences<Reader<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences()
    }
}

impl<R: io::BufRead> ReadSentence for Reader<R> {
    fn read_sentence(&mut self) -> Result<Option<Sentence>, IOError> {
        let mut line = String::new();
        let mut sentence = Sentence::new();

        loop {
            line.clear();

            // End of reader.
            if self.read.read_line(&mut line)? == 0 {
                if sentence.is_empty() {
                    return Ok(None);
                }

                return Ok(Some(sentence));
            }

            // The blank line is a sentence separator. We want to be robust
            // in the case a CoNLL file is malformed and has two newlines as
            // a separator.
            let trimmed = line.trim();
            if trimmed.is_empty() {
                if sentence.is_empty() {
                    continue;
                }

                return Ok(Some(sentence));
            }

            if sentence.is_empty() {
                if let Some(stripped) = line.strip_prefix('#') {
                    let comment = stripped.trim_end_matches(|c: char| c == '\n' || c == '\r');
                    sentence.comments_mut().push(comment.to_owned());
                    continue;
                }
            }

            let token = parse_token(trimmed);

            if let Some(first) = sentence.tokens().first() {
                if first.len() != token.len() {
                    return Err(ParseError::FieldCount {
                        expected: first.len(),
                        found: token.len(),
                        line: trimmed.to_owned(),
                    }
                    .into());
                }
            }

            sentence.push(token);
        }
    }
}

fn parse_token(line: &str) -> Token {
    if line.contains('\t') {
        line.split('\t').collect()
    } else {
        line.split_whitespace().collect()
    }
}

/// An iterator over the sentences in a `Reader`.
pub struct Sentences<R>
where
    R: ReadSentence,
{
    reader: R,
}

impl<R> Iterator for Sentences<R>
where
    R: ReadSentence,
{
    type Item = Result<Sentence, IOError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_sentence() {
            Ok(None) => None,
            Ok(Some(sent)) => Some(Ok(sent)),
            Err(e) => Some(Err(e)),
        }
    }
}

/// A trait for objects that can write CoNLL `Sentence`s.
pub trait WriteSentence {
    /// Write a sentence into this object.
    ///
    /// # Errors
    ///
    /// A call to `write_sentence` may generate an error to indicate that
    /// the operation could not be completed.
    fn write_sentence(&mut self, sentence: &Sentence) -> Result<(), IOError>;
}

/// Field separator of written tokens.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Separator {
    Space,
    Tab,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Tab => "\t",
        }
    }
}

impl Default for Separator {
    fn default() -> Self {
        Separator::Tab
    }
}

/// A writer for CoNLL sentences.
///
/// This writer writes one token per line, followed by a blank line after
/// every sentence. Comments are written before the tokens of their
/// sentence.
pub struct Writer<W> {
    write: W,
    separator: Separator,
}

impl<W: io::Write> Writer<W> {
    /// Construct a new writer from an object that implements the `io::Write`
    /// trait. Fields are separated by tabs.
    pub fn new(write: W) -> Writer<W> {
        Writer::with_separator(write, Separator::Tab)
    }

    /// Construct a new writer that separates fields by `separator`.
    pub fn with_separator(write: W, separator: Separator) -> Writer<W> {
        Writer { write, separator }
    }

    /// Borrow the embedded writer. Getting the underlying writer is often
    /// useful when the writer writes to a memory object.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str;
    ///
    /// use conll::io::{Writer, WriteSentence};
    /// use deptree::sentence::Sentence;
    /// use deptree::token::Token;
    ///
    /// let output = Vec::new();
    /// let mut writer = Writer::new(output);
    /// let mut sent = Sentence::new();
    /// sent.push(vec!["1", "hello", "0"].into_iter().collect::<Token>());
    /// sent.push(vec!["2", "world", "1"].into_iter().collect::<Token>());
    ///
    /// writer.write_sentence(&sent).unwrap();
    ///
    /// assert_eq!(
    ///     str::from_utf8(writer.get_ref()).unwrap(),
    ///     "1\thello\t0\n2\tworld\t1\n\n"
    /// );
    /// ```
    pub fn get_ref(&self) -> &W {
        &self.write
    }

    /// Unwrap the embedded writer.
    pub fn into_inner(self) -> W {
        self.write
    }
}

impl<W: io::Write> WriteSentence for Writer<W> {
    fn write_sentence(&mut self, sentence: &Sentence) -> Result<(), IOError> {
        for comment in sentence.comments() {
            writeln!(self.write, "#{}", comment)?;
        }

        for token in sentence {
            writeln!(
                self.write,
                "{}",
                token.fields().iter().join(self.separator.as_str())
            )?;
        }

        writeln!(self.write)?;

        Ok(())
    }
}
