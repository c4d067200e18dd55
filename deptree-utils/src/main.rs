use std::io::{BufRead, BufWriter, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use conll::io::{ReadSentence, Reader, Separator, WriteSentence, Writer};
use conll::parents::{ParentsReader, ParentsWriter, ReadParents, WriteParents};
use deptree::token::HeadColumn;
use deptree_projectivize::{EisnerProjectivizer, Projectivize};
use log::{debug, info};
use stdinout::{Input, Output};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum Mode {
    /// CoNLL sentences, separated by blank lines.
    Conll,

    /// One line of whitespace-separated heads per sentence.
    Parents,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum FieldSeparator {
    Space,
    Tab,
}

impl From<FieldSeparator> for Separator {
    fn from(separator: FieldSeparator) -> Self {
        match separator {
            FieldSeparator::Space => Separator::Space,
            FieldSeparator::Tab => Separator::Tab,
        }
    }
}

/// Projectivize dependency trees.
///
/// Every tree is replaced by the projective tree that shares the most
/// edges with it. Projective trees are written unchanged.
#[derive(Debug, Parser)]
#[command(name = "dep-projectivize", version)]
struct Args {
    /// Input format.
    #[arg(short, long, value_enum, default_value_t = Mode::Conll)]
    mode: Mode,

    /// Column of the head field, counted from 1. Defaults to the fourth
    /// column from the end.
    #[arg(long)]
    head_column: Option<usize>,

    /// Field separator of CoNLL output.
    #[arg(long, value_enum, default_value_t = FieldSeparator::Tab)]
    separator: FieldSeparator,

    /// Fail on heads that do not form a well-formed tree.
    #[arg(long)]
    strict: bool,

    /// Input file, standard input when absent.
    input: Option<String>,

    /// Output file, standard output when absent.
    output: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let projectivizer = EisnerProjectivizer::new()
        .with_head_column(head_column(args.head_column)?)
        .validating(args.strict);

    let input = Input::from(args.input.clone());
    let read = input.buf_read().context("Cannot open input")?;

    let output = Output::from(args.output.clone());
    let write = BufWriter::new(output.write().context("Cannot open output")?);

    match args.mode {
        Mode::Conll => projectivize_sentences(&projectivizer, read, write, args.separator.into()),
        Mode::Parents => projectivize_parent_lists(&projectivizer, read, write),
    }
}

/// Map a 1-based head column to a `HeadColumn`, the fourth column from the
/// end when no column is given.
fn head_column(column: Option<usize>) -> Result<HeadColumn> {
    match column {
        Some(0) => bail!("Head columns are counted from 1"),
        Some(column) => Ok(HeadColumn::FromStart(column - 1)),
        None => Ok(HeadColumn::default()),
    }
}

fn projectivize_sentences(
    projectivizer: &EisnerProjectivizer,
    read: impl BufRead,
    write: impl Write,
    separator: Separator,
) -> Result<()> {
    let mut writer = Writer::with_separator(write, separator);

    let mut n_sentences = 0;
    let mut n_changed = 0;
    for sentence in Reader::new(read).sentences() {
        let mut sentence = sentence.context("Cannot read sentence")?;
        n_sentences += 1;

        let original = sentence.clone();
        projectivizer
            .projectivize(&mut sentence)
            .with_context(|| format!("Cannot projectivize sentence {}", n_sentences))?;

        if sentence != original {
            n_changed += 1;
            debug!("Projectivized sentence {}", n_sentences);
        }

        writer
            .write_sentence(&sentence)
            .context("Cannot write sentence")?;
    }

    writer.into_inner().flush().context("Cannot write sentence")?;

    info!("Projectivized {} of {} sentences", n_changed, n_sentences);

    Ok(())
}

fn projectivize_parent_lists(
    projectivizer: &EisnerProjectivizer,
    read: impl BufRead,
    write: impl Write,
) -> Result<()> {
    let mut writer = ParentsWriter::new(write);

    let mut n_sentences = 0;
    let mut n_changed = 0;
    for parents in ParentsReader::new(read).parent_lists() {
        let parents = parents.context("Cannot read parent list")?;
        n_sentences += 1;

        let projective = projectivizer
            .projectivize_parents(&parents)
            .with_context(|| format!("Cannot projectivize parent list {}", n_sentences))?;

        if projective != parents {
            n_changed += 1;
            debug!("Projectivized parent list {}", n_sentences);
        }

        writer
            .write_parents(&projective)
            .context("Cannot write parent list")?;
    }

    writer
        .into_inner()
        .flush()
        .context("Cannot write parent list")?;

    info!("Projectivized {} of {} parent lists", n_changed, n_sentences);

    Ok(())
}
