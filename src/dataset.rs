//! Flat-file dataset format and dataset construction.
//!
//! A dataset file holds one record per document:
//!
//! ```text
//! <id> <class>
//! <term> <count>
//! <term> <count>
//!
//! <id> <class>
//! ...
//! ```
//!
//! Every record ends with a blank line. Records are written in ascending id
//! order and terms in byte order, so the same corpus always produces the
//! same file.
//!
//! # Examples
//!
//! ```
//! use lexiclass::dataset::{read_dataset, write_dataset, LabeledSample};
//! use lexiclass::document::{DocClass, Sample};
//!
//! let mut sample = Sample::new();
//! sample.insert("oil".to_string(), 2);
//! let docs = vec![LabeledSample { id: 5, class: DocClass::Crude, sample }];
//!
//! let mut buffer = Vec::new();
//! write_dataset(&mut buffer, &docs).unwrap();
//! assert_eq!(String::from_utf8(buffer.clone()).unwrap(), "5 crude\noil 2\n\n");
//!
//! let read = read_dataset(buffer.as_slice()).unwrap();
//! assert_eq!(read, docs);
//! ```

use std::fs;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use crate::analysis::normalizer::Normalizer;
use crate::document::class::{DocClass, DocType};
use crate::document::parser::{RawDocument, list_data_files, parse_sgm_file};
use crate::document::Sample;
use crate::error::{LexiclassError, Result};

/// A normalized document with its single class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledSample {
    pub id: u64,
    pub class: DocClass,
    pub sample: Sample,
}

/// Train and test splits produced by [`construct_datasets`].
#[derive(Clone, Debug, Default)]
pub struct Datasets {
    pub train: Vec<LabeledSample>,
    pub test: Vec<LabeledSample>,
}

/// Write `docs` in the dataset format.
pub fn write_dataset<W: Write>(writer: W, docs: &[LabeledSample]) -> Result<()> {
    let mut writer = BufWriter::new(writer);

    let mut ordered: Vec<&LabeledSample> = docs.iter().collect();
    ordered.sort_by_key(|doc| doc.id);

    for doc in ordered {
        writeln!(writer, "{} {}", doc.id, doc.class)?;

        let mut terms: Vec<(&String, &usize)> = doc.sample.iter().collect();
        terms.sort_unstable_by(|a, b| a.0.cmp(b.0));
        for (term, count) in terms {
            writeln!(writer, "{term} {count}")?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write `docs` to the file at `path`, replacing it.
pub fn write_dataset_file<P: AsRef<Path>>(path: P, docs: &[LabeledSample]) -> Result<()> {
    let file = fs::File::create(path.as_ref())?;
    write_dataset(file, docs)
}

/// Read a dataset. The first malformed line fails the whole read.
pub fn read_dataset<R: BufRead>(reader: R) -> Result<Vec<LabeledSample>> {
    let mut docs = Vec::new();
    let mut current: Option<LabeledSample> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        if line.is_empty() {
            match current.take() {
                Some(doc) => docs.push(doc),
                None => {
                    return Err(LexiclassError::parse_at(
                        line_number,
                        "Blank line outside of a record",
                    ));
                }
            }
            continue;
        }

        let (first, second) = split_pair(&line, line_number)?;
        match current.as_mut() {
            None => {
                let id = first.parse::<u64>().map_err(|e| {
                    LexiclassError::parse_at(line_number, format!("Invalid document id {first:?}: {e}"))
                })?;
                let class = second
                    .parse::<DocClass>()
                    .map_err(|e| LexiclassError::parse_at(line_number, e.to_string()))?;
                current = Some(LabeledSample {
                    id,
                    class,
                    sample: Sample::new(),
                });
            }
            Some(doc) => {
                let count = second.parse::<usize>().map_err(|e| {
                    LexiclassError::parse_at(line_number, format!("Invalid count {second:?}: {e}"))
                })?;
                *doc.sample.entry(first.to_string()).or_insert(0) += count;
            }
        }
    }

    if let Some(doc) = current {
        docs.push(doc);
    }

    log::debug!("Read {} dataset records", docs.len());
    Ok(docs)
}

/// Read the dataset file at `path`.
pub fn read_dataset_file<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledSample>> {
    let file = fs::File::open(path.as_ref())?;
    read_dataset(std::io::BufReader::new(file))
}

/// Split the dataset into parallel sample and label vectors.
pub fn into_samples_and_labels(docs: Vec<LabeledSample>) -> (Vec<Sample>, Vec<DocClass>) {
    docs.into_iter().map(|doc| (doc.sample, doc.class)).unzip()
}

/// Build the train and test datasets from every data file in `dataset_dir`.
///
/// A document is kept only if it has exactly one class other than
/// [`DocClass::Other`]; documents outside the train/test splits are dropped.
/// All documents share `normalizer`, so its statistics cover the whole corpus.
pub fn construct_datasets<P: AsRef<Path>>(
    dataset_dir: P,
    extension: &str,
    normalizer: &mut Normalizer,
) -> Result<Datasets> {
    let files = list_data_files(dataset_dir.as_ref(), extension)?;
    log::info!(
        "Found {} data files in {}",
        files.len(),
        dataset_dir.as_ref().display()
    );

    let mut raw_docs = Vec::new();
    for path in &files {
        log::debug!("Parsing {}", path.display());
        raw_docs.extend(parse_sgm_file(path)?);
    }
    raw_docs.sort_by_key(|doc| doc.id);

    let mut datasets = Datasets::default();
    for doc in raw_docs {
        let Some((doc_type, class)) = single_target_class(&doc) else {
            continue;
        };
        let sample = normalizer.get_doc_terms(&doc.text)?;
        let labeled = LabeledSample {
            id: doc.id,
            class,
            sample,
        };
        match doc_type {
            DocType::Train => datasets.train.push(labeled),
            DocType::Test => datasets.test.push(labeled),
            DocType::Other => {}
        }
    }

    log::info!(
        "Constructed {} train and {} test documents",
        datasets.train.len(),
        datasets.test.len()
    );
    Ok(datasets)
}

/// The split and class of a document usable for training or testing.
fn single_target_class(doc: &RawDocument) -> Option<(DocType, DocClass)> {
    if doc.doc_type == DocType::Other {
        return None;
    }

    let mut targets = doc.classes.iter().filter(|class| **class != DocClass::Other);
    match (targets.next(), targets.next()) {
        (Some(class), None) => Some((doc.doc_type, *class)),
        _ => None,
    }
}

fn split_pair(line: &str, line_number: usize) -> Result<(&str, &str)> {
    match line.rsplit_once(' ') {
        Some((first, second)) if !first.is_empty() && !second.is_empty() => Ok((first, second)),
        _ => Err(LexiclassError::parse_at(
            line_number,
            format!("Expected two fields, got {line:?}"),
        )),
    }
}
