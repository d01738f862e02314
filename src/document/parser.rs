//! Reuters SGML parser.
//!
//! Each document in a Reuters `.sgm` file starts with a header line of the
//! form
//!
//! ```text
//! <REUTERS TOPICS="YES" LEWISSPLIT="TRAIN" CGISPLIT="TRAINING-SET" OLDID="5544" NEWID="1">
//! ```
//!
//! followed by a `<TOPICS>` line listing `<D>topic</D>` entries and a
//! `<TEXT ...>` block holding the `<TITLE>` and `<BODY>` of the article.
//!
//! The parser is line oriented. Lines are decoded lossily since some corpus
//! files contain bytes that are not valid UTF-8.
//!
//! # Examples
//!
//! ```
//! use lexiclass::document::class::{DocClass, DocType};
//! use lexiclass::document::parser::parse_sgm;
//!
//! let sgm = "<REUTERS TOPICS=\"YES\" LEWISSPLIT=\"TRAIN\" NEWID=\"7\">\n\
//!            <TOPICS><D>crude</D></TOPICS>\n\
//!            <TEXT>\n\
//!            <TITLE>OIL RISES</TITLE>\n\
//!            <BODY>Prices rose.</BODY></TEXT>\n\
//!            </REUTERS>\n";
//!
//! let docs = parse_sgm(sgm.as_bytes()).unwrap();
//! assert_eq!(docs.len(), 1);
//! assert_eq!(docs[0].id, 7);
//! assert_eq!(docs[0].doc_type, DocType::Train);
//! assert_eq!(docs[0].classes, vec![DocClass::Crude]);
//! assert_eq!(docs[0].text, "OIL RISES\nPrices rose.");
//! ```

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::document::class::{DocClass, DocType};
use crate::error::{LexiclassError, Result};

const DOC_HEADER: &str = "<REUTERS";
const TOPICS_TAG: &str = "<TOPICS>";
const TEXT_BEGIN_TAG: &str = "<TEXT";
const TEXT_END_TAG: &str = "</TEXT";
const TITLE_TAGS: (&str, &str) = ("<TITLE>", "</TITLE>");
const BODY_TAGS: (&str, &str) = ("<BODY>", "</BODY>");

static NEWID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"NEWID="(\d+)""#).expect("Invalid NEWID regex"));

static SPLIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"LEWISSPLIT="([^"]*)""#).expect("Invalid LEWISSPLIT regex"));

static TOPIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<D>([^<]*)</D>").expect("Invalid topic regex"));

/// A document as extracted from an SGML file, before normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument {
    /// Value of the `NEWID` attribute.
    pub id: u64,
    /// Split membership.
    pub doc_type: DocType,
    /// Topics in order of appearance, unknown topics mapped to `Other`.
    pub classes: Vec<DocClass>,
    /// `title + "\n" + body`.
    pub text: String,
}

/// Line reader that tracks 1-based line numbers for error reporting.
struct LineReader<R> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        LineReader {
            reader,
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let line = String::from_utf8_lossy(&self.buffer);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Parse every document in an SGML stream.
pub fn parse_sgm<R: BufRead>(reader: R) -> Result<Vec<RawDocument>> {
    let mut lines = LineReader::new(reader);
    let mut documents = Vec::new();

    while let Some(line) = lines.next_line()? {
        if !line.starts_with(DOC_HEADER) {
            continue;
        }
        let header_line = lines.line_number;

        let id = NEWID_REGEX
            .captures(&line)
            .and_then(|caps| caps[1].parse::<u64>().ok())
            .ok_or_else(|| LexiclassError::parse_at(header_line, "Document header has no NEWID"))?;
        let doc_type = SPLIT_REGEX
            .captures(&line)
            .map(|caps| DocType::from_split(&caps[1]))
            .unwrap_or(DocType::Other);

        let classes = read_topics(&mut lines, id)?;
        let text_block = read_text_block(&mut lines, id)?;
        let title = text_between_tags(&text_block, TITLE_TAGS, id)?;
        let body = text_between_tags(&text_block, BODY_TAGS, id)?;

        documents.push(RawDocument {
            id,
            doc_type,
            classes,
            text: format!("{title}\n{body}"),
        });
    }

    log::debug!("Parsed {} documents", documents.len());
    Ok(documents)
}

/// Parse the SGML file at `path`.
pub fn parse_sgm_file<P: AsRef<Path>>(path: P) -> Result<Vec<RawDocument>> {
    let file = fs::File::open(path.as_ref())?;
    parse_sgm(std::io::BufReader::new(file))
}

/// Return the sorted paths of the files in `dir` whose names end with
/// `extension`.
pub fn list_data_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(extension));
        if matches && entry.file_type()?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_topics<R: BufRead>(lines: &mut LineReader<R>, id: u64) -> Result<Vec<DocClass>> {
    while let Some(line) = lines.next_line()? {
        if line.contains(TOPICS_TAG) {
            return Ok(TOPIC_REGEX
                .captures_iter(&line)
                .map(|caps| DocClass::from_topic(&caps[1]))
                .collect());
        }
    }
    Err(LexiclassError::parse(format!(
        "Document {id} has no {TOPICS_TAG} line"
    )))
}

/// Collect the lines after the `<TEXT` line up to the `</TEXT` marker, each
/// prefixed with a newline.
fn read_text_block<R: BufRead>(lines: &mut LineReader<R>, id: u64) -> Result<String> {
    while let Some(line) = lines.next_line()? {
        if !line.contains(TEXT_BEGIN_TAG) {
            continue;
        }

        let mut text = String::new();
        while let Some(line) = lines.next_line()? {
            text.push('\n');
            match line.find(TEXT_END_TAG) {
                Some(end) => {
                    text.push_str(&line[..end]);
                    return Ok(text);
                }
                None => text.push_str(&line),
            }
        }
        return Err(LexiclassError::parse_at(
            lines.line_number,
            format!("Document {id} has an unterminated {TEXT_BEGIN_TAG} block"),
        ));
    }
    Err(LexiclassError::parse(format!(
        "Document {id} has no {TEXT_BEGIN_TAG} block"
    )))
}

/// Text between `begin` and `end` tags. An absent begin tag yields an empty
/// string; a begin tag without a matching end tag is an error.
fn text_between_tags(text: &str, (begin, end): (&str, &str), id: u64) -> Result<String> {
    let Some(begin_pos) = text.find(begin) else {
        return Ok(String::new());
    };
    let content_start = begin_pos + begin.len();

    match text[content_start..].find(end) {
        Some(len) => Ok(text[content_start..content_start + len].to_string()),
        None => Err(LexiclassError::parse(format!(
            "Document {id} has {begin} without {end}"
        ))),
    }
}
