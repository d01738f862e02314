//! Document normalizer.
//!
//! The [`Normalizer`] turns raw document text into a [`Sample`] of term
//! counts. It wraps a [`PipelineAnalyzer`] built as
//!
//! ```text
//! [HtmlEntity] → Whitespace → Punctuation → Lowercase → Stop → Porter → RemoveEmpty
//! ```
//!
//! and keeps cumulative frequency tables of the raw tokens and the normalized
//! terms it has seen, which [`Normalizer::stats`] summarizes.
//!
//! # Examples
//!
//! ```
//! use lexiclass::analysis::normalizer::Normalizer;
//! use lexiclass::analysis::token_filter::stop::StopFilter;
//!
//! let stop = StopFilter::from_words(vec!["the", "of"]).unwrap();
//! let mut normalizer = Normalizer::new(stop);
//!
//! assert_eq!(normalizer.normalize("The").unwrap(), "");
//! assert_eq!(normalizer.normalize("\"Prices,\"").unwrap(), "price");
//!
//! let sample = normalizer.get_doc_terms("The price of oil, the prices").unwrap();
//! assert_eq!(sample["price"], 2);
//! assert_eq!(sample["oil"], 1);
//! ```

use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::html_entity::HtmlEntityCharFilter;
use crate::analysis::token::{IntoTokenStream, Token};
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::punctuation::PunctuationFilter;
use crate::analysis::token_filter::remove_empty::RemoveEmptyFilter;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::document::Sample;
use crate::error::Result;

/// Default number of entries in the top-term lists of [`NormalizerStats`].
pub const DEFAULT_TOP_TERM_COUNT: usize = 20;

/// Corpus statistics accumulated by a [`Normalizer`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerStats {
    /// Tokens seen before normalization.
    pub total_unnormalized_tokens: usize,
    /// Tokens that survived normalization.
    pub total_normalized_tokens: usize,
    /// Distinct raw tokens.
    pub total_unnormalized_terms: usize,
    /// Distinct normalized terms.
    pub total_normalized_terms: usize,
    /// Most frequent raw tokens, most frequent first.
    pub top_unnormalized_terms: Vec<String>,
    /// Most frequent normalized terms, most frequent first.
    pub top_normalized_terms: Vec<String>,
}

/// Tokenizes and normalizes documents while keeping corpus statistics.
///
/// The frequency tables are cumulative over every document passed to
/// [`Normalizer::get_doc_terms`]; construct a fresh instance to reset them.
#[derive(Debug)]
pub struct Normalizer {
    analyzer: PipelineAnalyzer,
    unnormalized_terms: AHashMap<String, usize>,
    normalized_terms: AHashMap<String, usize>,
    total_unnormalized_tokens: usize,
    total_normalized_tokens: usize,
    top_term_count: usize,
}

impl Normalizer {
    /// Create a normalizer that uses the given stop word list.
    pub fn new(stop_filter: StopFilter) -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(PunctuationFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(stop_filter))
            .add_filter(Arc::new(StemFilter::new()))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("normalizer");

        Normalizer {
            analyzer,
            unnormalized_terms: AHashMap::new(),
            normalized_terms: AHashMap::new(),
            total_unnormalized_tokens: 0,
            total_normalized_tokens: 0,
            top_term_count: DEFAULT_TOP_TERM_COUNT,
        }
    }

    /// Create a normalizer whose stop word list is read from `path`.
    ///
    /// A missing or empty list is an error.
    pub fn from_stopword_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(StopFilter::from_file(path)?))
    }

    /// Decode the corpus HTML entities before tokenizing.
    pub fn with_html_entities(mut self) -> Result<Self> {
        self.analyzer = self
            .analyzer
            .add_char_filter(Arc::new(HtmlEntityCharFilter::new()?));
        Ok(self)
    }

    /// Set the length of the top-term lists reported by [`Normalizer::stats`].
    pub fn with_top_term_count(mut self, top_term_count: usize) -> Self {
        self.top_term_count = top_term_count;
        self
    }

    /// The underlying analysis pipeline.
    pub fn analyzer(&self) -> &PipelineAnalyzer {
        &self.analyzer
    }

    /// Split `text` into raw whitespace-delimited tokens.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.tokenize(text)?.map(|token| token.text).collect())
    }

    /// Normalize a single token. Returns an empty string when the token is
    /// dropped (stop word or punctuation only).
    pub fn normalize(&self, token: &str) -> Result<String> {
        let stream = Box::new(std::iter::once(Token::new(token, 0)));
        Ok(self
            .analyzer
            .filter_tokens(stream)?
            .next()
            .map(|token| token.text)
            .unwrap_or_default())
    }

    /// Tokenize and normalize a document into term counts, updating the
    /// corpus statistics.
    pub fn get_doc_terms(&mut self, doc: &str) -> Result<Sample> {
        let text = self.analyzer.char_filter(doc);
        let tokens: Vec<Token> = self.analyzer.tokenize(&text)?.collect();

        self.total_unnormalized_tokens += tokens.len();
        for token in &tokens {
            *self.unnormalized_terms.entry(token.text.clone()).or_insert(0) += 1;
        }

        let mut sample = Sample::new();
        for token in self.analyzer.filter_tokens(tokens.into_token_stream())? {
            self.total_normalized_tokens += 1;
            *self.normalized_terms.entry(token.text.clone()).or_insert(0) += 1;
            *sample.entry(token.text).or_insert(0) += 1;
        }

        Ok(sample)
    }

    /// Summarize the statistics accumulated so far.
    pub fn stats(&self) -> NormalizerStats {
        NormalizerStats {
            total_unnormalized_tokens: self.total_unnormalized_tokens,
            total_normalized_tokens: self.total_normalized_tokens,
            total_unnormalized_terms: self.unnormalized_terms.len(),
            total_normalized_terms: self.normalized_terms.len(),
            top_unnormalized_terms: top_terms(&self.unnormalized_terms, self.top_term_count),
            top_normalized_terms: top_terms(&self.normalized_terms, self.top_term_count),
        }
    }
}

/// The `n` most frequent terms, ties broken by term.
fn top_terms(counts: &AHashMap<String, usize>, n: usize) -> Vec<String> {
    let mut entries: Vec<(&String, &usize)> = counts.iter().collect();
    entries.sort_unstable_by(|(a_term, a_count), (b_term, b_count)| {
        b_count.cmp(a_count).then_with(|| a_term.cmp(b_term))
    });
    entries
        .into_iter()
        .take(n)
        .map(|(term, _)| term.clone())
        .collect()
}
