//! Stop filter implementation.
//!
//! This module provides a filter that removes stop words. The word list is
//! loaded from a whitespace-separated file, kept sorted, and probed with a
//! binary search.
//!
//! # Examples
//!
//! ```
//! use lexiclass::analysis::token_filter::Filter;
//! use lexiclass::analysis::token_filter::stop::StopFilter;
//! use lexiclass::analysis::token::{IntoTokenStream, Token};
//!
//! let filter = StopFilter::from_words(vec!["the", "of"]).unwrap();
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("price", 1),
//!     Token::new("of", 2),
//!     Token::new("oil", 3),
//! ];
//!
//! let result: Vec<_> = filter.filter(tokens.into_token_stream())
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "price");
//! assert_eq!(result[1].text, "oil");
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::analysis::token::{IntoTokenStream, Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{LexiclassError, Result};

/// A filter that removes stop words from the token stream.
///
/// Membership is exact and case-sensitive, so the filter is expected to run
/// after lowercasing.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// Sorted, deduplicated stop words.
    stop_words: Arc<Vec<String>>,
}

impl StopFilter {
    /// Load the stop word list from a whitespace-separated file.
    ///
    /// Fails with an I/O error when the file cannot be read and with an
    /// analysis error when it contains no words.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let filter = Self::from_words(content.split_whitespace())
            .map_err(|_| LexiclassError::analysis(format!("Stop word list {} is empty", path.display())))?;

        log::debug!("Loaded {} stop words from {}", filter.len(), path.display());
        Ok(filter)
    }

    /// Create a stop filter from a list of stop words.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexiclass::analysis::token_filter::stop::StopFilter;
    ///
    /// let filter = StopFilter::from_words(vec!["foo", "bar", "foo"]).unwrap();
    /// assert_eq!(filter.len(), 2);
    /// assert!(filter.is_stop_word("bar"));
    /// ```
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stop_words: Vec<String> = words.into_iter().map(|s| s.into()).collect();
        stop_words.sort_unstable();
        stop_words.dedup();

        if stop_words.is_empty() {
            return Err(LexiclassError::analysis("Stop word list is empty"));
        }

        Ok(StopFilter {
            stop_words: Arc::new(stop_words),
        })
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words
            .binary_search_by(|probe| probe.as_str().cmp(word))
            .is_ok()
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word list is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| !self.is_stop_word(&token.text))
            .collect();

        Ok(filtered_tokens.into_token_stream())
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["the", "and", "or"]).unwrap();
        let tokens = vec![
            Token::new("hello", 0),
            Token::new("the", 1),
            Token::new("world", 2),
            Token::new("and", 3),
            Token::new("test", 4),
        ];

        let result: Vec<Token> = filter.filter(tokens.into_token_stream()).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
        assert_eq!(result[2].text, "test");
    }

    #[test]
    fn test_case_sensitive() {
        let filter = StopFilter::from_words(vec!["the"]).unwrap();
        assert!(filter.is_stop_word("the"));
        assert!(!filter.is_stop_word("The"));
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(StopFilter::from_words(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a about\nabove   after\n\tthe").unwrap();

        let filter = StopFilter::from_file(file.path()).unwrap();
        assert_eq!(filter.len(), 5);
        assert!(filter.is_stop_word("above"));
        assert!(filter.is_stop_word("the"));
        assert!(!filter.is_stop_word("oil"));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = StopFilter::from_file(dir.path().join("missing.txt"));
        assert!(matches!(result, Err(LexiclassError::Io(_))));
    }

    #[test]
    fn test_from_file_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = StopFilter::from_file(file.path());
        assert!(matches!(result, Err(LexiclassError::Analysis(_))));
    }
}
