//! Punctuation scrub filter.
//!
//! The scrub runs in two passes over each token:
//!
//! 1. The characters `"`, `,`, `<`, `>` and `'` are deleted wherever they
//!    occur.
//! 2. Leading and trailing characters that are not alphanumeric are stripped
//!    until an alphanumeric character is reached on each end. Punctuation in
//!    the interior of the token is kept.
//!
//! A token made only of punctuation becomes empty.
//!
//! # Examples
//!
//! ```
//! use lexiclass::analysis::token_filter::punctuation::remove_punctuation;
//!
//! assert_eq!(remove_punctuation("\"hello,\""), "hello");
//! assert_eq!(remove_punctuation("(U.S.)"), "U.S");
//! assert_eq!(remove_punctuation("--"), "");
//! ```

use super::Filter;
use crate::analysis::token::{IntoTokenStream, TokenStream};
use crate::error::Result;

/// Characters deleted from anywhere in a token.
pub const DELETED_CHARS: [char; 5] = ['"', ',', '<', '>', '\''];

/// Remove punctuation from a single token as described in the module docs.
pub fn remove_punctuation(token: &str) -> String {
    let scrubbed: String = token.chars().filter(|c| !DELETED_CHARS.contains(c)).collect();

    scrubbed
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

/// A filter that applies [`remove_punctuation`] to every token.
#[derive(Clone, Debug, Default)]
pub struct PunctuationFilter;

impl PunctuationFilter {
    /// Create a new punctuation filter.
    pub fn new() -> Self {
        PunctuationFilter
    }
}

impl Filter for PunctuationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let scrubbed = remove_punctuation(&token.text);
                token.with_text(scrubbed)
            })
            .collect::<Vec<_>>();

        Ok(filtered_tokens.into_token_stream())
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}
