//! Token filter implementations for token transformation.
//!
//! Filters transform the token stream produced by a tokenizer. The
//! normalization pipeline chains them in this order:
//!
//! ```text
//! Tokenizer → Punctuation → Lowercase → Stop Words → Stemmer → Remove Empty
//! ```
//!
//! # Available Filters
//!
//! - [`punctuation::PunctuationFilter`] - Scrubs quote/comma/angle characters and boundary punctuation
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Removes stop words loaded from a word list
//! - [`stem::StemFilter`] - Reduces words to their Porter stem
//! - [`remove_empty::RemoveEmptyFilter`] - Removes tokens left empty by earlier filters
//!
//! # Examples
//!
//! ```
//! use lexiclass::analysis::token_filter::Filter;
//! use lexiclass::analysis::token_filter::lowercase::LowercaseFilter;
//! use lexiclass::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream, allowing them
/// to modify or drop tokens. The trait requires `Send + Sync` so analyzers can
/// be shared across threads.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod punctuation;
pub mod remove_empty;
pub mod stem;
pub mod stop;

pub use lowercase::LowercaseFilter;
pub use punctuation::PunctuationFilter;
pub use remove_empty::RemoveEmptyFilter;
pub use stem::StemFilter;
pub use stop::StopFilter;
