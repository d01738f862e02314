//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw text before it reaches the tokenizer.
//!
//! # Available Filters
//!
//! - [`html_entity::HtmlEntityCharFilter`] - Decodes the HTML entities found in Reuters SGML

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod html_entity;

pub use html_entity::HtmlEntityCharFilter;
