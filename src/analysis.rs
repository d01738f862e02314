//! Text analysis module for lexiclass.
//!
//! This module provides tokenization, character and token filtering, and the
//! analysis pipeline that the [`normalizer::Normalizer`] is built on.

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
