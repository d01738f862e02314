//! # lexiclass
//!
//! Offline text classification for the Reuters-21578 corpus.
//!
//! ## Features
//!
//! - Reuters SGML parsing and train/test dataset construction
//! - Analysis pipeline with punctuation scrubbing, stop words and Porter stemming
//! - Multinomial Naive Bayes with predict-time additive smoothing
//! - Mutual-information feature selection
//! - Micro and macro averaged precision, recall and F-beta

pub mod analysis;
pub mod classification;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod document;
pub mod error;
pub mod metrics;

pub mod prelude {
    pub use crate::analysis::normalizer::Normalizer;
    pub use crate::classification::{Classifier, NaiveBayesClassifier};
    pub use crate::document::{DocClass, Sample};
    pub use crate::error::{LexiclassError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
