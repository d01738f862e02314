//! Document module for the Reuters corpus.
//!
//! # Core Components
//!
//! - [`class::DocClass`] - The closed set of target classes
//! - [`class::DocType`] - Train/test split membership
//! - [`parser::RawDocument`] - A document as read from an SGML file
//! - [`parser::parse_sgm`] - Extracts raw documents from an SGML stream
//! - [`Sample`] - Bag-of-words term counts for one document
//!
//! # Examples
//!
//! ```
//! use lexiclass::document::Sample;
//! use lexiclass::document::class::DocClass;
//!
//! let mut sample = Sample::new();
//! *sample.entry("oil".to_string()).or_insert(0) += 2;
//!
//! assert_eq!(sample["oil"], 2);
//! assert_eq!("crude".parse::<DocClass>().unwrap(), DocClass::Crude);
//! ```

use ahash::AHashMap;

pub mod class;
pub mod parser;

pub use class::{DocClass, DocType};
pub use parser::RawDocument;

/// A term-frequency vector: normalized term to occurrence count.
pub type Sample = AHashMap<String, usize>;
