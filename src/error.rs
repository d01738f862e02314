//! Error types for the lexiclass library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`LexiclassError`] enum. Variants follow the failure taxonomy of the
//! pipeline: resource problems (stopword list, model file), input contract
//! violations, malformed text formats and untrained models.
//!
//! # Examples
//!
//! ```
//! use lexiclass::error::{LexiclassError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexiclassError::invalid_argument("top_k must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for lexiclass operations.
#[derive(Error, Debug)]
pub enum LexiclassError {
    /// I/O errors (missing dataset, model or stopword files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (stopword list, normalizer setup)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Input contract violations at a call boundary
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed SGML, dataset or model text
    #[error("Parse error{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Parse {
        /// 1-based line number of the offending line, when known.
        line: Option<usize>,
        /// Description of the problem.
        message: String,
    },

    /// Prediction requested from a classifier that has never been fitted
    #[error("Model not fitted: {0}")]
    NotFitted(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LexiclassError.
pub type Result<T> = std::result::Result<T, LexiclassError>;

impl LexiclassError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LexiclassError::Analysis(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LexiclassError::InvalidArgument(msg.into())
    }

    /// Create a new parse error without line information.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        LexiclassError::Parse {
            line: None,
            message: msg.into(),
        }
    }

    /// Create a new parse error pointing at a 1-based line number.
    pub fn parse_at<S: Into<String>>(line: usize, msg: S) -> Self {
        LexiclassError::Parse {
            line: Some(line),
            message: msg.into(),
        }
    }

    /// Create a new not-fitted error.
    pub fn not_fitted<S: Into<String>>(msg: S) -> Self {
        LexiclassError::NotFitted(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LexiclassError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        LexiclassError::InvalidArgument(format!("Invalid configuration: {}", msg.into()))
    }
}
