//! Run configuration.
//!
//! Every field has a default, so a configuration file only needs the values
//! it changes:
//!
//! ```json
//! { "dataset_dir": "reuters21578", "smoothing": 0.5 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::DEFAULT_TOP_TERM_COUNT;
use crate::classification::naive_bayes::DEFAULT_SMOOTHING;
use crate::error::{LexiclassError, Result};

/// Paths and parameters shared by the `lexiclass` commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiclassConfig {
    /// Directory holding the Reuters SGML files.
    pub dataset_dir: PathBuf,
    /// Extension of the SGML files, including the dot.
    pub data_file_extension: String,
    /// Stop word list, one word per line.
    pub stopword_path: PathBuf,
    /// Output path of the training dataset.
    pub train_set_path: PathBuf,
    /// Output path of the test dataset.
    pub test_set_path: PathBuf,
    /// Additive smoothing parameter used for prediction.
    pub smoothing: f64,
    /// Length of the top-term lists in the normalizer statistics.
    pub top_term_count: usize,
}

impl Default for LexiclassConfig {
    fn default() -> Self {
        LexiclassConfig {
            dataset_dir: PathBuf::from("Dataset"),
            data_file_extension: ".sgm".to_string(),
            stopword_path: PathBuf::from("stopwords.txt"),
            train_set_path: PathBuf::from("train.txt"),
            test_set_path: PathBuf::from("test.txt"),
            smoothing: DEFAULT_SMOOTHING,
            top_term_count: DEFAULT_TOP_TERM_COUNT,
        }
    }
}

impl LexiclassConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: LexiclassConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used.
    pub fn validate(&self) -> Result<()> {
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(LexiclassError::invalid_config(format!(
                "smoothing must be a positive finite number, got {}",
                self.smoothing
            )));
        }

        let paths = [
            ("dataset_dir", &self.dataset_dir),
            ("stopword_path", &self.stopword_path),
            ("train_set_path", &self.train_set_path),
            ("test_set_path", &self.test_set_path),
        ];
        for (name, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(LexiclassError::invalid_config(format!("{name} is empty")));
            }
        }

        if self.data_file_extension.is_empty() {
            return Err(LexiclassError::invalid_config("data_file_extension is empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LexiclassConfig::default();
        assert_eq!(config.dataset_dir, PathBuf::from("Dataset"));
        assert_eq!(config.data_file_extension, ".sgm");
        assert_eq!(config.smoothing, 1.0);
        assert_eq!(config.top_term_count, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexiclass.json");
        fs::write(&path, r#"{ "dataset_dir": "reuters", "smoothing": 0.5 }"#).unwrap();

        let config = LexiclassConfig::from_file(&path).unwrap();
        assert_eq!(config.dataset_dir, PathBuf::from("reuters"));
        assert_eq!(config.smoothing, 0.5);
        assert_eq!(config.stopword_path, PathBuf::from("stopwords.txt"));
    }

    #[test]
    fn test_invalid_values() {
        let config = LexiclassConfig {
            smoothing: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LexiclassError::InvalidArgument(_))
        ));

        let config = LexiclassConfig {
            train_set_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexiclass.json");
        fs::write(&path, "{ smoothing: }").unwrap();

        assert!(matches!(
            LexiclassConfig::from_file(&path),
            Err(LexiclassError::Json(_))
        ));
        assert!(matches!(
            LexiclassConfig::from_file(dir.path().join("missing.json")),
            Err(LexiclassError::Io(_))
        ));
    }
}
