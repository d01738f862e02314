//! Command line argument parsing for the lexiclass CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// lexiclass - Naive Bayes text classification for the Reuters-21578 corpus
#[derive(Parser, Debug, Clone)]
#[command(name = "lexiclass")]
#[command(about = "Naive Bayes text classification for the Reuters-21578 corpus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LexiclassArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexiclassArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the train and test datasets from the SGML corpus
    Construct(ConstructArgs),

    /// Fit a model on a training dataset and save it
    Fit(FitArgs),

    /// Classify a test dataset with a saved model and report metrics
    Predict(PredictArgs),
}

/// Arguments for building the datasets
#[derive(Parser, Debug, Clone)]
pub struct ConstructArgs {
    /// Directory holding the SGML files
    #[arg(long, value_name = "DIR")]
    pub dataset_dir: Option<PathBuf>,

    /// Stop word list, one word per line
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<PathBuf>,

    /// Output path of the training dataset
    #[arg(long, value_name = "FILE")]
    pub train_out: Option<PathBuf>,

    /// Output path of the test dataset
    #[arg(long, value_name = "FILE")]
    pub test_out: Option<PathBuf>,

    /// Report normalizer statistics
    #[arg(long)]
    pub stats: bool,
}

/// Arguments for fitting a model
#[derive(Parser, Debug, Clone)]
pub struct FitArgs {
    /// Training dataset
    #[arg(value_name = "TRAIN_SET")]
    pub train_set: PathBuf,

    /// Where to save the fitted model
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Keep only this many terms per class, ranked by mutual information
    #[arg(short = 'n', long, value_name = "N")]
    pub num_features: Option<usize>,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Test dataset
    #[arg(value_name = "TEST_SET")]
    pub test_set: PathBuf,

    /// Saved model
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Additive smoothing parameter
    #[arg(short, long, value_name = "ALPHA")]
    pub smoothing: Option<f64>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

impl FitArgs {
    /// Check if feature selection should run
    pub fn selects_features(&self) -> bool {
        self.num_features.is_some_and(|n| n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_construct_command() {
        let args = LexiclassArgs::try_parse_from([
            "lexiclass",
            "construct",
            "--dataset-dir",
            "reuters",
            "--train-out",
            "train.txt",
            "--stats",
        ])
        .unwrap();

        if let Command::Construct(construct_args) = args.command {
            assert_eq!(construct_args.dataset_dir, Some(PathBuf::from("reuters")));
            assert_eq!(construct_args.train_out, Some(PathBuf::from("train.txt")));
            assert_eq!(construct_args.test_out, None);
            assert!(construct_args.stats);
        } else {
            panic!("Expected Construct command");
        }
    }

    #[test]
    fn test_fit_command() {
        let args = LexiclassArgs::try_parse_from([
            "lexiclass",
            "fit",
            "train.txt",
            "model.txt",
            "--num-features",
            "300",
        ])
        .unwrap();

        if let Command::Fit(fit_args) = args.command {
            assert_eq!(fit_args.train_set, PathBuf::from("train.txt"));
            assert_eq!(fit_args.model_path, PathBuf::from("model.txt"));
            assert_eq!(fit_args.num_features, Some(300));
            assert!(fit_args.selects_features());
        } else {
            panic!("Expected Fit command");
        }

        let args =
            LexiclassArgs::try_parse_from(["lexiclass", "fit", "train.txt", "model.txt", "-n", "0"])
                .unwrap();
        if let Command::Fit(fit_args) = args.command {
            assert!(!fit_args.selects_features());
        }
    }

    #[test]
    fn test_predict_command() {
        let args = LexiclassArgs::try_parse_from([
            "lexiclass",
            "predict",
            "test.txt",
            "model.txt",
            "--smoothing",
            "0.5",
        ])
        .unwrap();

        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.test_set, PathBuf::from("test.txt"));
            assert_eq!(predict_args.smoothing, Some(0.5));
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_missing_positionals() {
        assert!(LexiclassArgs::try_parse_from(["lexiclass", "fit", "train.txt"]).is_err());
        assert!(LexiclassArgs::try_parse_from(["lexiclass", "predict"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = LexiclassArgs::try_parse_from(["lexiclass", "construct"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Verbose flag
        let args = LexiclassArgs::try_parse_from(["lexiclass", "-v", "construct"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args = LexiclassArgs::try_parse_from(["lexiclass", "-vvv", "construct"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        // Quiet flag
        let args =
            LexiclassArgs::try_parse_from(["lexiclass", "--quiet", "-vv", "construct"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_global_options() {
        let args = LexiclassArgs::try_parse_from([
            "lexiclass",
            "--format",
            "json",
            "--config",
            "lexiclass.json",
            "construct",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.config, Some(PathBuf::from("lexiclass.json")));
    }
}
