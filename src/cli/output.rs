//! Output formatting for CLI commands.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizerStats;
use crate::cli::args::{LexiclassArgs, OutputFormat};
use crate::document::DocClass;
use crate::error::Result;

/// Width of the label and value columns in human-readable metric tables.
const COLUMN_WIDTH: usize = 10;

/// Digits after the decimal point in human-readable metric tables.
const PRECISION: usize = 4;

/// Results that know how to print themselves for a terminal.
pub trait HumanOutput {
    /// Print in human-readable format.
    fn output_human(&self, args: &LexiclassArgs);
}

/// Result structure for dataset construction.
#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetConstructionResult {
    pub train_path: String,
    pub test_path: String,
    pub train_documents: usize,
    pub test_documents: usize,
    pub stats: Option<NormalizerStats>,
}

/// Result structure for model fitting.
#[derive(Debug, Serialize, Deserialize)]
pub struct FitResult {
    pub model_path: String,
    pub samples: usize,
    pub vocabulary_size: usize,
    pub selected_terms: Option<BTreeMap<DocClass, Vec<String>>>,
}

/// Prediction for one test document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: u64,
    pub actual: DocClass,
    pub predicted: DocClass,
}

/// Precision, recall and F1 score of one class or one average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Result structure for prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionReport {
    pub predictions: Vec<PredictionRecord>,
    pub micro: Scores,
    #[serde(rename = "macro")]
    pub macro_avg: Scores,
    pub per_class: BTreeMap<DocClass, Scores>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &LexiclassArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                eprintln!("{message}");
            }
            result.output_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LexiclassArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

impl HumanOutput for DatasetConstructionResult {
    fn output_human(&self, args: &LexiclassArgs) {
        if args.verbosity() > 0 {
            println!("Train set: {} ({} documents)", self.train_path, self.train_documents);
            println!("Test set:  {} ({} documents)", self.test_path, self.test_documents);
        }

        if let Some(stats) = &self.stats {
            println!();
            println!("Normalizer Statistics");
            println!("---------------------");
            println!("Tokens before normalization: {}", stats.total_unnormalized_tokens);
            println!("Tokens after normalization:  {}", stats.total_normalized_tokens);
            println!("Terms before normalization:  {}", stats.total_unnormalized_terms);
            println!("Terms after normalization:   {}", stats.total_normalized_terms);
            println!();
            println!("Most frequent terms before normalization:");
            println!("{}", stats.top_unnormalized_terms.join(" "));
            println!();
            println!("Most frequent terms after normalization:");
            println!("{}", stats.top_normalized_terms.join(" "));
        }
    }
}

impl HumanOutput for FitResult {
    fn output_human(&self, args: &LexiclassArgs) {
        if let Some(selected) = &self.selected_terms {
            for (class, words) in selected {
                let name = class.to_string();
                eprintln!("{name}");
                eprintln!("{}", "-".repeat(name.len()));
                for word in words {
                    eprintln!("{word}");
                }
                eprintln!();
            }
        }

        if args.verbosity() > 0 {
            println!(
                "Model saved to {} ({} samples, {} terms)",
                self.model_path, self.samples, self.vocabulary_size
            );
        }
    }
}

impl HumanOutput for PredictionReport {
    fn output_human(&self, args: &LexiclassArgs) {
        for record in &self.predictions {
            println!(
                "ID: {:>5} | Test: {:>10} | Pred: {:>10}",
                record.id, record.actual, record.predicted
            );
        }

        if args.verbosity() == 0 {
            return;
        }

        print_averaged("Micro Averaged Stats", &self.micro);
        eprintln!();
        print_averaged("Macro Averaged Stats", &self.macro_avg);
        eprintln!();

        eprintln!("Unaveraged Stats");
        eprintln!("----------------");
        let columns: [(&str, fn(&Scores) -> f64); 3] = [
            ("Precision:", |s| s.precision),
            ("Recall:", |s| s.recall),
            ("F1-score:", |s| s.f1),
        ];
        for (title, value) in columns {
            eprintln!("{title}");
            for (class, scores) in &self.per_class {
                eprintln!("    {}", aligned(&format!("{class}:"), value(scores)));
            }
            eprintln!();
        }
    }
}

fn print_averaged(title: &str, scores: &Scores) {
    eprintln!("{title}");
    eprintln!("{}", "-".repeat(title.len()));
    eprintln!("{}", aligned("Precision:", scores.precision));
    eprintln!("{}", aligned("Recall:", scores.recall));
    eprintln!("{}", aligned("F1 score:", scores.f1));
}

/// Left-aligned label followed by a right-aligned fixed-point value.
fn aligned(label: &str, value: f64) -> String {
    format!("{label:<COLUMN_WIDTH$}{value:>COLUMN_WIDTH$.PRECISION$}")
}

/// Display form of a path for result structures.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
