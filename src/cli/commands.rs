//! Command implementations for the lexiclass CLI.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Context;

use crate::analysis::normalizer::Normalizer;
use crate::classification::feature_selection::{remove_unimportant_words, top_words_per_class};
use crate::classification::{Classifier, NaiveBayesClassifier};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::LexiclassConfig;
use crate::dataset::{construct_datasets, into_samples_and_labels, read_dataset_file, write_dataset_file};
use crate::document::DocClass;
use crate::error::Result;
use crate::metrics::{
    f_score, f_score_per_class, precision, precision_per_class, recall, recall_per_class, Average,
};

/// Execute a CLI command.
pub fn execute_command(args: LexiclassArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Construct(construct_args) => {
            construct(construct_args.clone(), &config, &args)
        }
        Command::Fit(fit_args) => fit(fit_args.clone(), &args),
        Command::Predict(predict_args) => predict(predict_args.clone(), &config, &args),
    }
}

/// Load the configuration file given on the command line, or the defaults.
fn load_config(args: &LexiclassArgs) -> Result<LexiclassConfig> {
    match &args.config {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            let config = LexiclassConfig::from_file(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?;
            Ok(config)
        }
        None => Ok(LexiclassConfig::default()),
    }
}

/// Build the train and test datasets from the SGML corpus.
fn construct(args: ConstructArgs, config: &LexiclassConfig, cli_args: &LexiclassArgs) -> Result<()> {
    let dataset_dir = args.dataset_dir.unwrap_or_else(|| config.dataset_dir.clone());
    let stopword_path = args.stopwords.unwrap_or_else(|| config.stopword_path.clone());
    let train_path: PathBuf = args.train_out.unwrap_or_else(|| config.train_set_path.clone());
    let test_path: PathBuf = args.test_out.unwrap_or_else(|| config.test_set_path.clone());

    let mut normalizer = Normalizer::from_stopword_file(&stopword_path)
        .with_context(|| format!("failed to load stop words from {}", stopword_path.display()))?
        .with_html_entities()?
        .with_top_term_count(config.top_term_count);

    let datasets = construct_datasets(&dataset_dir, &config.data_file_extension, &mut normalizer)
        .with_context(|| format!("failed to read corpus in {}", dataset_dir.display()))?;

    write_dataset_file(&train_path, &datasets.train)
        .with_context(|| format!("failed to write {}", train_path.display()))?;
    write_dataset_file(&test_path, &datasets.test)
        .with_context(|| format!("failed to write {}", test_path.display()))?;

    output_result(
        "Datasets constructed successfully",
        &DatasetConstructionResult {
            train_path: display_path(&train_path),
            test_path: display_path(&test_path),
            train_documents: datasets.train.len(),
            test_documents: datasets.test.len(),
            stats: args.stats.then(|| normalizer.stats()),
        },
        cli_args,
    )
}

/// Fit a model on a training dataset and save it.
fn fit(args: FitArgs, cli_args: &LexiclassArgs) -> Result<()> {
    let docs = read_dataset_file(&args.train_set)
        .with_context(|| format!("failed to read training set {}", args.train_set.display()))?;
    let (mut samples, labels) = into_samples_and_labels(docs);

    let selected_terms = match args.num_features {
        Some(num_features) if args.selects_features() => {
            let classes: BTreeSet<DocClass> = labels.iter().copied().collect();
            let top_words = top_words_per_class(&samples, &labels, &classes, num_features)?;
            for (class, words) in &top_words {
                log::info!("{class}: {}", words.join(" "));
            }
            remove_unimportant_words(&mut samples, &labels, &top_words)?;
            Some(top_words)
        }
        _ => None,
    };

    let mut clf = NaiveBayesClassifier::new();
    clf.fit(&samples, &labels)?;
    clf.save(&args.model_path)
        .with_context(|| format!("failed to save model to {}", args.model_path.display()))?;

    output_result(
        "Model fitted successfully",
        &FitResult {
            model_path: display_path(&args.model_path),
            samples: clf.n_samples(),
            vocabulary_size: clf.vocabulary_size(),
            selected_terms,
        },
        cli_args,
    )
}

/// Classify a test dataset with a saved model and report metrics.
fn predict(args: PredictArgs, config: &LexiclassConfig, cli_args: &LexiclassArgs) -> Result<()> {
    let smoothing = args.smoothing.unwrap_or(config.smoothing);
    let clf = NaiveBayesClassifier::load(&args.model_path)
        .with_context(|| format!("failed to load model {}", args.model_path.display()))?
        .with_smoothing(smoothing)?;

    let docs = read_dataset_file(&args.test_set)
        .with_context(|| format!("failed to read test set {}", args.test_set.display()))?;
    let ids: Vec<u64> = docs.iter().map(|doc| doc.id).collect();
    let (samples, y_true) = into_samples_and_labels(docs);

    let y_pred = clf.predict_batch(&samples)?;
    log::info!("Predicted {} documents with {}", y_pred.len(), clf.name());

    output_result(
        "Prediction finished",
        &prediction_report(&ids, &y_true, &y_pred)?,
        cli_args,
    )
}

/// Assemble predictions and their metrics.
fn prediction_report(ids: &[u64], y_true: &[DocClass], y_pred: &[DocClass]) -> Result<PredictionReport> {
    let predictions = ids
        .iter()
        .zip(y_true.iter().zip(y_pred))
        .map(|(&id, (&actual, &predicted))| PredictionRecord {
            id,
            actual,
            predicted,
        })
        .collect();

    let averaged = |average: Average| -> Result<Scores> {
        Ok(Scores {
            precision: precision(y_true, y_pred, average)?,
            recall: recall(y_true, y_pred, average)?,
            f1: f_score(y_true, y_pred, 1.0, average)?,
        })
    };

    let precisions = precision_per_class(y_true, y_pred)?;
    let recalls = recall_per_class(y_true, y_pred)?;
    let f_scores = f_score_per_class(y_true, y_pred, 1.0)?;
    let per_class = precisions
        .into_iter()
        .map(|(class, p)| {
            let scores = Scores {
                precision: p,
                recall: recalls.get(&class).copied().unwrap_or_default(),
                f1: f_scores.get(&class).copied().unwrap_or_default(),
            };
            (class, scores)
        })
        .collect();

    Ok(PredictionReport {
        predictions,
        micro: averaged(Average::Micro)?,
        macro_avg: averaged(Average::Macro)?,
        per_class,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_report() {
        let ids = [3, 8, 11];
        let y_true = [DocClass::Earn, DocClass::Acq, DocClass::Acq];
        let y_pred = [DocClass::Earn, DocClass::Earn, DocClass::Acq];

        let report = prediction_report(&ids, &y_true, &y_pred).unwrap();

        assert_eq!(report.predictions.len(), 3);
        assert_eq!(report.predictions[1].id, 8);
        assert_eq!(report.predictions[1].actual, DocClass::Acq);
        assert_eq!(report.predictions[1].predicted, DocClass::Earn);

        assert!((report.micro.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((report.per_class[&DocClass::Earn].precision - 0.5).abs() < 1e-12);
        assert!((report.per_class[&DocClass::Acq].recall - 0.5).abs() < 1e-12);
        assert!((report.macro_avg.recall - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_prediction_report_empty() {
        assert!(prediction_report(&[], &[], &[]).is_err());
    }
}
