//! Classification metrics.
//!
//! Precision, recall and F-beta over a vector of true labels and a vector of
//! predicted labels. Scores are reported per class or averaged:
//!
//! - [`Average::Micro`] pools every decision. With exactly one label per
//!   document, micro precision and micro recall both equal the accuracy.
//! - [`Average::Macro`] is the unweighted mean of the per-class scores.
//!
//! Per-class results cover the classes that occur in either vector. A class
//! that is never predicted has precision 0, a class that never occurs has
//! recall 0.
//!
//! # Examples
//!
//! ```
//! use lexiclass::document::DocClass;
//! use lexiclass::metrics::{precision, recall, Average};
//!
//! let y_true = [DocClass::Earn, DocClass::Earn, DocClass::Acq];
//! let y_pred = [DocClass::Earn, DocClass::Acq, DocClass::Acq];
//!
//! let micro = precision(&y_true, &y_pred, Average::Micro).unwrap();
//! assert!((micro - 2.0 / 3.0).abs() < 1e-12);
//!
//! let macro_recall = recall(&y_true, &y_pred, Average::Macro).unwrap();
//! assert!((macro_recall - 0.75).abs() < 1e-12);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::DocClass;
use crate::error::{LexiclassError, Result};

/// How per-class scores are combined into one number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Average {
    /// Global counts over all decisions.
    Micro,
    /// Unweighted mean of per-class scores.
    Macro,
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::Micro => write!(f, "micro"),
            Average::Macro => write!(f, "macro"),
        }
    }
}

/// Per-class decision counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Confusion {
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
}

impl Confusion {
    fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }
}

/// Combine precision and recall into the F-beta score.
///
/// Returns 0 when both are 0.
pub fn f_beta(precision: f64, recall: f64, beta: f64) -> f64 {
    let beta_sq = beta * beta;
    let denominator = beta_sq * precision + recall;
    if denominator == 0.0 {
        return 0.0;
    }
    (1.0 + beta_sq) * precision * recall / denominator
}

/// Averaged precision.
pub fn precision(y_true: &[DocClass], y_pred: &[DocClass], average: Average) -> Result<f64> {
    let confusion = confusion(y_true, y_pred)?;
    Ok(match average {
        Average::Micro => accuracy(y_true, y_pred),
        Average::Macro => mean(confusion.values().map(Confusion::precision)),
    })
}

/// Averaged recall.
pub fn recall(y_true: &[DocClass], y_pred: &[DocClass], average: Average) -> Result<f64> {
    let confusion = confusion(y_true, y_pred)?;
    Ok(match average {
        Average::Micro => accuracy(y_true, y_pred),
        Average::Macro => mean(confusion.values().map(Confusion::recall)),
    })
}

/// Averaged F-beta score.
///
/// The micro score combines micro precision and recall; the macro score is
/// the mean of the per-class F-beta scores.
pub fn f_score(
    y_true: &[DocClass],
    y_pred: &[DocClass],
    beta: f64,
    average: Average,
) -> Result<f64> {
    let confusion = confusion(y_true, y_pred)?;
    Ok(match average {
        Average::Micro => {
            let accuracy = accuracy(y_true, y_pred);
            f_beta(accuracy, accuracy, beta)
        }
        Average::Macro => mean(
            confusion
                .values()
                .map(|c| f_beta(c.precision(), c.recall(), beta)),
        ),
    })
}

/// Precision of every class in `y_true ∪ y_pred`.
pub fn precision_per_class(
    y_true: &[DocClass],
    y_pred: &[DocClass],
) -> Result<BTreeMap<DocClass, f64>> {
    Ok(confusion(y_true, y_pred)?
        .into_iter()
        .map(|(class, c)| (class, c.precision()))
        .collect())
}

/// Recall of every class in `y_true ∪ y_pred`.
pub fn recall_per_class(
    y_true: &[DocClass],
    y_pred: &[DocClass],
) -> Result<BTreeMap<DocClass, f64>> {
    Ok(confusion(y_true, y_pred)?
        .into_iter()
        .map(|(class, c)| (class, c.recall()))
        .collect())
}

/// F-beta score of every class in `y_true ∪ y_pred`.
pub fn f_score_per_class(
    y_true: &[DocClass],
    y_pred: &[DocClass],
    beta: f64,
) -> Result<BTreeMap<DocClass, f64>> {
    Ok(confusion(y_true, y_pred)?
        .into_iter()
        .map(|(class, c)| (class, f_beta(c.precision(), c.recall(), beta)))
        .collect())
}

fn confusion(y_true: &[DocClass], y_pred: &[DocClass]) -> Result<BTreeMap<DocClass, Confusion>> {
    if y_true.len() != y_pred.len() {
        return Err(LexiclassError::invalid_argument(format!(
            "Got {} true labels but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(LexiclassError::invalid_argument(
            "Cannot score an empty set of predictions",
        ));
    }

    let mut table: BTreeMap<DocClass, Confusion> = BTreeMap::new();
    for (&truth, &pred) in y_true.iter().zip(y_pred) {
        if truth == pred {
            table.entry(truth).or_default().true_positives += 1;
        } else {
            table.entry(truth).or_default().false_negatives += 1;
            table.entry(pred).or_default().false_positives += 1;
        }
    }
    Ok(table)
}

fn accuracy(y_true: &[DocClass], y_pred: &[DocClass]) -> f64 {
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    ratio(correct, y_true.len())
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}
