//! Document classification.
//!
//! - [`naive_bayes::NaiveBayesClassifier`] - Multinomial Naive Bayes with
//!   predict-time additive smoothing
//! - [`persistence`] - Line-oriented model file format
//! - [`feature_selection`] - Mutual-information vocabulary pruning

pub mod feature_selection;
pub mod naive_bayes;
pub mod persistence;

use rayon::prelude::*;

use crate::document::{DocClass, Sample};
use crate::error::Result;

pub use naive_bayes::NaiveBayesClassifier;

/// Classifier trait.
///
/// Implementations learn from labeled samples and assign a single
/// [`DocClass`] to new samples. Fitted classifiers are read-only during
/// prediction, so batch prediction may run in parallel.
pub trait Classifier: Send + Sync {
    /// Fit the classifier, replacing any previously learned state.
    fn fit(&mut self, samples: &[Sample], labels: &[DocClass]) -> Result<()>;

    /// Predict the class of one sample.
    fn predict(&self, sample: &Sample) -> Result<DocClass>;

    /// Predict the class of every sample, preserving order.
    fn predict_batch(&self, samples: &[Sample]) -> Result<Vec<DocClass>> {
        samples.par_iter().map(|sample| self.predict(sample)).collect()
    }

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
