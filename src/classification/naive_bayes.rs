//! Multinomial Naive Bayes classifier.
//!
//! Fitting stores raw counts only:
//!
//! - the number of training samples per class (the prior counts),
//! - for each term and class, how often the term occurs across all samples
//!   of that class (the likelihood counts),
//! - for each class, the sum of its likelihood counts.
//!
//! Additive smoothing is applied when predicting, so one fitted model can be
//! scored with different smoothing parameters. For a sample `x` the score of
//! class `c` is
//!
//! ```text
//! log(N_c / N) + Σ_t x_t · log((n_tc + α) / (n_c + α·V))
//! ```
//!
//! where `V` is the number of distinct terms in the likelihood table. Classes
//! without training samples are never scored, and ties go to the class with
//! the lowest ordinal.
//!
//! # Examples
//!
//! ```
//! use lexiclass::classification::{Classifier, NaiveBayesClassifier};
//! use lexiclass::document::{DocClass, Sample};
//!
//! let sample = |pairs: &[(&str, usize)]| -> Sample {
//!     pairs.iter().map(|(t, c)| (t.to_string(), *c)).collect()
//! };
//!
//! let mut clf = NaiveBayesClassifier::new();
//! clf.fit(
//!     &[sample(&[("profit", 2)]), sample(&[("barrel", 3)])],
//!     &[DocClass::Earn, DocClass::Crude],
//! ).unwrap();
//!
//! assert_eq!(clf.predict(&sample(&[("barrel", 1)])).unwrap(), DocClass::Crude);
//! ```

use ahash::AHashMap;

use crate::classification::Classifier;
use crate::document::{DocClass, Sample};
use crate::error::{LexiclassError, Result};

/// Default additive smoothing parameter (Laplace smoothing).
pub const DEFAULT_SMOOTHING: f64 = 1.0;

/// Per-class counts, indexed by [`DocClass::index`].
pub type ClassCounts = [usize; DocClass::COUNT];

/// Multinomial Naive Bayes classifier over [`DocClass`].
#[derive(Clone, Debug, PartialEq)]
pub struct NaiveBayesClassifier {
    priors: ClassCounts,
    likelihood: AHashMap<String, ClassCounts>,
    class_term_totals: ClassCounts,
    smoothing: f64,
}

impl Default for NaiveBayesClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NaiveBayesClassifier {
    /// Create an untrained classifier with Laplace smoothing.
    pub fn new() -> Self {
        NaiveBayesClassifier {
            priors: [0; DocClass::COUNT],
            likelihood: AHashMap::new(),
            class_term_totals: [0; DocClass::COUNT],
            smoothing: DEFAULT_SMOOTHING,
        }
    }

    /// Build a classifier from stored counts. Class term totals are
    /// recomputed from the likelihood table.
    pub fn from_counts(priors: ClassCounts, likelihood: AHashMap<String, ClassCounts>) -> Self {
        let mut class_term_totals = [0; DocClass::COUNT];
        for counts in likelihood.values() {
            for (total, count) in class_term_totals.iter_mut().zip(counts) {
                *total += count;
            }
        }

        NaiveBayesClassifier {
            priors,
            likelihood,
            class_term_totals,
            smoothing: DEFAULT_SMOOTHING,
        }
    }

    /// Use smoothing parameter `alpha`, which must be finite and positive.
    pub fn with_smoothing(mut self, alpha: f64) -> Result<Self> {
        self.set_smoothing(alpha)?;
        Ok(self)
    }

    /// Change the smoothing parameter of this classifier.
    pub fn set_smoothing(&mut self, alpha: f64) -> Result<()> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(LexiclassError::invalid_argument(format!(
                "Smoothing must be a positive finite number, got {alpha}"
            )));
        }
        self.smoothing = alpha;
        Ok(())
    }

    /// The smoothing parameter.
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Training sample counts per class.
    pub fn priors(&self) -> &ClassCounts {
        &self.priors
    }

    /// Number of training samples of `class`.
    pub fn class_count(&self, class: DocClass) -> usize {
        self.priors[class.index()]
    }

    /// Occurrences of `term` across the training samples of `class`.
    pub fn term_count(&self, term: &str, class: DocClass) -> usize {
        self.likelihood
            .get(term)
            .map_or(0, |counts| counts[class.index()])
    }

    /// Total term occurrences across the training samples of `class`.
    pub fn class_term_total(&self, class: DocClass) -> usize {
        self.class_term_totals[class.index()]
    }

    /// The likelihood count table.
    pub fn likelihood(&self) -> &AHashMap<String, ClassCounts> {
        &self.likelihood
    }

    /// Number of distinct terms in the likelihood table.
    pub fn vocabulary_size(&self) -> usize {
        self.likelihood.len()
    }

    /// Number of training samples.
    pub fn n_samples(&self) -> usize {
        self.priors.iter().sum()
    }

    /// Whether the classifier has been fitted (or loaded).
    pub fn is_fitted(&self) -> bool {
        self.n_samples() > 0
    }

    /// Smoothed estimate of `P(term | class)`.
    ///
    /// With an empty vocabulary every term has probability one and so
    /// contributes nothing to the score.
    pub fn smoothed_probability(&self, term: &str, class: DocClass) -> f64 {
        let numerator = self.term_count(term, class) as f64 + self.smoothing;
        let denominator = self.class_term_total(class) as f64
            + self.smoothing * self.vocabulary_size() as f64;
        if denominator == 0.0 {
            return 1.0;
        }
        numerator / denominator
    }

    /// Log-posterior score of every class, indexed by ordinal. Classes with
    /// no training samples are `None`.
    pub fn log_posteriors(&self, sample: &Sample) -> Result<[Option<f64>; DocClass::COUNT]> {
        if !self.is_fitted() {
            return Err(LexiclassError::not_fitted(
                "Naive Bayes classifier must be fitted before prediction",
            ));
        }

        let n_samples = self.n_samples() as f64;
        let mut scores = [None; DocClass::COUNT];
        for class in DocClass::ALL {
            let prior = self.class_count(class);
            if prior == 0 {
                continue;
            }

            let mut score = (prior as f64 / n_samples).ln();
            for (term, &count) in sample {
                if count > 0 {
                    score += count as f64 * self.smoothed_probability(term, class).ln();
                }
            }
            scores[class.index()] = Some(score);
        }

        Ok(scores)
    }
}

impl Classifier for NaiveBayesClassifier {
    fn fit(&mut self, samples: &[Sample], labels: &[DocClass]) -> Result<()> {
        if samples.len() != labels.len() {
            return Err(LexiclassError::invalid_argument(format!(
                "Got {} samples but {} labels",
                samples.len(),
                labels.len()
            )));
        }
        if samples.is_empty() {
            return Err(LexiclassError::invalid_argument(
                "Cannot fit on an empty training set",
            ));
        }

        let mut priors = [0; DocClass::COUNT];
        let mut likelihood: AHashMap<String, ClassCounts> = AHashMap::new();
        let mut class_term_totals = [0; DocClass::COUNT];

        for (sample, label) in samples.iter().zip(labels) {
            let class_index = label.index();
            priors[class_index] += 1;

            for (term, &count) in sample {
                if count == 0 {
                    continue;
                }
                likelihood
                    .entry(term.clone())
                    .or_insert([0; DocClass::COUNT])[class_index] += count;
                class_term_totals[class_index] += count;
            }
        }

        self.priors = priors;
        self.likelihood = likelihood;
        self.class_term_totals = class_term_totals;

        log::info!(
            "Fitted Naive Bayes on {} samples with a vocabulary of {} terms",
            self.n_samples(),
            self.vocabulary_size()
        );
        Ok(())
    }

    fn predict(&self, sample: &Sample) -> Result<DocClass> {
        let scores = self.log_posteriors(sample)?;

        let mut best: Option<(DocClass, f64)> = None;
        for class in DocClass::ALL {
            let Some(score) = scores[class.index()] else {
                continue;
            };
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((class, score)),
            }
        }

        best.map(|(class, _)| class)
            .ok_or_else(|| LexiclassError::not_fitted("No class has training samples"))
    }

    fn name(&self) -> &str {
        "multinomial_naive_bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: DocClass = DocClass::Earn;
    const B: DocClass = DocClass::Acq;

    fn sample(pairs: &[(&str, usize)]) -> Sample {
        pairs.iter().map(|(t, c)| (t.to_string(), *c)).collect()
    }

    fn buy_sell() -> NaiveBayesClassifier {
        let mut clf = NaiveBayesClassifier::new();
        clf.fit(
            &[sample(&[("buy", 2), ("stock", 1)]), sample(&[("sell", 3)])],
            &[A, B],
        )
        .unwrap();
        clf
    }

    #[test]
    fn test_fit_counts() {
        let clf = buy_sell();

        assert_eq!(clf.class_count(A), 1);
        assert_eq!(clf.class_count(B), 1);
        assert_eq!(clf.n_samples(), 2);
        assert_eq!(clf.term_count("buy", A), 2);
        assert_eq!(clf.term_count("buy", B), 0);
        assert_eq!(clf.class_term_total(A), 3);
        assert_eq!(clf.class_term_total(B), 3);
        assert_eq!(clf.vocabulary_size(), 3);
        assert!(clf.is_fitted());
    }

    #[test]
    fn test_class_totals_match_likelihood() {
        let clf = buy_sell();
        for class in DocClass::ALL {
            let sum: usize = clf.likelihood().values().map(|c| c[class.index()]).sum();
            assert_eq!(sum, clf.class_term_total(class));
        }
    }

    #[test]
    fn test_predict_buy() {
        let clf = buy_sell();
        assert_eq!(clf.predict(&sample(&[("buy", 1)])).unwrap(), A);
        assert_eq!(clf.predict(&sample(&[("sell", 1)])).unwrap(), B);
    }

    #[test]
    fn test_predict_mixed_regression() {
        // Both classes: prior 1/2, total 3, V = 3, so each denominator is 6.
        // A: (2+1)/6 for buy, (0+1)/6 for sell. B: (0+1)/6 for buy, (3+1)/6 for sell.
        // log A = ln(1/2) + ln(3/6) + ln(1/6), log B = ln(1/2) + ln(1/6) + ln(4/6).
        let clf = buy_sell();
        let mixed = sample(&[("sell", 1), ("buy", 1)]);
        let scores = clf.log_posteriors(&mixed).unwrap();

        let expected_a = 0.5f64.ln() + 0.5f64.ln() + (1.0f64 / 6.0).ln();
        let expected_b = 0.5f64.ln() + (1.0f64 / 6.0).ln() + (4.0f64 / 6.0).ln();
        assert!((scores[A.index()].unwrap() - expected_a).abs() < 1e-12);
        assert!((scores[B.index()].unwrap() - expected_b).abs() < 1e-12);
        assert_eq!(clf.predict(&mixed).unwrap(), B);
    }

    #[test]
    fn test_unscored_classes() {
        let clf = buy_sell();
        let scores = clf.log_posteriors(&sample(&[("buy", 1)])).unwrap();
        assert!(scores[DocClass::Crude.index()].is_none());
        assert!(scores[DocClass::Other.index()].is_none());
    }

    #[test]
    fn test_laplace_bound_for_unseen_term() {
        let clf = buy_sell();
        let p = clf.smoothed_probability("sell", A);
        assert!(p > 0.0);
        assert!((p - 1.0 / (3.0 + 3.0)).abs() < 1e-15);

        let unseen = clf.smoothed_probability("never-seen", B);
        assert!((unseen - 1.0 / 6.0).abs() < 1e-15);
    }

    #[test]
    fn test_smoothing_changes_probabilities_not_counts() {
        let clf = buy_sell().with_smoothing(0.5).unwrap();
        assert_eq!(clf.term_count("buy", A), 2);
        let p = clf.smoothed_probability("buy", A);
        assert!((p - 2.5 / (3.0 + 1.5)).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_smoothing() {
        assert!(NaiveBayesClassifier::new().with_smoothing(0.0).is_err());
        assert!(NaiveBayesClassifier::new().with_smoothing(-1.0).is_err());
        assert!(NaiveBayesClassifier::new().with_smoothing(f64::NAN).is_err());
        assert!(NaiveBayesClassifier::new().with_smoothing(f64::INFINITY).is_err());
    }

    #[test]
    fn test_tie_goes_to_lowest_ordinal() {
        let mut clf = NaiveBayesClassifier::new();
        clf.fit(
            &[sample(&[("x", 1)]), sample(&[("x", 1)])],
            &[DocClass::Crude, DocClass::Grain],
        )
        .unwrap();

        assert_eq!(clf.predict(&sample(&[("x", 1)])).unwrap(), DocClass::Grain);
        assert_eq!(clf.predict(&Sample::new()).unwrap(), DocClass::Grain);
    }

    #[test]
    fn test_refit_overwrites() {
        let mut clf = buy_sell();
        clf.fit(&[sample(&[("oil", 1)])], &[DocClass::Crude]).unwrap();

        assert_eq!(clf.n_samples(), 1);
        assert_eq!(clf.class_count(A), 0);
        assert_eq!(clf.term_count("buy", A), 0);
        assert_eq!(clf.vocabulary_size(), 1);
        assert_eq!(clf.predict(&sample(&[("buy", 5)])).unwrap(), DocClass::Crude);
    }

    #[test]
    fn test_fit_errors() {
        let mut clf = NaiveBayesClassifier::new();
        let err = clf.fit(&[sample(&[("a", 1)])], &[A, B]).unwrap_err();
        assert!(matches!(err, LexiclassError::InvalidArgument(_)));

        let err = clf.fit(&[], &[]).unwrap_err();
        assert!(matches!(err, LexiclassError::InvalidArgument(_)));
        assert!(!clf.is_fitted());
    }

    #[test]
    fn test_predict_unfitted() {
        let clf = NaiveBayesClassifier::new();
        let err = clf.predict(&sample(&[("a", 1)])).unwrap_err();
        assert!(matches!(err, LexiclassError::NotFitted(_)));
    }

    #[test]
    fn test_empty_vocabulary() {
        let mut clf = NaiveBayesClassifier::new();
        clf.fit(&[Sample::new(), Sample::new(), Sample::new()], &[A, B, B])
            .unwrap();

        assert_eq!(clf.smoothed_probability("x", A), 1.0);
        assert_eq!(clf.predict(&sample(&[("x", 4)])).unwrap(), B);
    }

    #[test]
    fn test_predict_batch_preserves_order() {
        let clf = buy_sell();
        let samples: Vec<Sample> = (0..64)
            .map(|i| {
                if i % 3 == 0 {
                    sample(&[("sell", 2)])
                } else {
                    sample(&[("buy", 1), ("stock", 1)])
                }
            })
            .collect();

        let predictions = clf.predict_batch(&samples).unwrap();
        for (i, class) in predictions.iter().enumerate() {
            let expected = if i % 3 == 0 { B } else { A };
            assert_eq!(*class, expected);
        }
    }

    #[test]
    fn test_from_counts_recomputes_totals() {
        let clf = buy_sell();
        let rebuilt = NaiveBayesClassifier::from_counts(*clf.priors(), clf.likelihood().clone());
        assert_eq!(rebuilt, clf);
    }

    #[test]
    fn test_name() {
        assert_eq!(NaiveBayesClassifier::new().name(), "multinomial_naive_bayes");
    }
}
