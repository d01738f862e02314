//! Mutual-information feature selection.
//!
//! For a term `t` and a class `c`, the mutual information between the events
//! "a document contains `t`" and "a document belongs to `c`" is computed from
//! the 2×2 document contingency table
//!
//! ```text
//!               other class   class c
//! t absent      n00           n01
//! t present     n10           n11
//! ```
//!
//! as `Σ n_ij/N · log2(N·n_ij / (row_i · col_j))` over the nonzero cells.
//! Presence counts documents, not occurrences: a sample contains a term when
//! its count is positive.
//!
//! [`top_words_per_class`] keeps the highest-scoring terms of every class and
//! [`remove_unimportant_words`] prunes every training sample down to the
//! selected terms of its own class.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;
use rayon::prelude::*;

use crate::document::{DocClass, Sample};
use crate::error::{LexiclassError, Result};

/// Selected terms per class, each list sorted ascending.
pub type TopWords = BTreeMap<DocClass, Vec<String>>;

/// Number of documents of each class that contain a term.
type PresenceCounts = [usize; DocClass::COUNT];

/// Mutual information between every term of `samples` and `target`.
pub fn mutual_info(
    samples: &[Sample],
    labels: &[DocClass],
    target: DocClass,
) -> Result<AHashMap<String, f64>> {
    check_lengths(samples, labels)?;

    let presence = presence_counts(samples, labels);
    let class_sizes = class_sizes(labels);
    let n_samples = samples.len();

    Ok(presence
        .into_iter()
        .map(|(term, counts)| {
            let score = term_class_mutual_info(&counts, &class_sizes, n_samples, target);
            (term.to_string(), score)
        })
        .collect())
}

/// Select the `top_k` terms with the highest mutual information for each
/// class in `classes`.
///
/// Ties are broken by term so the selection is deterministic. Each returned
/// list is sorted ascending. Asking for zero terms, or for more terms than the
/// training vocabulary holds, is an error.
pub fn top_words_per_class(
    samples: &[Sample],
    labels: &[DocClass],
    classes: &BTreeSet<DocClass>,
    top_k: usize,
) -> Result<TopWords> {
    check_lengths(samples, labels)?;

    let presence = presence_counts(samples, labels);
    if top_k == 0 {
        return Err(LexiclassError::invalid_argument("top_k must be positive"));
    }
    if top_k > presence.len() {
        return Err(LexiclassError::invalid_argument(format!(
            "Requested {top_k} terms per class but the vocabulary only has {}",
            presence.len()
        )));
    }

    let class_sizes = class_sizes(labels);
    let n_samples = samples.len();

    let top_words: TopWords = classes
        .par_iter()
        .map(|&class| {
            let mut scored: Vec<(&str, f64)> = presence
                .iter()
                .map(|(term, counts)| {
                    (*term, term_class_mutual_info(counts, &class_sizes, n_samples, class))
                })
                .collect();
            scored.sort_unstable_by(|(a_term, a_score), (b_term, b_score)| {
                b_score.total_cmp(a_score).then_with(|| a_term.cmp(b_term))
            });

            let mut words: Vec<String> = scored
                .into_iter()
                .take(top_k)
                .map(|(term, _)| term.to_string())
                .collect();
            words.sort_unstable();
            (class, words)
        })
        .collect();

    log::info!(
        "Selected {top_k} terms for each of {} classes from a vocabulary of {}",
        top_words.len(),
        presence.len()
    );

    Ok(top_words)
}

/// Remove from every sample the terms that are not selected for its class.
///
/// Samples whose class has no entry in `top_words` are left untouched. Every
/// list in `top_words` must be sorted ascending.
pub fn remove_unimportant_words(
    samples: &mut [Sample],
    labels: &[DocClass],
    top_words: &TopWords,
) -> Result<()> {
    check_lengths(samples, labels)?;
    for (class, words) in top_words {
        if !words.is_sorted() {
            return Err(LexiclassError::invalid_argument(format!(
                "Selected terms for class {class} are not sorted"
            )));
        }
    }

    let mut removed = 0;
    for (sample, label) in samples.iter_mut().zip(labels) {
        let Some(words) = top_words.get(label) else {
            continue;
        };
        let before = sample.len();
        sample.retain(|term, _| words.binary_search(term).is_ok());
        removed += before - sample.len();
    }

    log::debug!("Removed {removed} unselected terms from {} samples", samples.len());
    Ok(())
}

fn check_lengths(samples: &[Sample], labels: &[DocClass]) -> Result<()> {
    if samples.len() != labels.len() {
        return Err(LexiclassError::invalid_argument(format!(
            "Got {} samples but {} labels",
            samples.len(),
            labels.len()
        )));
    }
    Ok(())
}

fn presence_counts<'a>(
    samples: &'a [Sample],
    labels: &[DocClass],
) -> AHashMap<&'a str, PresenceCounts> {
    let mut presence: AHashMap<&str, PresenceCounts> = AHashMap::new();
    for (sample, label) in samples.iter().zip(labels) {
        for (term, &count) in sample {
            if count > 0 {
                presence
                    .entry(term.as_str())
                    .or_insert([0; DocClass::COUNT])[label.index()] += 1;
            }
        }
    }
    presence
}

fn class_sizes(labels: &[DocClass]) -> PresenceCounts {
    let mut sizes = [0; DocClass::COUNT];
    for label in labels {
        sizes[label.index()] += 1;
    }
    sizes
}

fn term_class_mutual_info(
    presence: &PresenceCounts,
    class_sizes: &PresenceCounts,
    n_samples: usize,
    target: DocClass,
) -> f64 {
    let n_target = class_sizes[target.index()];
    let n11 = presence[target.index()];
    let n10 = presence.iter().sum::<usize>() - n11;
    let n01 = n_target - n11;
    let n00 = (n_samples - n_target) - n10;

    let table = [[n00, n01], [n10, n11]];
    let total = n_samples as f64;

    let mut score = 0.0;
    for i in 0..2 {
        for j in 0..2 {
            let n_ij = table[i][j];
            if n_ij == 0 {
                continue;
            }
            let row = (table[i][0] + table[i][1]) as f64;
            let col = (table[0][j] + table[1][j]) as f64;
            let n_ij = n_ij as f64;
            score += n_ij / total * ((total * n_ij).log2() - (row * col).log2());
        }
    }
    score
}
