//! Model file format.
//!
//! A fitted [`NaiveBayesClassifier`] is stored as plain text:
//!
//! ```text
//! earn 2877
//! acq 1650
//!
//! barrel crude 412
//! profit earn 1893
//! ```
//!
//! Prior counts come first, one `<class> <count>` line per class that has
//! training samples, in class order. A blank line separates them from the
//! likelihood counts, one `<term> <class> <count>` line per nonzero count,
//! sorted by term and then by class. Only counts are stored, so a loaded
//! model can be smoothed with any parameter.

use std::fs;
use std::path::Path;

use ahash::AHashMap;

use crate::classification::naive_bayes::{ClassCounts, NaiveBayesClassifier};
use crate::document::DocClass;
use crate::error::{LexiclassError, Result};

/// Serialize the counts of `model` into the model file format.
pub fn serialize(model: &NaiveBayesClassifier) -> Vec<u8> {
    let mut out = String::new();

    for class in DocClass::ALL {
        let count = model.class_count(class);
        if count > 0 {
            out.push_str(&format!("{class} {count}\n"));
        }
    }
    out.push('\n');

    let mut terms: Vec<(&String, &ClassCounts)> = model.likelihood().iter().collect();
    terms.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    for (term, counts) in terms {
        for class in DocClass::ALL {
            let count = counts[class.index()];
            if count > 0 {
                out.push_str(&format!("{term} {class} {count}\n"));
            }
        }
    }

    out.into_bytes()
}

/// Parse a model from the model file format.
///
/// Blank lines in the likelihood section are ignored. A model without any
/// prior line is rejected.
pub fn deserialize(bytes: &[u8]) -> Result<NaiveBayesClassifier> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| LexiclassError::parse(format!("Model is not valid UTF-8: {e}")))?;

    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    let mut priors: ClassCounts = [0; DocClass::COUNT];
    let mut seen = [false; DocClass::COUNT];
    for (line_number, line) in lines.by_ref() {
        if line.is_empty() {
            break;
        }

        let (class, count) = line.split_once(' ').ok_or_else(|| {
            LexiclassError::parse_at(line_number, format!("Expected '<class> <count>', got '{line}'"))
        })?;
        let class = parse_class(class, line_number)?;
        let count = parse_count(count, line_number)?;

        if seen[class.index()] {
            return Err(LexiclassError::parse_at(
                line_number,
                format!("Duplicate prior for class '{class}'"),
            ));
        }
        seen[class.index()] = true;
        priors[class.index()] = count;
    }

    if priors.iter().all(|&count| count == 0) {
        return Err(LexiclassError::parse("Model has no class priors"));
    }

    let mut likelihood: AHashMap<String, ClassCounts> = AHashMap::new();
    for (line_number, line) in lines {
        if line.is_empty() {
            continue;
        }

        let mut fields = line.rsplitn(3, ' ');
        let (Some(count), Some(class), Some(term)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(LexiclassError::parse_at(
                line_number,
                format!("Expected '<term> <class> <count>', got '{line}'"),
            ));
        };
        if term.is_empty() {
            return Err(LexiclassError::parse_at(line_number, "Empty term"));
        }

        let class = parse_class(class, line_number)?;
        let count = parse_count(count, line_number)?;
        if count == 0 {
            continue;
        }

        likelihood
            .entry(term.to_string())
            .or_insert([0; DocClass::COUNT])[class.index()] = count;
    }

    Ok(NaiveBayesClassifier::from_counts(priors, likelihood))
}

fn parse_class(field: &str, line_number: usize) -> Result<DocClass> {
    field
        .parse()
        .map_err(|_| LexiclassError::parse_at(line_number, format!("Unknown class '{field}'")))
}

fn parse_count(field: &str, line_number: usize) -> Result<usize> {
    field
        .parse()
        .map_err(|_| LexiclassError::parse_at(line_number, format!("Invalid count '{field}'")))
}

impl NaiveBayesClassifier {
    /// Write the model to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if !self.is_fitted() {
            return Err(LexiclassError::not_fitted("Cannot save an unfitted model"));
        }
        let path = path.as_ref();
        fs::write(path, serialize(self))?;
        log::info!("Saved model to {}", path.display());
        Ok(())
    }

    /// Read a model from `path` with the default smoothing parameter.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let model = deserialize(&bytes)?;
        log::debug!(
            "Loaded model from {} ({} samples, {} terms)",
            path.display(),
            model.n_samples(),
            model.vocabulary_size()
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Classifier;
    use crate::document::Sample;

    fn sample(pairs: &[(&str, usize)]) -> Sample {
        pairs.iter().map(|(t, c)| (t.to_string(), *c)).collect()
    }

    fn fitted() -> (NaiveBayesClassifier, Vec<Sample>) {
        let samples = vec![
            sample(&[("buy", 2), ("stock", 1)]),
            sample(&[("sell", 3)]),
            sample(&[("barrel", 4), ("stock", 1)]),
        ];
        let mut clf = NaiveBayesClassifier::new();
        clf.fit(&samples, &[DocClass::Earn, DocClass::Acq, DocClass::Crude])
            .unwrap();
        (clf, samples)
    }

    #[test]
    fn test_serialize_format() {
        let (clf, _) = fitted();
        let text = String::from_utf8(serialize(&clf)).unwrap();
        let expected = "earn 1\nacq 1\ncrude 1\n\n\
                        barrel crude 4\n\
                        buy earn 2\n\
                        sell acq 3\n\
                        stock earn 1\n\
                        stock crude 1\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_round_trip_predictions() {
        let (clf, samples) = fitted();
        let loaded = deserialize(&serialize(&clf)).unwrap();

        assert_eq!(loaded, clf);
        assert_eq!(
            loaded.predict_batch(&samples).unwrap(),
            clf.predict_batch(&samples).unwrap()
        );
    }

    #[test]
    fn test_deserialize_skips_blank_and_zero_lines() {
        let model = deserialize(b"grain 3\n\nwheat grain 5\n\ncorn grain 0\n").unwrap();
        assert_eq!(model.class_count(DocClass::Grain), 3);
        assert_eq!(model.term_count("wheat", DocClass::Grain), 5);
        assert_eq!(model.vocabulary_size(), 1);
        assert_eq!(model.class_term_total(DocClass::Grain), 5);
    }

    #[test]
    fn test_deserialize_priors_only() {
        let model = deserialize(b"earn 2\nacq 1\n").unwrap();
        assert_eq!(model.n_samples(), 3);
        assert_eq!(model.vocabulary_size(), 0);
    }

    #[test]
    fn test_deserialize_errors() {
        let cases: &[&[u8]] = &[
            b"",
            b"\nbuy earn 1\n",
            b"earn\n",
            b"stocks 3\n",
            b"earn three\n",
            b"earn 1\nearn 2\n",
            b"earn 1\n\nbuy earn\n",
            b"earn 1\n\nbuy earn -1\n",
            b"earn 1\n\nbuy metals 1\n",
            b"earn 1\n\n earn 1\n",
            b"earn 1\n\xff\xfe\n",
        ];
        for bytes in cases {
            let err = deserialize(bytes).unwrap_err();
            assert!(
                matches!(err, LexiclassError::Parse { .. }),
                "{:?} gave {err:?}",
                String::from_utf8_lossy(bytes)
            );
        }
    }

    #[test]
    fn test_deserialize_reports_line() {
        let err = deserialize(b"earn 1\n\nbuy earn 1\nsell acq x\n").unwrap_err();
        match err {
            LexiclassError::Parse { line, .. } => assert_eq!(line, Some(4)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_save_and_load() {
        let (clf, samples) = fitted();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.txt");

        clf.save(&path).unwrap();
        let loaded = NaiveBayesClassifier::load(&path).unwrap();
        assert_eq!(loaded.predict_batch(&samples).unwrap(), clf.predict_batch(&samples).unwrap());
    }

    #[test]
    fn test_save_unfitted() {
        let dir = tempfile::tempdir().unwrap();
        let err = NaiveBayesClassifier::new()
            .save(dir.path().join("model.txt"))
            .unwrap_err();
        assert!(matches!(err, LexiclassError::NotFitted(_)));
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = NaiveBayesClassifier::load(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, LexiclassError::Io(_)));
    }
}
