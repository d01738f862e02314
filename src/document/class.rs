//! Document classes and split types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LexiclassError, Result};

/// Class of a document.
///
/// The five named classes are the most frequent Reuters topics; every other
/// topic collapses into [`DocClass::Other`]. The declaration order is the
/// ordinal order used for array indexing and tie-breaking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocClass {
    Earn,
    Acq,
    MoneyFx,
    Grain,
    Crude,
    Other,
}

impl DocClass {
    /// Number of classes.
    pub const COUNT: usize = 6;

    /// All classes in ordinal order.
    pub const ALL: [DocClass; DocClass::COUNT] = [
        DocClass::Earn,
        DocClass::Acq,
        DocClass::MoneyFx,
        DocClass::Grain,
        DocClass::Crude,
        DocClass::Other,
    ];

    /// Ordinal of this class, usable as an array index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Class with the given ordinal, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical lowercase name, as written in datasets and model files.
    pub fn as_str(self) -> &'static str {
        match self {
            DocClass::Earn => "earn",
            DocClass::Acq => "acq",
            DocClass::MoneyFx => "money-fx",
            DocClass::Grain => "grain",
            DocClass::Crude => "crude",
            DocClass::Other => "other",
        }
    }

    /// Map a Reuters topic name to a class. Unknown topics become
    /// [`DocClass::Other`].
    pub fn from_topic(topic: &str) -> Self {
        topic.parse().unwrap_or(DocClass::Other)
    }
}

impl fmt::Display for DocClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DocClass {
    type Err = LexiclassError;

    fn from_str(s: &str) -> Result<Self> {
        DocClass::ALL
            .iter()
            .copied()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| LexiclassError::parse(format!("Unknown document class: {s:?}")))
    }
}

/// Split membership of a document, from the `LEWISSPLIT` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    Train,
    Test,
    Other,
}

impl DocType {
    /// Map a `LEWISSPLIT` value to a type.
    pub fn from_split(split: &str) -> Self {
        match split {
            "TRAIN" => DocType::Train,
            "TEST" => DocType::Test,
            _ => DocType::Other,
        }
    }
}
