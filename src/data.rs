use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use crate::types::{Alternative, MethodLabel, SourceId, TopicTitle};

/// One row of the upstream table: a label plus up to three alternate phrasings.
///
/// Empty strings stand in for missing values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Method label; may be empty.
    pub label: MethodLabel,
    /// First alternative phrasing.
    #[serde(default)]
    pub alt1: Alternative,
    /// Second alternative phrasing.
    #[serde(default)]
    pub alt2: Alternative,
    /// Third alternative phrasing.
    #[serde(default)]
    pub alt3: Alternative,
}

impl RawRecord {
    /// Build a record from a label and its three alternative columns.
    pub fn new(
        label: impl Into<MethodLabel>,
        alt1: impl Into<Alternative>,
        alt2: impl Into<Alternative>,
        alt3: impl Into<Alternative>,
    ) -> Self {
        Self {
            label: label.into(),
            alt1: alt1.into(),
            alt2: alt2.into(),
            alt3: alt3.into(),
        }
    }

    /// Alternative fields in field order (`alt1`, `alt2`, `alt3`), including empty ones.
    pub fn alternatives(&self) -> [&str; 3] {
        [&self.alt1, &self.alt2, &self.alt3]
    }
}

/// Ordered rows exactly as produced by a dataset source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDataset {
    /// Source identifier that produced this dataset.
    pub source: SourceId,
    /// Time the dataset was fetched or loaded.
    pub fetched_at: DateTime<Utc>,
    /// Rows in source order.
    pub records: Vec<RawRecord>,
}

impl RawDataset {
    /// Wrap `records` as a dataset stamped with the current time.
    pub fn new(source: impl Into<SourceId>, records: Vec<RawRecord>) -> Self {
        Self {
            source: source.into(),
            fetched_at: Utc::now(),
            records,
        }
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// The raw label column in record order, empties included.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.label.as_str())
    }
}

/// Order-preserving mapping from method label to its alternatives.
pub type AlternativesPool = IndexMap<MethodLabel, Vec<Alternative>>;

/// Result of one derivation: the sampled methods and their alternative pools.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSet {
    /// Sampled labels in sampling order; duplicates are kept.
    pub methods: Vec<MethodLabel>,
    /// Alternatives for every distinct sampled label.
    pub pool: AlternativesPool,
}

impl TopicSet {
    /// Whether no methods were sampled.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// A titled derivation, as created by a "new topic" action.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Topic {
    /// Display title, `"Untitled"` until renamed.
    pub title: TopicTitle,
    /// Time the topic was derived.
    pub created_at: DateTime<Utc>,
    /// Methods and pools of this topic.
    pub set: TopicSet,
}
