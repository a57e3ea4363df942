use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::constants::sampler::DEFAULT_METHOD_COUNT;
use crate::data::RawDataset;
use crate::types::MethodLabel;

/// Draws a bounded random subset of labels from a dataset's label column.
///
/// The column is shuffled as-is: empty labels are dropped, but repeated labels
/// are kept, so a draw may name the same method more than once.
#[derive(Clone, Copy, Debug)]
pub struct MethodSampler {
    count: usize,
}

impl Default for MethodSampler {
    fn default() -> Self {
        Self::new(DEFAULT_METHOD_COUNT)
    }
}

impl MethodSampler {
    /// Create a sampler that returns at most `count` labels per draw.
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Maximum number of labels returned per draw.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Return up to `count` labels in sampling order.
    ///
    /// Every permutation of the non-empty label column is equally likely before
    /// truncation. An empty dataset yields an empty draw.
    pub fn sample<R: Rng + ?Sized>(&self, dataset: &RawDataset, rng: &mut R) -> Vec<MethodLabel> {
        let mut labels: Vec<MethodLabel> = dataset
            .labels()
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect();
        let available = labels.len();
        labels.shuffle(rng);
        labels.truncate(self.count.min(available));
        debug!(
            "[journeys:sampler] drew {} of {} labels from '{}'",
            labels.len(),
            available,
            dataset.source
        );
        labels
    }
}
