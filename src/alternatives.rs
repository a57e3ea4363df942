use tracing::debug;

use crate::data::{AlternativesPool, RawDataset};
use crate::types::MethodLabel;

/// Collects every non-empty alternative phrasing for a set of sampled labels.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlternativesBuilder;

impl AlternativesBuilder {
    /// Build the pool for `methods`.
    ///
    /// Pools follow dataset order, then field order (`alt1`, `alt2`, `alt3`).
    /// Repeated labels in `methods` share one entry; labels with no alternatives
    /// map to an empty pool. Labels outside `methods` are omitted.
    pub fn build(&self, dataset: &RawDataset, methods: &[MethodLabel]) -> AlternativesPool {
        let mut pool = AlternativesPool::with_capacity(methods.len());
        for label in methods {
            pool.entry(label.clone()).or_default();
        }
        for record in &dataset.records {
            let Some(alternatives) = pool.get_mut(record.label.as_str()) else {
                continue;
            };
            alternatives.extend(
                record
                    .alternatives()
                    .into_iter()
                    .filter(|alt| !alt.is_empty())
                    .map(str::to_string),
            );
        }
        debug!(
            "[journeys:alternatives] built pools for {} labels ({} alternatives)",
            pool.len(),
            pool.values().map(Vec::len).sum::<usize>()
        );
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawRecord;

    fn labels(values: &[&str]) -> Vec<MethodLabel> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn preserves_record_then_field_order_and_drops_empties() {
        let data = RawDataset::new(
            "fixture",
            vec![
                RawRecord::new("A", "A1", "", "A3"),
                RawRecord::new("B", "B1", "B2", "B3"),
                RawRecord::new("A", "A1b", "", ""),
            ],
        );
        let pool = AlternativesBuilder.build(&data, &labels(&["A"]));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool["A"], vec!["A1", "A3", "A1b"]);
    }

    #[test]
    fn label_without_alternatives_gets_empty_pool() {
        let data = RawDataset::new("fixture", vec![RawRecord::new("bare", "", "", "")]);
        let pool = AlternativesBuilder.build(&data, &labels(&["bare"]));
        assert_eq!(pool.get("bare"), Some(&Vec::new()));
    }

    #[test]
    fn keys_follow_method_order_and_collapse_duplicates() {
        let data = RawDataset::new(
            "fixture",
            vec![
                RawRecord::new("x", "x1", "", ""),
                RawRecord::new("y", "y1", "", ""),
            ],
        );
        let pool = AlternativesBuilder.build(&data, &labels(&["y", "x", "y"]));
        assert_eq!(pool.keys().collect::<Vec<_>>(), vec!["y", "x"]);
        assert_eq!(pool["y"], vec!["y1"]);
    }

    #[test]
    fn empty_inputs_build_empty_pool() {
        let data = RawDataset::new("fixture", Vec::new());
        assert!(AlternativesBuilder.build(&data, &[]).is_empty());
    }

    #[test]
    fn alternatives_of_empty_labels_are_ignored() {
        let data = RawDataset::new(
            "fixture",
            vec![
                RawRecord::new("", "stray", "", ""),
                RawRecord::new("A", "A1", "", ""),
            ],
        );
        let pool = AlternativesBuilder.build(&data, &labels(&["A"]));
        assert_eq!(pool["A"], vec!["A1"]);
    }
}
