//! Dataset source interfaces and built-in sources.
//!
//! Ownership model:
//! - `DatasetSource` is the session-facing I/O boundary that produces a whole
//!   `RawDataset` per call. It performs no sampling or pooling.
//! - Caching is the caller's concern; sources never consult `DatasetCache`.

use std::sync::Arc;

use crate::data::{RawDataset, RawRecord};
use crate::errors::JourneyError;
use crate::types::SourceId;

/// JSON payload decoding shared by network and file sources.
pub mod payload;
/// Source implementation modules.
pub mod sources;

pub use sources::json_file::JsonFileSource;
#[cfg(feature = "http")]
pub use sources::sheet::{SheetSource, SheetSourceConfig};

/// Session-facing dataset source interface.
///
/// One call returns the full dataset. Failures propagate as `Fetch` (transport)
/// or `DataFormat` (payload shape); implementations never substitute empty data.
pub trait DatasetSource: Send + Sync {
    /// Stable source identifier stamped onto produced datasets and errors.
    fn id(&self) -> &str;
    /// Retrieve the full dataset.
    fn fetch(&self) -> Result<RawDataset, JourneyError>;
}

/// Boxed trait object alias used by sessions and demo apps.
pub type DynSource = Box<dyn DatasetSource + 'static>;

/// Source backed by prebuilt records, for tests and embedding.
#[derive(Clone)]
pub struct InMemorySource {
    id: SourceId,
    records: Arc<Vec<RawRecord>>,
}

impl InMemorySource {
    /// Create an in-memory source from prebuilt records.
    pub fn new(id: impl Into<SourceId>, records: Vec<RawRecord>) -> Self {
        Self {
            id: id.into(),
            records: Arc::new(records),
        }
    }
}

impl DatasetSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn fetch(&self) -> Result<RawDataset, JourneyError> {
        Ok(RawDataset::new(self.id.clone(), self.records.as_ref().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_source_returns_records_in_order() {
        let source = InMemorySource::new(
            "fixture",
            vec![
                RawRecord::new("A", "a1", "", ""),
                RawRecord::new("B", "", "b2", ""),
            ],
        );
        let dataset = source.fetch().unwrap();
        assert_eq!(source.id(), "fixture");
        assert_eq!(dataset.source, "fixture");
        assert_eq!(dataset.labels().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
