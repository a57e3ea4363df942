use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::config::FieldMapping;
use crate::data::RawDataset;
use crate::errors::JourneyError;
use crate::source::DatasetSource;
use crate::source::payload::decode_payload;
use crate::types::SourceId;

/// Reads a dataset from a local JSON file holding the same row array a sheet endpoint serves.
pub struct JsonFileSource {
    source_id: SourceId,
    path: PathBuf,
    field_mapping: FieldMapping,
}

impl JsonFileSource {
    /// Create a file source with the default column mapping.
    pub fn new(source_id: impl Into<SourceId>, path: impl Into<PathBuf>) -> Self {
        Self {
            source_id: source_id.into(),
            path: path.into(),
            field_mapping: FieldMapping::default(),
        }
    }

    /// Replace the column mapping.
    pub fn with_field_mapping(mut self, field_mapping: FieldMapping) -> Self {
        self.field_mapping = field_mapping;
        self
    }
}

impl DatasetSource for JsonFileSource {
    fn id(&self) -> &str {
        &self.source_id
    }

    fn fetch(&self) -> Result<RawDataset, JourneyError> {
        debug!("[journeys:file] reading {}", self.path.display());
        let body = fs::read_to_string(&self.path)?;
        decode_payload(&self.source_id, &body, &self.field_mapping)
    }
}
