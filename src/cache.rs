use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::data::RawDataset;
use crate::errors::JourneyError;

/// Source id reported for payload errors raised by the cache itself.
const CACHE_SOURCE_ID: &str = "session_cache";

/// Session-scoped, single-slot cache holding the most recently loaded dataset.
///
/// The slot stores the dataset serialized as JSON. Clones share the same slot,
/// so the owning session can hand a handle to collaborators without copying data.
#[derive(Clone, Default)]
pub struct DatasetCache {
    inner: Arc<RwLock<CacheSlot>>,
}

/// Internal slot storage behind the `DatasetCache` lock.
#[derive(Default)]
struct CacheSlot {
    payload: Option<String>,
    writes: u64,
}

impl DatasetCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset, or `None` when the slot is empty.
    ///
    /// Fails with `DataFormat` when the stored payload no longer decodes.
    pub fn get(&self) -> Result<Option<RawDataset>, JourneyError> {
        let slot = self.inner.read().expect("dataset cache poisoned");
        let Some(payload) = slot.payload.as_deref() else {
            return Ok(None);
        };
        serde_json::from_str(payload)
            .map(Some)
            .map_err(|err| JourneyError::DataFormat {
                source_id: CACHE_SOURCE_ID.to_string(),
                details: format!("cached payload does not decode as a dataset: {err}"),
            })
    }

    /// Store `dataset`, replacing whatever the slot held before.
    pub fn put(&self, dataset: &RawDataset) -> Result<(), JourneyError> {
        let payload = serde_json::to_string(dataset).map_err(|err| JourneyError::DataFormat {
            source_id: dataset.source.clone(),
            details: format!("dataset could not be serialized for caching: {err}"),
        })?;
        self.put_serialized(payload);
        debug!(
            "[journeys:cache] stored {} records from '{}'",
            dataset.len(),
            dataset.source
        );
        Ok(())
    }

    /// Store an already-serialized dataset payload verbatim.
    ///
    /// Used when restoring a slot captured elsewhere in the session; the payload
    /// is validated lazily by `get`.
    pub fn put_serialized(&self, payload: impl Into<String>) {
        let mut slot = self.inner.write().expect("dataset cache poisoned");
        slot.payload = Some(payload.into());
        slot.writes = slot.writes.saturating_add(1);
    }

    /// Empty the slot.
    pub fn clear(&self) {
        let mut slot = self.inner.write().expect("dataset cache poisoned");
        slot.payload = None;
    }

    /// Returns `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        let slot = self.inner.read().expect("dataset cache poisoned");
        slot.payload.is_none()
    }

    /// Number of writes performed on this cache since creation.
    pub fn write_count(&self) -> u64 {
        let slot = self.inner.read().expect("dataset cache poisoned");
        slot.writes
    }
}
