use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::alternatives::AlternativesBuilder;
use crate::cache::DatasetCache;
use crate::config::JourneyConfig;
use crate::constants::topics::DEFAULT_TOPIC_TITLE;
use crate::data::{RawDataset, Topic, TopicSet};
use crate::errors::JourneyError;
use crate::rotation::RotationEngine;
use crate::sampler::MethodSampler;
use crate::source::DatasetSource;
use crate::types::{MethodSlot, TopicTitle};

/// One user's working session: dataset cache, current topic, and rotation state.
///
/// Every operation runs to completion before returning. `load_dataset` and the
/// derive calls block only while the source fetches on a cache miss. Each
/// derivation replaces the previous topic and its rotation state wholesale.
pub struct JourneySession {
    config: JourneyConfig,
    source: Box<dyn DatasetSource>,
    cache: DatasetCache,
    sampler: MethodSampler,
    builder: AlternativesBuilder,
    rng: StdRng,
    topic: Option<Topic>,
    engine: RotationEngine,
}

impl JourneySession {
    /// Create a session with a fresh cache.
    pub fn new(config: JourneyConfig, source: impl DatasetSource + 'static) -> Self {
        Self::with_cache(config, Box::new(source), DatasetCache::new())
    }

    /// Create a session that reads and writes an existing cache handle.
    pub fn with_cache(
        config: JourneyConfig,
        source: Box<dyn DatasetSource>,
        cache: DatasetCache,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            sampler: MethodSampler::new(config.method_count),
            builder: AlternativesBuilder,
            config,
            source,
            cache,
            rng,
            topic: None,
            engine: RotationEngine::default(),
        }
    }

    /// Configuration the session was created with.
    pub fn config(&self) -> &JourneyConfig {
        &self.config
    }

    /// Handle to the session cache.
    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Drop the cached dataset so the next load fetches again.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Return the cached dataset, fetching and caching it on a miss.
    ///
    /// A cached payload that no longer decodes is dropped before the error is
    /// returned, so the next load fetches again.
    pub fn load_dataset(&mut self) -> Result<RawDataset, JourneyError> {
        let cached = self.cache.get().inspect_err(|err| {
            if matches!(err, JourneyError::DataFormat { .. }) {
                warn!("[journeys:session] dropping unreadable cache slot: {err}");
                self.cache.clear();
            }
        })?;
        if let Some(dataset) = cached {
            return Ok(dataset);
        }
        self.refresh_dataset()
    }

    /// Fetch the dataset unconditionally and overwrite the cache.
    ///
    /// On failure the cache keeps whatever it held before.
    pub fn refresh_dataset(&mut self) -> Result<RawDataset, JourneyError> {
        let dataset = self.source.fetch().inspect_err(|err| {
            warn!(
                "[journeys:session] loading from '{}' failed: {}",
                self.source.id(),
                err
            );
        })?;
        self.cache.put(&dataset)?;
        Ok(dataset)
    }

    /// Start a new topic, propagating load and format failures.
    pub fn try_derive_topic_set(&mut self) -> Result<&TopicSet, JourneyError> {
        let (set, engine) = self.derive_set()?;
        Ok(self.install(set, engine))
    }

    /// Start a new topic; any load or format failure yields an empty topic set.
    pub fn derive_topic_set(&mut self) -> &TopicSet {
        let (set, engine) = self.derive_set().unwrap_or_else(|err| {
            warn!("[journeys:session] deriving topic set failed, showing none: {err}");
            (TopicSet::default(), RotationEngine::default())
        });
        self.install(set, engine)
    }

    fn derive_set(&mut self) -> Result<(TopicSet, RotationEngine), JourneyError> {
        let dataset = self.load_dataset()?;
        let methods = self.sampler.sample(&dataset, &mut self.rng);
        let pool = self.builder.build(&dataset, &methods);
        let set = TopicSet { methods, pool };
        let engine = RotationEngine::new(&set)?;
        Ok((set, engine))
    }

    fn install(&mut self, set: TopicSet, engine: RotationEngine) -> &TopicSet {
        info!(
            "[journeys:session] new topic with {} methods",
            set.methods.len()
        );
        self.engine = engine;
        let topic = self.topic.insert(Topic {
            title: DEFAULT_TOPIC_TITLE.to_string(),
            created_at: Utc::now(),
            set,
        });
        &topic.set
    }

    /// The current topic, if one has been derived.
    pub fn topic(&self) -> Option<&Topic> {
        self.topic.as_ref()
    }

    /// Rename the current topic.
    pub fn rename_topic(&mut self, title: impl Into<TopicTitle>) -> Result<(), JourneyError> {
        let topic = self.topic.as_mut().ok_or(JourneyError::NoTopic)?;
        topic.title = title.into();
        Ok(())
    }

    /// Rotation state of the current topic.
    pub fn engine(&self) -> &RotationEngine {
        &self.engine
    }

    /// Advance the method in `slot` and return its new display text.
    pub fn advance(&mut self, slot: MethodSlot) -> Result<&str, JourneyError> {
        self.engine.advance(slot, &mut self.rng)
    }

    /// Current display text of the method in `slot`.
    pub fn current_text(&self, slot: MethodSlot) -> Result<&str, JourneyError> {
        self.engine.current_text(slot)
    }

    /// Advance the first method sampled with `label`.
    pub fn advance_label(&mut self, label: &str) -> Result<&str, JourneyError> {
        self.engine.advance_label(label, &mut self.rng)
    }

    /// Current display text of the first method sampled with `label`.
    pub fn current_text_for(&self, label: &str) -> Result<&str, JourneyError> {
        self.engine.current_text_for(label)
    }

    /// Display text of every method of the current topic, in slot order.
    pub fn displayed_texts(&self) -> Vec<&str> {
        self.engine.displayed_texts()
    }
}
