#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Alternative-pool construction for sampled methods.
pub mod alternatives;
/// Session-scoped dataset cache.
pub mod cache;
/// Derivation configuration types.
pub mod config;
/// Centralized constants used across sources, sampling, and sessions.
pub mod constants;
/// Raw dataset, pool, and topic types.
pub mod data;
/// Reusable example runners shared by demo binaries.
pub mod example_apps;
/// Per-method display rotation.
pub mod rotation;
/// Random method sampling.
pub mod sampler;
/// Session orchestration: load, derive, rotate.
pub mod session;
/// Dataset source traits and built-in sources.
pub mod source;
/// Shared type aliases.
pub mod types;
/// Text normalization and shuffling helpers.
pub mod utils;

mod errors;

pub use alternatives::AlternativesBuilder;
pub use cache::DatasetCache;
pub use config::{FieldMapping, JourneyConfig};
pub use data::{AlternativesPool, RawDataset, RawRecord, Topic, TopicSet};
pub use errors::JourneyError;
pub use rotation::{MethodRotation, RotationEngine, RotationState};
pub use sampler::MethodSampler;
pub use session::JourneySession;
pub use source::{DatasetSource, InMemorySource, JsonFileSource};
#[cfg(feature = "http")]
pub use source::{SheetSource, SheetSourceConfig};
pub use types::{Alternative, ColumnName, MethodLabel, MethodSlot, SourceId, TopicTitle};
