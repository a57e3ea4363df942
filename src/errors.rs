use std::io;

use thiserror::Error;

use crate::types::{MethodLabel, SourceId};

/// Error type for dataset loading, payload decoding, and rotation contract failures.
#[derive(Debug, Error)]
pub enum JourneyError {
    /// The source could not be reached or answered with a failure status.
    #[error("dataset source '{source_id}' could not be fetched: {reason}")]
    Fetch {
        /// Source that failed.
        source_id: SourceId,
        /// Transport or status detail.
        reason: String,
    },
    /// The payload (or cached copy) does not have the expected row shape.
    #[error("dataset from '{source_id}' is malformed: {details}")]
    DataFormat {
        /// Source (or cache) the payload came from.
        source_id: SourceId,
        /// What was wrong with it.
        details: String,
    },
    /// A method label or slot that the current derivation does not know.
    #[error("method '{0}' is not part of the current derivation")]
    UnknownMethod(MethodLabel),
    /// A topic operation was called before any topic was derived.
    #[error("no topic has been derived yet")]
    NoTopic,
    /// Local file access failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),
}
