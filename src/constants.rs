/// Constants used by method sampling.
pub mod sampler {
    /// Number of methods drawn per derivation when not configured otherwise.
    pub const DEFAULT_METHOD_COUNT: usize = 5;
}

/// Constants used by topic bookkeeping.
pub mod topics {
    /// Title given to a freshly derived topic.
    pub const DEFAULT_TOPIC_TITLE: &str = "Untitled";
}

/// Constants used by payload decoding and the default column mapping.
pub mod payload {
    /// Number of alternative columns carried by each raw record.
    pub const ALTERNATIVE_COLUMNS: usize = 3;
    /// Accepted column names for the label field, checked in order.
    pub const LABEL_ALIASES: &[&str] = &["label", "Label", "method", "Method", "name", "Name"];
    /// Accepted column names for the first alternative field.
    pub const ALT1_ALIASES: &[&str] = &["alt1", "Alt1", "Alt 1", "alternative_1", "Alternative 1"];
    /// Accepted column names for the second alternative field.
    pub const ALT2_ALIASES: &[&str] = &["alt2", "Alt2", "Alt 2", "alternative_2", "Alternative 2"];
    /// Accepted column names for the third alternative field.
    pub const ALT3_ALIASES: &[&str] = &["alt3", "Alt3", "Alt 3", "alternative_3", "Alternative 3"];
}

/// Constants used by the HTTP sheet source.
pub mod sheet {
    /// Source id reported by sheet-backed datasets.
    pub const SHEET_SOURCE_ID: &str = "sheet";
    /// Request timeout applied when none is configured.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
}

/// Environment variables read by `JourneyConfig::from_env` and `SheetSourceConfig::from_env`.
pub mod env {
    /// Endpoint of the JSON-published spreadsheet.
    pub const SHEET_ENDPOINT: &str = "JOURNEYS_SHEET_ENDPOINT";
    /// Request timeout in seconds for the sheet source.
    pub const SHEET_TIMEOUT_SECS: &str = "JOURNEYS_SHEET_TIMEOUT_SECS";
    /// Number of methods drawn per derivation.
    pub const METHOD_COUNT: &str = "JOURNEYS_METHOD_COUNT";
    /// RNG seed for reproducible sampling and shuffling.
    pub const SEED: &str = "JOURNEYS_SEED";
}
