use std::time::Duration;

use tracing::{info, warn};
use ureq::Agent;

use crate::config::{FieldMapping, parse_env_var};
use crate::constants::env::{SHEET_ENDPOINT, SHEET_TIMEOUT_SECS};
use crate::constants::sheet::{DEFAULT_TIMEOUT_SECS, SHEET_SOURCE_ID};
use crate::data::RawDataset;
use crate::errors::JourneyError;
use crate::source::DatasetSource;
use crate::source::payload::decode_payload;
use crate::types::SourceId;

/// Configuration for a JSON-published spreadsheet endpoint.
#[derive(Clone, Debug)]
pub struct SheetSourceConfig {
    /// Stable source identifier used in datasets and errors.
    pub source_id: SourceId,
    /// URL returning the sheet rows as a JSON array of objects.
    pub endpoint: String,
    /// Global timeout for one request, connect through body read.
    pub timeout: Duration,
    /// Column mapping applied to each row.
    pub field_mapping: FieldMapping,
}

impl SheetSourceConfig {
    /// Create a config for `endpoint` with default id, timeout, and mapping.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            source_id: SHEET_SOURCE_ID.to_string(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            field_mapping: FieldMapping::default(),
        }
    }

    /// Build a config from `JOURNEYS_SHEET_ENDPOINT` and `JOURNEYS_SHEET_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, JourneyError> {
        let endpoint = parse_env_var::<String>(SHEET_ENDPOINT)?
            .ok_or_else(|| JourneyError::Configuration(format!("{SHEET_ENDPOINT} must be set")))?;
        let mut config = Self::new(endpoint);
        if let Some(secs) = parse_env_var::<u64>(SHEET_TIMEOUT_SECS)? {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Override the source identifier.
    pub fn with_source_id(mut self, source_id: impl Into<SourceId>) -> Self {
        self.source_id = source_id.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the column mapping.
    pub fn with_field_mapping(mut self, field_mapping: FieldMapping) -> Self {
        self.field_mapping = field_mapping;
        self
    }
}

/// Fetches the dataset from a spreadsheet exposed as JSON over HTTP.
///
/// One GET per `fetch`; no retry or backoff.
pub struct SheetSource {
    config: SheetSourceConfig,
    agent: Agent,
}

impl SheetSource {
    /// Create a sheet source; fails when the endpoint is blank.
    pub fn new(config: SheetSourceConfig) -> Result<Self, JourneyError> {
        if config.endpoint.trim().is_empty() {
            return Err(JourneyError::Configuration(
                "sheet endpoint must not be empty".into(),
            ));
        }
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();
        Ok(Self { config, agent })
    }

    fn fetch_error(&self, reason: String) -> JourneyError {
        warn!(
            "[journeys:sheet] fetch from '{}' failed: {}",
            self.config.endpoint, reason
        );
        JourneyError::Fetch {
            source_id: self.config.source_id.clone(),
            reason,
        }
    }
}

impl DatasetSource for SheetSource {
    fn id(&self) -> &str {
        &self.config.source_id
    }

    fn fetch(&self) -> Result<RawDataset, JourneyError> {
        info!(
            "[journeys:sheet] fetching dataset from {}",
            self.config.endpoint
        );
        let response = self
            .agent
            .get(&self.config.endpoint)
            .call()
            .map_err(|err| self.fetch_error(format!("request failed: {err}")))?;
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|err| self.fetch_error(format!("failed reading response body: {err}")))?;
        let dataset = decode_payload(&self.config.source_id, &body, &self.config.field_mapping)?;
        info!(
            "[journeys:sheet] fetched {} rows from '{}'",
            dataset.len(),
            self.config.source_id
        );
        Ok(dataset)
    }
}
