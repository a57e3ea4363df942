use std::env;
use std::str::FromStr;

use crate::constants::env::{METHOD_COUNT, SEED};
use crate::constants::payload::{
    ALT1_ALIASES, ALT2_ALIASES, ALT3_ALIASES, ALTERNATIVE_COLUMNS, LABEL_ALIASES,
};
use crate::constants::sampler::DEFAULT_METHOD_COUNT;
use crate::errors::JourneyError;
use crate::types::ColumnName;

/// Maps raw payload column names onto `RawRecord` fields.
///
/// Each field accepts several aliases; the first alias present on a row wins.
/// A mapping belongs to the source that decodes the payload
/// (`JsonFileSource::with_field_mapping`, `SheetSourceConfig::with_field_mapping`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldMapping {
    /// Column names accepted for the label field.
    pub label: Vec<ColumnName>,
    /// Column names accepted for `alt1`, `alt2`, and `alt3`, in field order.
    pub alternatives: [Vec<ColumnName>; ALTERNATIVE_COLUMNS],
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            label: owned(LABEL_ALIASES),
            alternatives: [owned(ALT1_ALIASES), owned(ALT2_ALIASES), owned(ALT3_ALIASES)],
        }
    }
}

impl FieldMapping {
    /// Prefer `column` for the label field ahead of the existing aliases.
    pub fn with_label_column(mut self, column: impl Into<ColumnName>) -> Self {
        self.label.insert(0, column.into());
        self
    }

    /// Prefer `column` for alternative field `index` (0-based) ahead of the existing aliases.
    pub fn with_alternative_column(
        mut self,
        index: usize,
        column: impl Into<ColumnName>,
    ) -> Result<Self, JourneyError> {
        let aliases = self.alternatives.get_mut(index).ok_or_else(|| {
            JourneyError::Configuration(format!(
                "alternative column index {index} out of range (expected < {ALTERNATIVE_COLUMNS})"
            ))
        })?;
        aliases.insert(0, column.into());
        Ok(self)
    }
}

fn owned(aliases: &[&str]) -> Vec<ColumnName> {
    aliases.iter().map(|alias| alias.to_string()).collect()
}

/// Top-level derivation configuration.
#[derive(Clone, Debug)]
pub struct JourneyConfig {
    /// Upper bound on the number of methods sampled per derivation.
    pub method_count: usize,
    /// RNG seed for reproducible sampling and shuffling; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            method_count: DEFAULT_METHOD_COUNT,
            seed: None,
        }
    }
}

impl JourneyConfig {
    /// Build a config from defaults overridden by `JOURNEYS_*` environment variables.
    pub fn from_env() -> Result<Self, JourneyError> {
        let mut config = Self::default();
        if let Some(count) = parse_env_var::<usize>(METHOD_COUNT)? {
            config.method_count = count;
        }
        config.seed = parse_env_var::<u64>(SEED)?;
        Ok(config)
    }

    /// Override the number of methods sampled per derivation.
    pub fn with_method_count(mut self, method_count: usize) -> Self {
        self.method_count = method_count;
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Read and parse an optional environment variable; blank values count as unset.
pub(crate) fn parse_env_var<T>(key: &str) -> Result<Option<T>, JourneyError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| JourneyError::Configuration(format!("invalid {key}='{raw}': {err}"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_samples_five_methods_unseeded() {
        let config = JourneyConfig::default();
        assert_eq!(config.method_count, 5);
        assert!(config.seed.is_none());
    }

    #[test]
    fn builders_override_fields() {
        let config = JourneyConfig::default().with_method_count(3).with_seed(9);
        assert_eq!(config.method_count, 3);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn custom_columns_take_precedence() {
        let mapping = FieldMapping::default()
            .with_label_column("Technique")
            .with_alternative_column(2, "Variant C")
            .unwrap();
        assert_eq!(mapping.label[0], "Technique");
        assert_eq!(mapping.alternatives[2][0], "Variant C");
        assert_eq!(mapping.alternatives[0][0], "alt1");
    }

    #[test]
    fn alternative_column_index_is_bounded() {
        let err = FieldMapping::default()
            .with_alternative_column(3, "Alt 4")
            .unwrap_err();
        assert!(matches!(err, JourneyError::Configuration(_)));
    }
}
