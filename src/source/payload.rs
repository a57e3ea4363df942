//! Decoding of spreadsheet-style JSON payloads into `RawDataset`s.
//!
//! The expected shape is an array of row objects keyed by column header, e.g.
//! `[{"Method": "Journey mapping", "Alt 1": "Map the path", "Alt 2": "", ...}]`.

use serde_json::{Map, Value};

use crate::config::FieldMapping;
use crate::data::{RawDataset, RawRecord};
use crate::errors::JourneyError;
use crate::utils::normalize_inline_whitespace;

/// Decode a JSON response body into a dataset attributed to `source_id`.
pub fn decode_payload(
    source_id: &str,
    body: &str,
    mapping: &FieldMapping,
) -> Result<RawDataset, JourneyError> {
    let json: Value = serde_json::from_str(body).map_err(|err| JourneyError::DataFormat {
        source_id: source_id.to_string(),
        details: format!("response is not valid JSON: {err}"),
    })?;
    let records = records_from_json(source_id, &json, mapping)?;
    Ok(RawDataset::new(source_id, records))
}

/// Map an already-parsed JSON value onto raw records.
///
/// The value must be an array whose elements are all objects. Missing or null
/// cells become empty strings; numbers and booleans are rendered as text.
pub fn records_from_json(
    source_id: &str,
    json: &Value,
    mapping: &FieldMapping,
) -> Result<Vec<RawRecord>, JourneyError> {
    let rows = json.as_array().ok_or_else(|| JourneyError::DataFormat {
        source_id: source_id.to_string(),
        details: format!("expected an array of rows, found {}", value_kind(json)),
    })?;

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let object = row.as_object().ok_or_else(|| JourneyError::DataFormat {
                source_id: source_id.to_string(),
                details: format!("row {idx} is {} rather than an object", value_kind(row)),
            })?;
            record_from_row(source_id, idx, object, mapping)
        })
        .collect()
}

fn record_from_row(
    source_id: &str,
    idx: usize,
    row: &Map<String, Value>,
    mapping: &FieldMapping,
) -> Result<RawRecord, JourneyError> {
    let cell = |aliases: &[String]| -> Result<String, JourneyError> {
        let Some(value) = aliases.iter().find_map(|alias| row.get(alias)) else {
            return Ok(String::new());
        };
        cell_text(value).ok_or_else(|| JourneyError::DataFormat {
            source_id: source_id.to_string(),
            details: format!("row {idx} holds a nested {} cell", value_kind(value)),
        })
    };
    let [alt1, alt2, alt3] = &mapping.alternatives;
    Ok(RawRecord {
        label: cell(&mapping.label)?,
        alt1: cell(alt1)?,
        alt2: cell(alt2)?,
        alt3: cell(alt3)?,
    })
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(text) => Some(normalize_inline_whitespace(text)),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
