//! Decoder implementations

use super::types::{DocumentFormat, RecordDecoder};
use crate::error::{Error, Result};
use serde_json::Value;

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSONL decoder: one document per line, blank lines skipped
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        body.lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_num, line)| {
                serde_json::from_str(line).map_err(|e| Error::decode(line_num, e.to_string()))
            })
            .collect()
    }
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder: the whole input is one value, either an array of documents
/// or a single document
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body)?;
        match value {
            Value::Array(records) => Ok(records),
            other => Ok(vec![other]),
        }
    }
}

/// Build the decoder for a document format
pub fn build_decoder(format: DocumentFormat) -> Box<dyn RecordDecoder> {
    match format {
        DocumentFormat::Jsonl => Box::new(JsonlDecoder::new()),
        DocumentFormat::Json => Box::new(JsonDecoder::new()),
    }
}
