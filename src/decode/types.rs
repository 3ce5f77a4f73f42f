//! Decoder types and traits

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Format of a document source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// JSON Lines: one document per line (default)
    #[default]
    Jsonl,
    /// A single JSON value: an array of documents or one document
    Json,
}

impl DocumentFormat {
    /// Pick a format from a file extension; `.json` means a whole-file value,
    /// everything else is treated as line-delimited
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Jsonl,
        }
    }
}

/// Trait for decoding raw input into a list of JSON documents
pub trait RecordDecoder: Send + Sync {
    /// Decode the input body into a list of documents
    fn decode(&self, body: &str) -> Result<Vec<Value>>;
}
