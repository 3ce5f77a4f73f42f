//! Specialized string type detectors
//!
//! Scalar strings run through an ordered chain of detectors; the first one
//! that recognizes the value decides the field type, otherwise the field
//! stays STRING. New detectors are appended to the chain without touching
//! the extraction dispatch.

use super::types::FieldType;
use chrono::{DateTime, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// A classifier for specialized string sub-types
pub trait StringDetector: Send + Sync {
    /// Detector name, used in diagnostics
    fn name(&self) -> &'static str;

    /// Classify a string value, returning its specialized type if recognized
    fn classify(&self, value: &str) -> Option<FieldType>;
}

/// Ordered, short-circuiting chain of string detectors
pub struct DetectorChain {
    detectors: Vec<Box<dyn StringDetector>>,
}

impl DetectorChain {
    /// Create an empty chain (every string stays STRING)
    pub fn empty() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Create the standard chain: timestamp detection only
    pub fn standard() -> Self {
        Self {
            detectors: vec![Box::new(TimestampDetector)],
        }
    }

    /// Append a detector to the end of the chain
    pub fn push(&mut self, detector: Box<dyn StringDetector>) {
        self.detectors.push(detector);
    }

    /// Classify a string value, falling back to STRING when no detector matches
    pub fn classify(&self, value: &str) -> FieldType {
        self.detectors
            .iter()
            .find_map(|d| d.classify(value))
            .unwrap_or(FieldType::String)
    }
}

impl Default for DetectorChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for DetectorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.detectors.iter().map(|d| d.name()).collect();
        f.debug_struct("DetectorChain").field("detectors", &names).finish()
    }
}

/// Detects strings that parse as warehouse timestamp literals
pub struct TimestampDetector;

impl StringDetector for TimestampDetector {
    fn name(&self) -> &'static str {
        "timestamp"
    }

    fn classify(&self, value: &str) -> Option<FieldType> {
        parse_timestamp(value).map(|_| FieldType::Timestamp)
    }
}

// Cheap shape check before handing the string to chrono:
// 2020-06-18T10:44:12 / 2020-06-18 10:44:12, optional fraction and zone.
static TIMESTAMP_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}").expect("timestamp shape pattern")
});

/// Parse a timestamp literal, returning its naive UTC instant
///
/// Accepted shapes: date + `T` or space + time, with optional fractional
/// seconds and an optional `Z`, numeric offset, or trailing ` UTC`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if !TIMESTAMP_SHAPE.is_match(value) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    let bare = value.strip_suffix(" UTC").unwrap_or(value);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(bare, format) {
            return Some(dt);
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(bare, format) {
            return Some(dt.naive_utc());
        }
    }

    None
}
