//! Error types for schemaforge
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for schemaforge
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Schema Errors
    // ============================================================================
    /// Two schemas describe incompatible shapes for the same field.
    /// This is the only failure mode of the merge engine itself.
    #[error("Schema merge failed: {message}")]
    Merge { message: String },

    #[error("Schema extraction failed: {message}")]
    Extract { message: String },

    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to decode document at line {line}: {message}")]
    Decode { line: usize, message: String },

    // ============================================================================
    // Arrow/Parquet Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // Warehouse Errors
    // ============================================================================
    #[error("Warehouse error: {message}")]
    Warehouse { message: String },

    // ============================================================================
    // Configuration / I/O Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a merge error (schema incompatibility)
    pub fn merge(message: impl Into<String>) -> Self {
        Self::Merge {
            message: message.into(),
        }
    }

    /// Create an extraction error
    pub fn extract(message: impl Into<String>) -> Self {
        Self::Extract {
            message: message.into(),
        }
    }

    /// Create a decode error for a specific input line
    pub fn decode(line: usize, message: impl Into<String>) -> Self {
        Self::Decode {
            line,
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Create a warehouse error
    pub fn warehouse(message: impl Into<String>) -> Self {
        Self::Warehouse {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error is a schema incompatibility
    pub fn is_merge(&self) -> bool {
        matches!(self, Error::Merge { .. })
    }
}

/// Result type alias for schemaforge
pub type Result<T> = std::result::Result<T, Error>;
