//! Engine configuration and statistics

use crate::decode::DocumentFormat;

/// Configuration for an inference run
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Documents folded per batch task
    pub batch_size: usize,
    /// Maximum documents to consume (0 = unlimited)
    pub max_documents: usize,
    /// Skip documents that fail extraction instead of aborting the run
    pub skip_bad_documents: bool,
    /// Run the timestamp detector on string values
    pub detect_timestamps: bool,
    /// Input format override (default: pick by file extension)
    pub format: Option<DocumentFormat>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_size: 1024,
            max_documents: 0,
            skip_bad_documents: false,
            detect_timestamps: true,
            format: None,
        }
    }
}

impl EngineConfig {
    /// Create a new engine config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set batch size
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set max documents
    #[must_use]
    pub fn with_max_documents(mut self, max: usize) -> Self {
        self.max_documents = max;
        self
    }

    /// Skip documents that fail extraction
    #[must_use]
    pub fn with_skip_bad_documents(mut self, skip: bool) -> Self {
        self.skip_bad_documents = skip;
        self
    }

    /// Enable or disable timestamp detection
    #[must_use]
    pub fn with_timestamp_detection(mut self, enabled: bool) -> Self {
        self.detect_timestamps = enabled;
        self
    }

    /// Force an input format
    #[must_use]
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Statistics from an inference run
#[derive(Debug, Clone, Default)]
pub struct InferStats {
    /// Documents folded into the schema
    pub documents_seen: usize,
    /// Documents skipped because extraction failed
    pub documents_skipped: usize,
    /// Batch tasks folded
    pub batches_folded: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl InferStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add folded documents
    pub fn add_documents(&mut self, count: usize) {
        self.documents_seen += count;
    }

    /// Add skipped documents
    pub fn add_skipped(&mut self, count: usize) {
        self.documents_skipped += count;
    }

    /// Add a folded batch
    pub fn add_batch(&mut self) {
        self.batches_folded += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
