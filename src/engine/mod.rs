//! Inference engine
//!
//! Orchestrates a full inference run: decode documents, extract per-document
//! schemas in parallel batch tasks, and fold the partial schemas into one
//! final schema. Partials are folded in completion order; this is correct
//! because the merge operation is associative and commutative with absence
//! as its identity.

mod types;

pub use types::{EngineConfig, InferStats};

use crate::accumulator::SchemaAccumulator;
use crate::decode::{build_decoder, DocumentFormat};
use crate::error::{Error, Result};
use crate::schema::{DetectorChain, Schema, SchemaExtractor};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Schema inference engine
#[derive(Debug, Default)]
pub struct InferenceEngine {
    /// Engine configuration
    config: EngineConfig,
    /// Statistics
    stats: InferStats,
}

/// Result of folding one batch of documents
struct BatchOutcome {
    partial: SchemaAccumulator,
    seen: usize,
    skipped: usize,
}

impl InferenceEngine {
    /// Create a new engine with default configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            stats: InferStats::default(),
        }
    }

    /// Set engine configuration
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Get statistics
    pub fn stats(&self) -> &InferStats {
        &self.stats
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = InferStats::default();
    }

    /// Read and decode every document in a file
    pub async fn read_documents(&self, path: &Path) -> Result<Vec<Value>> {
        let body = tokio::fs::read_to_string(path).await?;
        let format = self
            .config
            .format
            .unwrap_or_else(|| DocumentFormat::from_path(path));
        build_decoder(format).decode(&body)
    }

    /// Infer the final schema for a file of documents
    pub async fn infer_file(&mut self, path: &Path) -> Result<Option<Schema>> {
        let documents = self.read_documents(path).await?;
        info!(
            path = %path.display(),
            documents = documents.len(),
            "decoded documents"
        );
        self.infer_documents(Arc::new(documents)).await
    }

    /// Infer the final schema for a collection of documents
    ///
    /// Documents are split into batches; each batch extracts and folds on a
    /// blocking task (the core is pure and CPU-bound), then the partial
    /// schemas fold as the tasks complete.
    pub async fn infer_documents(&mut self, documents: Arc<Vec<Value>>) -> Result<Option<Schema>> {
        let start = Instant::now();

        let total = if self.config.max_documents > 0 {
            documents.len().min(self.config.max_documents)
        } else {
            documents.len()
        };
        let batch_size = self.config.batch_size.max(1);

        let mut tasks: JoinSet<Result<BatchOutcome>> = JoinSet::new();
        let mut batches = 0usize;
        let mut offset = 0usize;
        while offset < total {
            let end = (offset + batch_size).min(total);
            let docs = Arc::clone(&documents);
            let detect = self.config.detect_timestamps;
            let skip_bad = self.config.skip_bad_documents;
            tasks.spawn_blocking(move || fold_batch(&docs[offset..end], detect, skip_bad));
            batches += 1;
            offset = end;
        }
        debug!(documents = total, batches, "folding document batches");

        let mut accumulator = SchemaAccumulator::new();
        while let Some(joined) = tasks.join_next().await {
            let outcome =
                joined.map_err(|e| Error::Other(format!("schema fold task failed: {e}")))??;
            accumulator.merge(outcome.partial)?;
            self.stats.add_documents(outcome.seen);
            self.stats.add_skipped(outcome.skipped);
            self.stats.add_batch();
        }

        self.stats.set_duration(start.elapsed().as_millis() as u64);
        Ok(accumulator.finish())
    }
}

/// Extract and fold one batch of documents into a partial schema
fn fold_batch(documents: &[Value], detect_timestamps: bool, skip_bad: bool) -> Result<BatchOutcome> {
    let extractor = if detect_timestamps {
        SchemaExtractor::new()
    } else {
        SchemaExtractor::with_detectors(DetectorChain::empty())
    };

    let mut partial = SchemaAccumulator::new();
    let mut seen = 0;
    let mut skipped = 0;
    for document in documents {
        match extractor.extract(document) {
            Ok(schema) => {
                // Incompatibilities between documents always abort the run
                partial.add_schema(schema)?;
                seen += 1;
            }
            Err(e) if skip_bad => {
                warn!(error = %e, "skipping document that failed extraction");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(BatchOutcome {
        partial,
        seen,
        skipped,
    })
}
