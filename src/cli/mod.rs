//! CLI module
//!
//! Command-line interface for schema inference and loading.
//!
//! # Commands
//!
//! - `infer` - Infer the merged schema of a document file
//! - `merge` - Merge schema files into one relaxed schema
//! - `load` - Infer, reconcile the target table, and load the documents
//! - `sample` - Write a deterministic example document corpus

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
