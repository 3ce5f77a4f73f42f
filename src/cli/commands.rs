//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// schemaforge CLI
#[derive(Parser, Debug)]
#[command(name = "schemaforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for schemas
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer the merged schema of a document file
    Infer {
        /// Input file (.jsonl/.ndjson for line-delimited, .json for a whole value)
        input: PathBuf,

        /// Maximum documents to read (0 = all)
        #[arg(long, default_value = "0")]
        max_documents: usize,

        /// Documents per fold batch
        #[arg(long, default_value = "1024")]
        batch_size: usize,

        /// Skip documents that fail extraction instead of aborting
        #[arg(long)]
        skip_bad: bool,

        /// Disable timestamp detection (timestamp-like strings stay STRING)
        #[arg(long)]
        no_timestamps: bool,
    },

    /// Merge schema files into one relaxed schema
    Merge {
        /// Schema JSON files, each in the boundary format
        #[arg(required = true)]
        schemas: Vec<PathBuf>,
    },

    /// Infer a schema, reconcile the target table, and load the documents
    Load {
        /// Input file (.jsonl/.ndjson or .json)
        input: PathBuf,

        /// Target table name
        #[arg(short, long)]
        table: String,

        /// Database file (omit for an in-memory smoke run)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Create/update the table but skip loading data
        #[arg(long)]
        schema_only: bool,

        /// Documents per fold batch
        #[arg(long, default_value = "1024")]
        batch_size: usize,

        /// Skip documents that fail extraction instead of aborting
        #[arg(long)]
        skip_bad: bool,
    },

    /// Write a deterministic example document corpus
    Sample {
        /// Output file (JSONL)
        output: PathBuf,

        /// Number of documents
        #[arg(long, default_value = "1000")]
        count: usize,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    Pretty,
}
