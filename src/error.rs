use std::path::PathBuf;
use thiserror::Error;

/// The main error type for framelift operations.
#[derive(Debug, Error)]
pub enum FrameliftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse raw document JSON from {path}: {source}")]
    RawJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write IR JSON to {path}: {source}")]
    IrJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize IR JSON: {0}")]
    IrJsonSerialize(#[source] serde_json::Error),

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),
}
