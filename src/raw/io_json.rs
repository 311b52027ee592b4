//! JSON reading for raw design documents.
//!
//! The external fetch layer stores the node subtree it retrieved from
//! the design tool's REST API as plain JSON; this module parses that
//! payload into [`RawNode`]. Useful for:
//! - Driving the pipeline from captured API responses
//! - Testing the lowering stages without any network layer

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::model::RawNode;
use crate::error::FrameliftError;

/// Reads a raw document tree from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_raw_json(path: &Path) -> Result<RawNode, FrameliftError> {
    let file = File::open(path).map_err(FrameliftError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| FrameliftError::RawJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a raw document tree from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<RawNode, serde_json::Error> {
    serde_json::from_str(json)
}
