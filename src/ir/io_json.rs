//! JSON serialization for the framelift IR.
//!
//! Writes the pipeline's output triple (IR root, styles bundle,
//! detection result) as one JSON document. Useful for:
//! - Handing the IR to an out-of-process code generator
//! - Debugging the pipeline by inspecting the lowered tree
//! - Asserting determinism in tests

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::FrameliftError;
use crate::pipeline::LowerOutput;

/// Writes a lowering output to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_ir_json(path: &Path, output: &LowerOutput) -> Result<(), FrameliftError> {
    let file = File::create(path).map_err(FrameliftError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, output).map_err(|source| FrameliftError::IrJsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a lowering output to a JSON string.
///
/// Useful for testing without file I/O.
pub fn to_json_string(output: &LowerOutput) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeOptions;
    use crate::raw::io_json::from_json_str;

    #[test]
    fn test_output_serializes_with_expected_sections() {
        let raw = from_json_str(
            r#"{"id": "0:1", "name": "Screen", "type": "FRAME",
                "absoluteBoundingBox": {"x": 0, "y": 0, "width": 100, "height": 100}}"#,
        )
        .unwrap();
        let output = crate::pipeline::lower(&raw, &NormalizeOptions::default());
        let json = to_json_string(&output).unwrap();

        assert!(json.contains("\"root\""));
        assert!(json.contains("\"styles\""));
        assert!(json.contains("\"detection\""));
    }
}
