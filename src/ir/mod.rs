//! Intermediate Representation (IR) for framelift.
//!
//! This module defines the semantic node tree the lowering pipeline
//! produces and code generation consumes. It is the "AST" of the
//! system: raw design nodes come in one side of the pipeline, and this
//! representation — plus the deduplicated styles bundle — comes out.
//!
//! # Design Principles
//!
//! 1. **Closed variant union**: every node is exactly one semantic
//!    variant, and consumers match exhaustively, so a new variant
//!    forces a compile-time audit of every switch site.
//!
//! 2. **Type-safe geometry**: document-absolute and parent-relative
//!    rectangles use distinct marker types and cannot be mixed.
//!
//! 3. **Permissive input**: malformed geometry from upstream exports is
//!    representable; heuristics degrade to safe defaults rather than
//!    panic.

pub mod geom;
pub mod io_json;
mod node;
mod styles;

// Re-export core types for convenient access
pub use geom::{Canvas, Local, Rect};
pub use node::{ComponentKind, FieldKind, IrNode, NodeBase};
pub use styles::{
    Border, CornerRadius, ExtractedStyle, Shadow, StylesBundle, TokenTables, Typography,
};
