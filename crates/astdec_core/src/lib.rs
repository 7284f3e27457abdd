//! Public library API for decoding shape-described binary AST modules.

/// Container parsing, configurable wire primitives, and shape-driven object decoding.
pub mod ast;
