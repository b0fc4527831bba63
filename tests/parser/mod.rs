//! Parser layer tests
//!
//! Chunk windows over documents and lowering of literal values.

pub mod tests_chunk;
