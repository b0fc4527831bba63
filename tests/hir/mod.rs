//! HIR layer tests
//!
//! Tests for the symbol index and resolver:
//! - Line classification across whole documents
//! - Cross-file resolution through belong, alias and type tags
//! - Native engine member lookup
//! - Reparse behaviour

pub mod tests_classification;
pub mod tests_native;
pub mod tests_reparse;
pub mod tests_resolution;
