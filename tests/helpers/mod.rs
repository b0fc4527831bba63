//! Shared setup for the integration suite.

pub mod hir_helpers;
pub mod source_fixtures;
