//! Foundation types for the luasense toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Span`] - Line/column positions for symbol records
//! - [`Document`] - Right-trimmed source lines plus the owning module name
//! - [`TextRange`], [`TextSize`] - Byte offsets used by the lexer and parser
//!
//! This module has NO dependencies on other luasense modules.

mod document;
mod position;

pub use document::{Document, module_name};
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
