//! Language-agnostic helpers shared by the IDE layer.

pub mod text_utils;

pub use text_utils::{access_chain, word_before_cursor, word_touching_cursor};
