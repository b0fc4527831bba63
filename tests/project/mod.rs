//! Project layer tests
//!
//! Settings decoding and workspace scanning against real directories.

pub mod tests_workspace;
