//! IDE layer tests
//!
//! End-to-end requests through `AnalysisHost` and `Analysis`.

pub mod tests_completion;
pub mod tests_debounce;
pub mod tests_goto;
pub mod tests_hover;
pub mod tests_symbols;
