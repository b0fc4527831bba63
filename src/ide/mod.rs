//! IDE features: high-level APIs for editor request handlers.
//!
//! This module sits between the symbol index (HIR) and whatever protocol
//! layer talks to the editor. Each function corresponds to one request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No protocol types**: Uses our own types, converted at the boundary
//! 3. **Composable**: Built on top of HIR queries
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use luasense::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.index_document("scripts/player.lua", "function M.attack()\nend");
//!
//! let analysis = host.analysis();
//! let outline = analysis.document_symbols("scripts/player.lua");
//! ```

mod analysis;
mod completion;
mod goto;
mod hover;
mod symbols;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionItem, completions};
pub use goto::{GotoTarget, goto_definition};
pub use hover::{HoverResult, hover};
pub use symbols::{SymbolInfo, WorkspaceSymbol, document_symbols, workspace_symbols};
