//! High-level IR (HIR): symbol records, extraction and resolution.
//!
//! Source text flows through three stages before any editor query sees it:
//!
//! ```text
//! Document                  ← INPUT: right-trimmed source lines
//!     │
//!     ▼
//! classify_line(doc, i)     ← Line signatures (functions, variables, tags)
//!     │
//!     ▼
//! extract_document(doc)     ← Records with target buckets + relation facts
//!     │
//!     ▼
//! SymbolIndex               ← Workspace buckets and relation maps
//!     │
//!     ▼
//! Resolver                  ← Completion and definition queries
//! ```
//!
//! ## Key Types
//!
//! - [`HirSymbol`] - A record in the index
//! - [`Classified`] - What one source line declares
//! - [`ExtractionResult`] - Everything one file contributes
//! - [`SymbolIndex`] - Workspace-wide buckets
//! - [`Resolver`] - Chain resolution against an index
//! - [`NativeCatalog`] - Engine type member tables

mod classify;
mod extract;
mod native;
mod resolve;
mod symbols;

pub use classify::{
    ARGS_MARKER, ALIAS_MARKER, ArgsField, BELONG_MARKER, Classified, DeclForm, Declaration,
    PRIVATE_MARKER, TYPE_MARKER, TagComment, TagTarget, UNITY_TYPE_MARKER, args_native_type,
    classify_line, doc_block, tag_target,
};
pub use extract::{BucketedSymbol, ExtractionResult, FileRelations, GLOBAL_BUCKET, extract_document};
pub use native::{NativeCatalog, NativeType, NativeVariable};
pub use resolve::{RefEntry, RelationMaps, ResolveResult, Resolver, SymbolIndex};
pub use symbols::{HirSymbol, Indexer, Scope, SymbolKind, SymbolType, is_self_name};
