//! # luasense-base
//!
//! Heuristic static analysis for Lua game code: line-based declaration
//! scanning, a cross-file symbol index and the queries editors need
//! (completion, go-to-definition, outline, hover).
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Editor features and the AnalysisHost
//!   ↓
//! project   → Settings, workspace scanning, debounced reparses
//!   ↓
//! hir       → Line classifier, extraction, symbol index, resolver
//!   ↓
//! parser    → Logos lexer, Lua parser, literal values, chunk windows
//!   ↓
//! core      → Cursor and word helpers
//!   ↓
//! base      → Documents, positions, spans
//! ```

// ============================================================================
// MODULES (dependency order: base → core → parser → hir → project → ide)
// ============================================================================

/// Foundation types: Document, Position, Span
pub mod base;

/// Cursor-relative text helpers
pub mod core;

/// Parser: Logos lexer, recursive-descent parser, literal lowering
pub mod parser;

/// High-level IR: symbol records, classification, index and resolution
pub mod hir;

/// Project management: settings, workspace loading, reparse scheduling
pub mod project;

/// IDE features: completion, goto-definition, symbols, hover
pub mod ide;

// Re-export foundation types
pub use base::{Document, Position, Span, TextRange, TextSize};
pub use hir::{HirSymbol, ResolveResult, Resolver, SymbolIndex};
pub use ide::{Analysis, AnalysisHost};
pub use project::{ProjectError, Settings};
