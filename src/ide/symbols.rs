//! Symbol listing for workspace and document views.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::base::{Document, Span};
use crate::hir::{SymbolIndex, SymbolKind};

/// An entry of the document outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: Arc<str>,
    pub span: Span,
}

/// A workspace-wide symbol name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceSymbol {
    pub name: Arc<str>,
    pub kind: SymbolKind,
    /// Module that defines the first record with this name.
    pub site: Arc<str>,
}

/// Outline of a document: one entry per line that starts a function.
///
/// The name is everything after the `function` keyword, so
/// `function M:show(x)` lists as `M:show(x)`.
pub fn document_symbols(document: &Document) -> Vec<SymbolInfo> {
    document
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let rest = line.trim().strip_prefix("function ")?;
            Some(SymbolInfo {
                name: Arc::from(rest.trim()),
                span: Span::line_start(i),
            })
        })
        .collect()
}

/// Every indexed name, once, optionally filtered by a case-insensitive
/// substring.
pub fn workspace_symbols(index: &SymbolIndex, query: Option<&str>) -> Vec<WorkspaceSymbol> {
    let query_lower = query.map(str::to_lowercase).filter(|q| !q.is_empty());
    let mut seen = FxHashSet::default();

    index
        .all_symbols()
        .filter(|(_, symbol)| {
            query_lower
                .as_deref()
                .is_none_or(|q| symbol.sign.to_lowercase().contains(q))
        })
        .filter(|(_, symbol)| seen.insert(symbol.sign.clone()))
        .map(|(_, symbol)| WorkspaceSymbol {
            name: symbol.sign.clone(),
            kind: symbol.kind,
            site: symbol.site.clone(),
        })
        .collect()
}
