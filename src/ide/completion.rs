//! Completion suggestions implementation.

use std::sync::Arc;

use tracing::trace;

use crate::base::Document;
use crate::core::{access_chain, word_before_cursor};
use crate::hir::{HirSymbol, Indexer, Resolver, SymbolIndex, SymbolKind};

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    pub kind: SymbolKind,
    /// `CompletionItemKind` number sent to the editor.
    pub lsp_kind: u32,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation followed by the defining module.
    pub documentation: Arc<str>,
    pub indexer: Indexer,
}

impl CompletionItem {
    /// Create from a HirSymbol.
    pub fn from_symbol(symbol: &HirSymbol) -> Self {
        let mut documentation = symbol
            .documentation
            .as_deref()
            .unwrap_or_default()
            .to_string();
        if !documentation.is_empty() {
            documentation.push_str("\n\n");
        }
        documentation.push_str("from: ");
        documentation.push_str(&symbol.site);

        Self {
            label: symbol.sign.clone(),
            kind: symbol.kind,
            lsp_kind: symbol.kind.to_lsp(),
            detail: symbol.detail.clone(),
            documentation: Arc::from(documentation),
            indexer: symbol.indexer,
        }
    }
}

/// Get completion suggestions at a position.
///
/// # Arguments
/// * `index` - The symbol index to search
/// * `document` - The document containing the cursor
/// * `line` - Cursor line (0-indexed)
/// * `col` - Cursor column (0-indexed)
/// * `trigger` - The character that triggered completion, or `None` when
///   the user invoked it explicitly
pub fn completions(
    index: &SymbolIndex,
    document: &Document,
    line: usize,
    col: usize,
    trigger: Option<char>,
) -> Vec<CompletionItem> {
    let text = document.line(line);

    let (raw, trigger, word) = match trigger {
        Some(c @ ('.' | ':')) => {
            let raw = access_chain(text, col);
            if raw.is_empty() {
                return Vec::new();
            }
            (raw, Some(c), None)
        }
        Some(_) => return Vec::new(),
        None => {
            let (start, word) = word_before_cursor(text, col);
            let before = start
                .checked_sub(1)
                .and_then(|i| text.chars().nth(i))
                .filter(|c| matches!(c, '.' | ':'));
            match before {
                Some(c) => (access_chain(text, start), Some(c), Some(word)),
                None => (Vec::new(), None, Some(word)),
            }
        }
    };

    let resolver = Resolver::new(index).with_active_file(document.module().clone());
    let chain = resolver.map_chain(&raw);
    trace!(raw = ?raw, chain = ?chain, "completion chain");

    resolver
        .resolve_for_completion(&chain, &raw, trigger, word.as_deref())
        .iter()
        .map(CompletionItem::from_symbol)
        .collect()
}
