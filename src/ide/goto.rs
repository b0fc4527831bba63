//! Go-to-definition implementation.

use std::sync::Arc;

use crate::base::{Document, Span};
use crate::core::{access_chain, word_touching_cursor};
use crate::hir::{ResolveResult, Resolver, SymbolIndex};

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    /// Document containing the definition.
    pub uri: Arc<str>,
    pub span: Span,
}

/// Find the definition of the identifier at a position.
///
/// `uri_of` maps a module name to its document identity, used when the
/// record itself does not carry one.
pub fn goto_definition(
    index: &SymbolIndex,
    document: &Document,
    line: usize,
    col: usize,
    uri_of: impl Fn(&str) -> Option<Arc<str>>,
) -> Option<GotoTarget> {
    let text = document.line(line);
    let (start, word) = word_touching_cursor(text, col)?;

    let raw = access_chain(text, start);
    let resolver = Resolver::new(index).with_active_file(document.module().clone());
    let chain = resolver.map_chain(&raw);

    let ResolveResult::Found(symbol) = resolver.resolve_definition(&chain, &raw, &word) else {
        return None;
    };
    let span = symbol.span?;
    let uri = symbol.uri.clone().or_else(|| uri_of(&symbol.site))?;
    Some(GotoTarget { uri, span })
}
