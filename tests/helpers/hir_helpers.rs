//! HIR test helpers for setting up analysis hosts and querying the index.

use luasense::hir::{HirSymbol, Resolver, SymbolIndex};
use luasense::ide::AnalysisHost;

/// Creates an AnalysisHost with every `(path, text)` pair indexed.
pub fn analysis_from_sources(files: &[(&str, &str)]) -> AnalysisHost {
    let mut host = AnalysisHost::new();
    for (path, text) in files {
        host.index_document(path, text);
    }
    host
}

/// Splits `a.b.c` into a raw chain.
pub fn chain(dotted: &str) -> Vec<String> {
    dotted
        .split(['.', ':'])
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Completion candidates for a raw chain typed in `active`.
pub fn complete(index: &SymbolIndex, active: &str, raw: &str, trigger: char) -> Vec<HirSymbol> {
    let resolver = Resolver::new(index).with_active_file(active);
    let raw = chain(raw);
    let mapped = resolver.map_chain(&raw);
    resolver.resolve_for_completion(&mapped, &raw, Some(trigger), None)
}

/// Signs of a record list, in order.
pub fn signs(symbols: &[HirSymbol]) -> Vec<String> {
    symbols.iter().map(|s| s.sign.to_string()).collect()
}
