//! Document and workspace symbol tests for the IDE layer.

use luasense::Span;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::{PLAYER, WIDGET};

#[test]
fn test_document_outline() {
    let host = analysis_from_sources(&[("player.lua", PLAYER)]);
    let symbols = host.analysis().document_symbols("player.lua");
    let names: Vec<&str> = symbols.iter().map(|s| s.name.as_ref()).collect();
    assert_eq!(
        names,
        vec!["M.attack(self, target)", "M:recharge()", "M:heal(amount)"]
    );
    assert_eq!(symbols[0].span, Span::from_coords(4, 0, 4, 0));
}

#[test]
fn test_outline_of_unknown_file_is_empty() {
    let host = analysis_from_sources(&[]);
    assert!(host.analysis().document_symbols("nope.lua").is_empty());
}

#[test]
fn test_workspace_symbols_deduplicate_and_filter() {
    let host = analysis_from_sources(&[("player.lua", PLAYER), ("Widget.lua", WIDGET)]);
    let analysis = host.analysis();

    let all = analysis.workspace_symbols(None);
    let m_count = all.iter().filter(|s| &*s.name == "M").count();
    assert_eq!(m_count, 1);

    let filtered: Vec<String> = analysis
        .workspace_symbols(Some("A"))
        .iter()
        .map(|s| s.name.to_string())
        .collect();
    assert_eq!(filtered, vec!["attack", "recharge", "heal"]);
}
