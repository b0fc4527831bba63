//! Reindexing a file replaces everything it contributed.

use luasense::ide::AnalysisHost;

use crate::helpers::hir_helpers::*;

#[test]
fn test_reparse_replaces_bucket() {
    let mut host = AnalysisHost::new();
    host.index_document("player.lua", "function M.attack()\nend\nfunction M.defend()\nend");
    assert_eq!(signs(&complete(host.symbol_index(), "hud", "player", '.')), vec!["attack", "defend"]);

    host.index_document("player.lua", "function M.attack()\nend");
    assert_eq!(signs(&complete(host.symbol_index(), "hud", "player", '.')), vec!["attack"]);
}

#[test]
fn test_reparse_prunes_relations() {
    let mut host = AnalysisHost::new();
    host.index_document("bar.lua", "-- @alias Foo\nfunction M.x()\nend");
    assert_eq!(host.symbol_index().relations().alias("Foo"), Some("bar"));

    host.index_document("bar.lua", "function M.x()\nend");
    assert_eq!(host.symbol_index().relations().alias("Foo"), None);
    assert!(complete(host.symbol_index(), "hud", "Foo", '.').is_empty());
}

#[test]
fn test_reparse_keeps_other_files_records_in_shared_bucket() {
    let mut host = AnalysisHost::new();
    host.index_document("core_a.lua", "-- @belong Core\nfunction M.a()\nend");
    host.index_document("core_b.lua", "-- @belong Core\nfunction M.b()\nend");
    host.index_document("core_a.lua", "-- @belong Core\nfunction M.a2()\nend");

    let found = signs(&complete(host.symbol_index(), "hud", "Core", '.'));
    assert_eq!(found, vec!["b", "a2"]);
}

#[test]
fn test_indexing_twice_is_idempotent() {
    let mut host = AnalysisHost::new();
    let source = "function M.attack()\nend";
    host.index_document("player.lua", source);
    host.index_document("player.lua", source);
    assert_eq!(host.symbol_index().bucket("player").len(), 1);
}
