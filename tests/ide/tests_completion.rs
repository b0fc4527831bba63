//! Code completion tests for the IDE layer.

use luasense::hir::SymbolKind;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::{CONFIG, HUD, PANEL, PLAYER, WIDGET};

fn labels(items: &[luasense::ide::CompletionItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_ref()).collect()
}

#[test]
fn test_dot_trigger_on_module() {
    let host = analysis_from_sources(&[
        ("scripts/player.lua", PLAYER),
        ("scripts/enemy.lua", "local M = {}\nfunction M:think()\n    player.\nend"),
    ]);
    let analysis = host.analysis();
    let items = analysis.completions("scripts/enemy.lua", 2, 11, Some('.'));
    assert_eq!(labels(&items), vec!["attack", "heal"]);
}

#[test]
fn test_documentation_ends_with_site() {
    let host = analysis_from_sources(&[
        ("player.lua", PLAYER),
        ("enemy.lua", "player."),
    ]);
    let items = host.analysis().completions("enemy.lua", 0, 7, Some('.'));
    let attack = items.iter().find(|i| &*i.label == "attack").expect("attack offered");
    assert_eq!(
        &*attack.documentation,
        "-- Deal damage to a target.\n-- @param target Enemy\n\nfrom: player"
    );
    assert_eq!(attack.lsp_kind, 2);

    let heal = items.iter().find(|i| &*i.label == "heal").expect("heal offered");
    assert_eq!(&*heal.documentation, "from: player");
}

#[test]
fn test_colon_trigger_through_type_tag() {
    let host = analysis_from_sources(&[("Widget.lua", WIDGET), ("hud.lua", HUD)]);
    let items = host.analysis().completions("hud.lua", 5, 14, Some(':'));
    assert_eq!(labels(&items), vec!["show", "hide"]);
}

#[test]
fn test_native_members_on_args_field() {
    let host = analysis_from_sources(&[("panel.lua", PANEL)]);
    let items = host.analysis().completions("panel.lua", 10, 15, Some('.'));
    assert!(labels(&items).contains(&"sprite"));
    assert!(items.iter().all(|i| i.kind == SymbolKind::Variable));
}

#[test]
fn test_invoked_completion_after_member_access() {
    let host = analysis_from_sources(&[("player.lua", PLAYER), ("enemy.lua", "player.he")]);
    let items = host.analysis().completions("enemy.lua", 0, 9, None);
    assert!(labels(&items).contains(&"heal"));
}

#[test]
fn test_invoked_completion_on_bare_word() {
    let host = analysis_from_sources(&[
        ("util.lua", "function formatTime()\nend"),
        ("hud.lua", "local function formatName()\nend\nfor"),
    ]);
    let items = host.analysis().completions("hud.lua", 2, 3, None);
    assert_eq!(labels(&items), vec!["formatName", "formatTime"]);
}

#[test]
fn test_table_children_of_local() {
    let source = format!("{CONFIG}print(Colors.)");
    let host = analysis_from_sources(&[("config.lua", source.as_str())]);
    let analysis = host.analysis();
    let line = CONFIG.lines().count();
    let items = analysis.completions("config.lua", line, 13, Some('.'));
    assert_eq!(labels(&items), vec!["red", "green", "nested"]);
}

#[test]
fn test_other_triggers_and_unknown_files_are_empty() {
    let host = analysis_from_sources(&[("player.lua", PLAYER)]);
    let analysis = host.analysis();
    assert!(analysis.completions("player.lua", 0, 3, Some('(')).is_empty());
    assert!(analysis.completions("missing.lua", 0, 0, Some('.')).is_empty());
    assert!(analysis.completions("player.lua", 1, 0, Some('.')).is_empty());
}
