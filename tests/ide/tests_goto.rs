//! Go-to-definition tests for the IDE layer.

use luasense::Span;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::{CONFIG, PLAYER};

#[test]
fn test_goto_member_in_other_file() {
    let host = analysis_from_sources(&[
        ("scripts/player.lua", PLAYER),
        ("scripts/enemy.lua", "local M = {}\nfunction M:think()\n    player.attack(self, nil)\nend"),
    ]);
    let target = host
        .analysis()
        .goto_definition("scripts/enemy.lua", 2, 14)
        .expect("definition found");
    assert_eq!(&*target.uri, "scripts/player.lua");
    assert_eq!(target.span, Span::declaration(4, 11));
}

#[test]
fn test_goto_global_function() {
    let host = analysis_from_sources(&[
        ("util.lua", "\nfunction helper(x)\nend"),
        ("hud.lua", "helper(1)"),
    ]);
    let target = host.analysis().goto_definition("hud.lua", 0, 2).expect("definition found");
    assert_eq!(&*target.uri, "util.lua");
    assert_eq!(target.span.start.line, 1);
}

#[test]
fn test_goto_table_child() {
    let source = format!("{CONFIG}print(Colors.green)");
    let host = analysis_from_sources(&[("config.lua", source.as_str())]);
    let line = CONFIG.lines().count();
    let target = host.analysis().goto_definition("config.lua", line, 15).expect("definition found");
    assert_eq!(target.span, Span::declaration(3, 4));
}

#[test]
fn test_goto_nothing_under_cursor() {
    let host = analysis_from_sources(&[("hud.lua", "x = 1 +   2")]);
    let analysis = host.analysis();
    assert!(analysis.goto_definition("hud.lua", 0, 8).is_none());
    assert!(analysis.goto_definition("hud.lua", 0, 10).is_none());
}
