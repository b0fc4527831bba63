//! Cross-file resolution scenarios.

use luasense::hir::{GLOBAL_BUCKET, Resolver, Scope};

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::{HUD, PLAYER, WIDGET};

#[test]
fn test_module_members_by_file_name() {
    let host = analysis_from_sources(&[(
        "scripts/player.lua",
        "local M = {}\nfunction M.attack(self) end",
    )]);
    let found = complete(host.symbol_index(), "enemy", "player", '.');
    assert_eq!(signs(&found), vec!["attack"]);
}

#[test]
fn test_belong_moves_members_to_named_module() {
    let host = analysis_from_sources(&[("core_impl.lua", "-- @belong Core\nfunction M.init() end")]);
    let found = complete(host.symbol_index(), "hud", "Core", '.');
    assert_eq!(signs(&found), vec!["init"]);
    assert_eq!(&*found[0].site, "core_impl");
}

#[test]
fn test_belong_below_members_still_owns_them() {
    let host = analysis_from_sources(&[(
        "core_impl.lua",
        "function M.early()\nend\n-- @belong Core\nfunction M.init()\nend",
    )]);
    let index = host.symbol_index();

    let inside = signs(&complete(index, "core_impl", "self", '.'));
    assert_eq!(inside, vec!["early", "init"]);

    let resolver = Resolver::new(index).with_active_file("core_impl");
    let raw = chain("self");
    let mapped = resolver.map_chain(&raw);
    assert_eq!(mapped, vec!["Core".to_string()]);
    let result = resolver.resolve_definition(&mapped, &raw, "early");
    assert_eq!(result.symbol().map(|s| &*s.site), Some("core_impl"));
}

#[test]
fn test_reference_chain_registered_before_belong() {
    let hud = format!("{HUD}-- @belong Core\n");
    let host = analysis_from_sources(&[("Widget.lua", WIDGET), ("hud.lua", hud.as_str())]);
    let colon = signs(&complete(host.symbol_index(), "hud", "self.view", ':'));
    assert_eq!(colon, vec!["show", "hide"]);
}

#[test]
fn test_private_members_need_self() {
    let host = analysis_from_sources(&[("player.lua", PLAYER)]);
    let index = host.symbol_index();

    let outside = signs(&complete(index, "enemy", "player", '.'));
    assert!(outside.contains(&"attack".to_string()));
    assert!(!outside.contains(&"recharge".to_string()));

    let inside = signs(&complete(index, "player", "self", '.'));
    assert!(inside.contains(&"recharge".to_string()));
}

#[test]
fn test_alias_resolves_through_belong() {
    let host = analysis_from_sources(&[
        ("bar.lua", "-- @alias Foo\n-- @belong Core\nfunction M.x() end"),
        ("hud.lua", "local M = {}"),
    ]);
    let resolver = Resolver::new(host.symbol_index()).with_active_file("hud");
    assert_eq!(resolver.map_chain(&chain("Foo")), vec!["Core".to_string()]);

    let found = complete(host.symbol_index(), "hud", "Foo", '.');
    assert_eq!(signs(&found), vec!["x"]);
}

#[test]
fn test_reference_chain_overrides_member_lookup() {
    let host = analysis_from_sources(&[("Widget.lua", WIDGET), ("hud.lua", HUD)]);
    let index = host.symbol_index();

    let colon = signs(&complete(index, "hud", "self.view", ':'));
    assert_eq!(colon, vec!["show", "hide"]);

    let dot = signs(&complete(index, "hud", "self.view", '.'));
    assert_eq!(dot, vec!["new"]);
}

#[test]
fn test_bare_word_completion() {
    let host = analysis_from_sources(&[
        ("util.lua", "function printAll()\nend\nlocal function printHidden()\nend"),
        ("hud.lua", "local function printLocal()\nend"),
    ]);
    let resolver = Resolver::new(host.symbol_index()).with_active_file("hud");
    let found = resolver.resolve_for_completion(&[], &[], None, Some("print"));
    assert_eq!(signs(&found), vec!["printLocal", "printAll"]);
    assert!(found.iter().all(|s| s.scope != Some(Scope::Private)));
}

#[test]
fn test_definition_through_alias_modules_setting() {
    let mut host = analysis_from_sources(&[
        ("player.lua", PLAYER),
        ("player_ext.lua", "function M.revive()\nend"),
    ]);
    let mut settings = host.settings().clone();
    settings
        .alias_modules
        .insert("player".to_string(), vec!["player_ext".to_string()]);
    host.set_settings(settings);

    let resolver = Resolver::new(host.symbol_index()).with_active_file("hud");
    let raw = chain("player");
    let result = resolver.resolve_definition(&raw, &raw, "revive");
    assert_eq!(result.symbol().map(|s| &*s.site), Some("player_ext"));
}

#[test]
fn test_globals_live_in_global_bucket() {
    let host = analysis_from_sources(&[("util.lua", "function helper()\nend\nSPEED = 10")]);
    let globals = signs(host.symbol_index().bucket(GLOBAL_BUCKET));
    assert_eq!(globals, vec!["helper", "SPEED"]);
}
