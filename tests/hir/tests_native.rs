//! Native engine member lookup through args tables and type tags.

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::PANEL;

#[test]
fn test_args_field_gets_engine_methods() {
    let host = analysis_from_sources(&[("ui/panel.lua", PANEL)]);
    let methods = complete(host.symbol_index(), "panel", "self._ok", ':');
    let methods = signs(&methods);
    assert!(methods.contains(&"OnPointerClick".to_string()));
    assert!(methods.contains(&"GetComponent".to_string()));
}

#[test]
fn test_args_field_gets_engine_properties() {
    let host = analysis_from_sources(&[("ui/panel.lua", PANEL)]);
    let props = complete(host.symbol_index(), "panel", "self._icon", '.');
    let props = signs(&props);
    assert!(props.contains(&"sprite".to_string()));
    assert!(props.contains(&"color".to_string()));
    assert!(props.contains(&"name".to_string()));
}

#[test]
fn test_inherited_sign_appears_once() {
    let host = analysis_from_sources(&[("ui/panel.lua", PANEL)]);
    let methods = complete(host.symbol_index(), "panel", "self._icon", ':');
    let count = methods.iter().filter(|m| &*m.sign == "SetNativeSize").count();
    assert_eq!(count, 1);
}

#[test]
fn test_unity_type_tag_binds_local() {
    let source = "-- @unity.type UnityEngine.Transform\nlocal root = nil\n";
    let host = analysis_from_sources(&[("ui/menu.lua", source)]);
    let props = complete(host.symbol_index(), "menu", "root", '.');
    assert!(signs(&props).contains(&"localPosition".to_string()));
}

#[test]
fn test_unknown_engine_type_has_no_members() {
    let source = "-- @unity.type Game.Custom\nlocal thing = nil\n";
    let host = analysis_from_sources(&[("menu.lua", source)]);
    assert!(complete(host.symbol_index(), "menu", "thing", '.').is_empty());
}
