//! Classifier behaviour over realistic lines.

use luasense::Document;
use luasense::hir::{Classified, SymbolKind, SymbolType, TagComment, classify_line};
use rstest::rstest;

fn classify(text: &str) -> Classified {
    classify_line(&Document::new("scripts/player.lua", text), 0)
}

fn rule_name(classified: &Classified) -> &'static str {
    match classified {
        Classified::NoMatch => "none",
        Classified::Function(_) => "function",
        Classified::Args(_) => "args",
        Classified::Variable(_) => "variable",
        Classified::Tag(TagComment::Belong(_)) => "belong",
        Classified::Tag(TagComment::Type { .. }) => "type",
        Classified::Tag(TagComment::UnityType { .. }) => "unity.type",
        Classified::Tag(TagComment::Alias(_)) => "alias",
    }
}

#[rstest]
#[case("function M.attack(self)", "function")]
#[case("M.onClick = function(btn)", "function")]
#[case("local helper = function()", "function")]
#[case("M.args = { ok = UI.Button }", "args")]
#[case("M.MAX_HP = 100", "variable")]
#[case("local count = 0", "variable")]
#[case("SPEED = 10", "variable")]
#[case("-- @belong Core", "belong")]
#[case("-- @alias Foo", "alias")]
#[case("-- @type Widget\nlocal w = nil", "type")]
#[case("-- @unity.type UnityEngine.GameObject\nlocal go = nil", "unity.type")]
#[case("-- plain comment", "none")]
#[case("print('hello')", "none")]
#[case("", "none")]
fn test_each_line_matches_one_rule(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(rule_name(&classify(source)), expected);
}

#[test]
fn test_function_wins_over_variable() {
    // `M.f = function(` also has the shape of a member constant.
    let Classified::Function(decl) = classify("M.f = function(a)") else {
        panic!("expected function");
    };
    assert_eq!(decl.symbol.ty, Some(SymbolType::Function));
}

#[test]
fn test_indented_locals_are_not_declarations() {
    assert!(matches!(classify("    local tmp = 1"), Classified::NoMatch));
    assert!(matches!(classify("    GLOBAL = 1"), Classified::NoMatch));
}

#[test]
fn test_self_member_variable_inside_body() {
    let Classified::Variable(decl) = classify("    self.hp = 100") else {
        panic!("expected variable");
    };
    assert_eq!(decl.symbol.kind, SymbolKind::Field);
    assert_eq!(decl.symbol.ty, Some(SymbolType::MemberVariable));
    assert_eq!(decl.symbol.base.as_deref(), Some("self"));
}

#[test]
fn test_table_value_expands_children() {
    let doc = Document::new(
        "config.lua",
        crate::helpers::source_fixtures::CONFIG,
    );
    let Classified::Variable(decl) = classify_line(&doc, 0) else {
        panic!("expected variable");
    };
    let colors = decl.symbol;
    assert_eq!(colors.kind, SymbolKind::Table);
    let children: Vec<&str> = colors.children.iter().map(|c| &*c.sign).collect();
    assert_eq!(children, vec!["red", "green", "nested"]);

    assert_eq!(colors.children[0].detail.as_deref(), Some("    -- primary red"));
    assert_eq!(colors.children[0].documentation.as_deref(), Some("red: 16711680"));
    assert_eq!(colors.children[2].children.len(), 1);
    assert_eq!(&*colors.children[2].children[0].sign, "deep");
}
