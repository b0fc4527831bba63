//! Chunk window widening and value lowering.

use luasense::Document;
use luasense::parser::{LuaValue, TableKey, parse_chunk_at};
use rstest::rstest;

#[test]
fn test_window_widens_until_table_closes() {
    let doc = Document::new(
        "config.lua",
        "local Items = {\n    sword = 10,\n    shield = { weight = 4 },\n}\nprint(Items)",
    );
    let chunk = parse_chunk_at(&doc, 0).expect("table parses");
    assert_eq!(chunk.start_line, 0);
    assert_eq!(chunk.lines.len(), 4);

    let entries = chunk.value.value.as_table().expect("table value");
    let keys: Vec<String> = entries.iter().map(|e| e.key.sign()).collect();
    assert_eq!(keys, vec!["sword", "shield"]);
    assert!(entries[1].value.as_table().is_some());

    let position = chunk.position(entries[1].range.start());
    assert_eq!((position.line, position.column), (2, 4));
}

#[test]
fn test_window_starting_mid_document() {
    let doc = Document::new("a.lua", "x = 1\nlocal f = function(a, b)\n    return a + b\nend");
    let chunk = parse_chunk_at(&doc, 1).expect("function literal parses");
    assert_eq!(chunk.start_line, 1);
    assert_eq!(chunk.lines.len(), 3);
    match &chunk.value.value {
        LuaValue::Function { parameters, .. } => assert_eq!(parameters, &vec!["a".to_string(), "b".to_string()]),
        other => panic!("expected function, got {other:?}"),
    }
}

#[test]
fn test_unterminated_window_is_none() {
    let doc = Document::new("a.lua", "local t = {\n    a = 1,");
    assert!(parse_chunk_at(&doc, 0).is_none());
}

#[rstest]
#[case("local a = 42", LuaValue::Number(42.0))]
#[case("local a = -3", LuaValue::Number(-3.0))]
#[case("local a = 0x10", LuaValue::Number(16.0))]
#[case("local a = 'hi'", LuaValue::String("hi".to_string()))]
#[case("local a = [[long]]", LuaValue::String("long".to_string()))]
#[case("local a = true", LuaValue::Boolean(true))]
#[case("local a = nil", LuaValue::Nil)]
#[case("local a = other", LuaValue::Identifier("other".to_string()))]
fn test_scalar_values(#[case] source: &str, #[case] expected: LuaValue) {
    let doc = Document::new("a.lua", source);
    let chunk = parse_chunk_at(&doc, 0).expect("scalar parses");
    assert_eq!(chunk.value.value, expected);
}

#[test]
fn test_positional_keys_are_one_based() {
    let doc = Document::new("a.lua", "local list = { 'a', 'b', [10] = 'c' }");
    let chunk = parse_chunk_at(&doc, 0).expect("table parses");
    let entries = chunk.value.value.as_table().expect("table value");
    assert_eq!(entries[0].key, TableKey::Index(1));
    assert_eq!(entries[1].key, TableKey::Index(2));
    assert!(matches!(entries[2].key, TableKey::Computed(_)));
}

#[test]
fn test_table_renders_as_json() {
    let doc = Document::new("a.lua", "local t = { name = 'x', list = { 1, 2 } }");
    let chunk = parse_chunk_at(&doc, 0).expect("table parses");
    let json = chunk.value.value.to_json();
    assert_eq!(json["name"], "x");
    assert_eq!(json["list"], serde_json::json!([1, 2]));
}
