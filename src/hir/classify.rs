//! Line signature classification.
//!
//! Each line of a document is matched against an ordered list of pure rules.
//! The first rule that claims the line wins:
//!
//! 1. function declaration
//! 2. args table (`M.args = {...}`)
//! 3. variable declaration
//! 4. `-- @belong`
//! 5. `-- @type`
//! 6. `-- @unity.type`
//! 7. `-- @alias`
//!
//! Rules only look at the leading tokens of a line (and, for tags, at the
//! next line). Multi-line values go through the chunk parser.

use std::sync::Arc;

use super::symbols::{HirSymbol, Indexer, Scope, SymbolKind, SymbolType, is_self_name};
use crate::base::{Document, Span};
use crate::parser::{Chunk, LuaValue, SyntaxKind, TableEntry, Token, parse_chunk_at, significant_tokens};

// ============================================================================
// Markers
// ============================================================================

pub const BELONG_MARKER: &str = "-- @belong";
pub const TYPE_MARKER: &str = "-- @type";
pub const UNITY_TYPE_MARKER: &str = "-- @unity.type";
pub const ALIAS_MARKER: &str = "-- @alias";
pub const PRIVATE_MARKER: &str = "-- @private";
pub const ARGS_MARKER: &str = "M.args = ";

/// Variable rules see at most this many tokens.
const VARIABLE_TOKEN_LIMIT: usize = 5;

/// Engine type for an args field declared with `type_name`.
pub fn args_native_type(type_name: &str) -> &'static str {
    match type_name {
        "Button" => "UnityEngine.UI.Button",
        "Image" => "UnityEngine.UI.Image",
        "Text" => "UnityEngine.UI.Text",
        _ => "UnityEngine.GameObject",
    }
}

// ============================================================================
// Results
// ============================================================================

/// Outcome of classifying one line.
#[derive(Clone, Debug, PartialEq)]
pub enum Classified {
    NoMatch,
    Function(Declaration),
    /// Fields of an args table. Empty when the table did not parse.
    Args(Vec<ArgsField>),
    Variable(Declaration),
    Tag(TagComment),
}

/// How a declaration was written, which decides its owning bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclForm {
    Member,
    Local,
    Global,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub symbol: HirSymbol,
    pub form: DeclForm,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArgsField {
    pub symbol: HirSymbol,
    pub native_type: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagComment {
    /// `-- @belong Core`
    Belong(String),
    /// `-- @type Widget` above an assignment.
    Type { reference: String, target: TagTarget },
    /// `-- @unity.type UnityEngine.GameObject` above an assignment.
    UnityType { engine_type: String, target: TagTarget },
    /// `-- @alias Foo`
    Alias(String),
}

/// The assignment a tag comment annotates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagTarget {
    /// `None` for `local key =` and `key =` forms.
    pub base: Option<String>,
    pub key: String,
}

// ============================================================================
// Entry point
// ============================================================================

/// Classify line `line` of `document`.
pub fn classify_line(document: &Document, line: usize) -> Classified {
    let text = document.line(line);
    if text.is_empty() {
        return Classified::NoMatch;
    }

    if let Some(decl) = function_declaration(document, line) {
        return Classified::Function(decl);
    }
    if let Some(fields) = args_table(document, line) {
        return Classified::Args(fields);
    }
    if let Some(decl) = variable_declaration(document, line) {
        return Classified::Variable(decl);
    }

    let tag_rules: [fn(&Document, usize) -> Option<TagComment>; 4] =
        [belong_tag, type_tag, unity_type_tag, alias_tag];
    tag_rules
        .iter()
        .find_map(|rule| rule(document, line))
        .map(Classified::Tag)
        .unwrap_or(Classified::NoMatch)
}

// ============================================================================
// Documentation
// ============================================================================

/// The contiguous `--` lines directly above `line`, oldest first.
///
/// Stops at an empty line or at a line without `--`.
pub fn doc_block(document: &Document, line: usize) -> Option<String> {
    let mut lines = Vec::new();
    let mut index = line;
    while index > 0 {
        let prev = document.line(index - 1);
        if prev.is_empty() || !prev.contains("--") {
            break;
        }
        lines.push(prev);
        index -= 1;
    }

    if lines.is_empty() {
        return None;
    }
    lines.reverse();
    Some(lines.join("\n"))
}

fn scope_for(documentation: Option<&str>, scope: Scope) -> Scope {
    match documentation {
        Some(doc) if doc.contains(PRIVATE_MARKER) => Scope::Private,
        _ => scope,
    }
}

// ============================================================================
// Token helpers
// ============================================================================

fn text_at<'a>(tokens: &'a [Token<'_>], index: usize) -> Option<&'a str> {
    tokens.get(index).map(|t| t.text)
}

fn is(tokens: &[Token<'_>], index: usize, text: &str) -> bool {
    text_at(tokens, index) == Some(text)
}

fn is_name(tokens: &[Token<'_>], index: usize) -> bool {
    tokens.get(index).is_some_and(|t| t.kind == SyntaxKind::IDENT)
}

fn indexer_at(tokens: &[Token<'_>], index: usize) -> Option<Indexer> {
    text_at(tokens, index).and_then(Indexer::from_text)
}

fn at_line_start(tokens: &[Token<'_>], index: usize) -> bool {
    tokens.get(index).is_some_and(|t| t.column() == 0)
}

/// The first few tokens of a line, up to and including the first `=`.
fn variable_tokens(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for token in significant_tokens(line) {
        let is_eq = token.kind == SyntaxKind::EQ;
        tokens.push(token);
        if is_eq || tokens.len() >= VARIABLE_TOKEN_LIMIT {
            break;
        }
    }
    tokens
}

// ============================================================================
// Rule 1: function declarations
// ============================================================================

struct FunctionShape {
    form: DeclForm,
    base: Option<usize>,
    indexer: Option<Indexer>,
    name: usize,
}

fn function_shape(tokens: &[Token<'_>]) -> Option<FunctionShape> {
    // function base.name(   at column 0
    if is(tokens, 0, "function")
        && at_line_start(tokens, 0)
        && is_name(tokens, 1)
        && indexer_at(tokens, 2).is_some()
        && is_name(tokens, 3)
        && !is(tokens, 3, "ctor")
        && is(tokens, 4, "(")
    {
        return Some(FunctionShape {
            form: DeclForm::Member,
            base: Some(1),
            indexer: indexer_at(tokens, 2),
            name: 3,
        });
    }
    // function name(
    if is(tokens, 0, "function") && is_name(tokens, 1) && is(tokens, 2, "(") {
        return Some(FunctionShape {
            form: DeclForm::Global,
            base: None,
            indexer: None,
            name: 1,
        });
    }
    // local function name(
    if is(tokens, 0, "local")
        && is(tokens, 1, "function")
        && is_name(tokens, 2)
        && is(tokens, 3, "(")
    {
        return Some(FunctionShape {
            form: DeclForm::Local,
            base: None,
            indexer: None,
            name: 2,
        });
    }
    // base.name = function(
    if is_name(tokens, 0)
        && indexer_at(tokens, 1).is_some()
        && is_name(tokens, 2)
        && !is(tokens, 2, "ctor")
        && is(tokens, 3, "=")
        && is(tokens, 4, "function")
        && is(tokens, 5, "(")
    {
        return Some(FunctionShape {
            form: DeclForm::Member,
            base: Some(0),
            indexer: indexer_at(tokens, 1),
            name: 2,
        });
    }
    // local name = function(
    if is(tokens, 0, "local")
        && is_name(tokens, 1)
        && is(tokens, 2, "=")
        && is(tokens, 3, "function")
        && is(tokens, 4, "(")
    {
        return Some(FunctionShape {
            form: DeclForm::Local,
            base: None,
            indexer: None,
            name: 1,
        });
    }
    None
}

fn function_declaration(document: &Document, line: usize) -> Option<Declaration> {
    let text = document.line(line);
    if !text.contains("function") {
        return None;
    }

    let tokens = significant_tokens(text);
    let shape = function_shape(&tokens)?;
    let name = &tokens[shape.name];

    let documentation = doc_block(document, line);
    let scope = match shape.form {
        DeclForm::Member => Scope::Member,
        DeclForm::Local => Scope::Local,
        DeclForm::Global => Scope::Global,
    };

    let mut symbol = HirSymbol::new(name.text, document.module().clone(), SymbolKind::Method)
        .with_scope(scope_for(documentation.as_deref(), scope))
        .with_detail(text);
    symbol.base = shape.base.map(|i| Arc::from(tokens[i].text));
    symbol.indexer = shape.indexer.unwrap_or_default();
    symbol.ty = Some(SymbolType::Function);
    symbol.documentation = documentation.map(Arc::from);
    symbol.span = Some(Span::declaration(line, name.column()));
    symbol.uri = Some(document.uri().clone());

    Some(Declaration {
        symbol,
        form: shape.form,
    })
}

// ============================================================================
// Rule 2: args tables
// ============================================================================

fn args_table(document: &Document, line: usize) -> Option<Vec<ArgsField>> {
    if !document.line(line).contains(ARGS_MARKER) {
        return None;
    }

    let Some(chunk) = parse_chunk_at(document, line) else {
        return Some(Vec::new());
    };
    let Some(entries) = chunk.value.value.as_table() else {
        return Some(Vec::new());
    };

    let fields = entries
        .iter()
        .map(|entry| {
            let position = chunk.position(entry.range.start());
            let mut symbol = HirSymbol::new(
                format!("_{}", entry.key.sign()),
                document.module().clone(),
                SymbolKind::Field,
            )
            .with_scope(Scope::Member)
            .with_detail("Args");
            symbol.span = Some(Span::declaration(position.line, position.column));
            symbol.uri = Some(document.uri().clone());

            let type_name = match &entry.value {
                LuaValue::Member { key, .. } => key.as_str(),
                LuaValue::Identifier(name) | LuaValue::String(name) => name.as_str(),
                _ => "",
            };
            ArgsField {
                symbol,
                native_type: args_native_type(type_name),
            }
        })
        .collect();

    Some(fields)
}

// ============================================================================
// Rule 3: variable declarations
// ============================================================================

fn variable_declaration(document: &Document, line: usize) -> Option<Declaration> {
    let text = document.line(line);
    let tokens = variable_tokens(text);

    let member_assign = is(&tokens, 1, ".") && is_name(&tokens, 2) && is(&tokens, 3, "=");

    let (form, base, name, ty, kind, expands) = if member_assign && at_line_start(&tokens, 0) {
        (
            DeclForm::Member,
            Some(0),
            2,
            SymbolType::ConstantVariable,
            SymbolKind::Constant,
            true,
        )
    } else if member_assign && text_at(&tokens, 0).is_some_and(is_self_name) {
        (
            DeclForm::Member,
            Some(0),
            2,
            SymbolType::MemberVariable,
            SymbolKind::Field,
            false,
        )
    } else if is(&tokens, 0, "local")
        && at_line_start(&tokens, 0)
        && is_name(&tokens, 1)
        && is(&tokens, 2, "=")
    {
        (
            DeclForm::Local,
            None,
            1,
            SymbolType::LocalVariable,
            SymbolKind::Variable,
            true,
        )
    } else if is_name(&tokens, 0) && at_line_start(&tokens, 0) && is(&tokens, 1, "=") {
        (
            DeclForm::Global,
            None,
            0,
            SymbolType::GlobalVariable,
            SymbolKind::Interface,
            true,
        )
    } else {
        return None;
    };

    let scope = match form {
        DeclForm::Member => Scope::Member,
        DeclForm::Local => Scope::Local,
        DeclForm::Global => Scope::Global,
    };
    let documentation = doc_block(document, line);
    let name_token = &tokens[name];

    let mut symbol = HirSymbol::new(name_token.text, document.module().clone(), kind)
        .with_scope(scope_for(documentation.as_deref(), scope))
        .with_detail(text);
    symbol.base = base.map(|i| Arc::from(tokens[i].text));
    symbol.ty = Some(ty);
    symbol.documentation = documentation.map(Arc::from);
    symbol.span = Some(Span::declaration(line, name_token.column()));
    symbol.uri = Some(document.uri().clone());

    let chunk = if expands {
        parse_chunk_at(document, line)
    } else {
        None
    };
    if let Some(chunk) = chunk {
        if let Some(entries) = chunk.value.value.as_table() {
            symbol.children = table_children(document, &chunk, entries);
            symbol.kind = SymbolKind::Table;
            symbol.sub_type = Some(SymbolType::Table);
            symbol.documentation = Some(Arc::from(chunk.lines.join("\n")));
        }
    }

    Some(Declaration { symbol, form })
}

/// Child records for the fields of a table literal.
fn table_children(document: &Document, chunk: &Chunk, entries: &[TableEntry]) -> Vec<HirSymbol> {
    entries
        .iter()
        .map(|entry| {
            let sign = entry.key.sign();
            let position = chunk.position(entry.range.start());

            let mut child = HirSymbol::new(sign.as_str(), document.module().clone(), SymbolKind::Constant);
            child.span = Some(Span::declaration(position.line, position.column));
            child.uri = Some(document.uri().clone());
            child.detail = doc_block(document, position.line).map(Arc::from);

            match entry.value.as_table() {
                Some(nested) => {
                    child.children = table_children(document, chunk, nested);
                    child.sub_type = Some(SymbolType::Table);
                    child.documentation = Some(Arc::from(entry.value.to_pretty_json()));
                }
                None => {
                    child.documentation = Some(Arc::from(format!("{sign}: {}", entry.value)));
                }
            }
            child
        })
        .collect()
}

// ============================================================================
// Rules 4-7: tag comments
// ============================================================================

/// Text after `marker`, trimmed; `None` when the marker is absent or the
/// argument is empty.
fn tag_argument<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let at = line.find(marker)?;
    let rest = line[at + marker.len()..].trim();
    (!rest.is_empty()).then_some(rest)
}

/// The assignment target written on `line`.
pub fn tag_target(line: &str) -> Option<TagTarget> {
    let tokens = variable_tokens(line);

    if is(&tokens, 0, "local") && is_name(&tokens, 1) && is(&tokens, 2, "=") {
        return Some(TagTarget {
            base: None,
            key: tokens[1].text.to_string(),
        });
    }
    if is_name(&tokens, 0) && indexer_at(&tokens, 1).is_some() && is_name(&tokens, 2) {
        return Some(TagTarget {
            base: Some(tokens[0].text.to_string()),
            key: tokens[2].text.to_string(),
        });
    }
    if is_name(&tokens, 0) && is(&tokens, 1, "=") {
        return Some(TagTarget {
            base: None,
            key: tokens[0].text.to_string(),
        });
    }
    None
}

fn belong_tag(document: &Document, line: usize) -> Option<TagComment> {
    tag_argument(document.line(line), BELONG_MARKER).map(|name| TagComment::Belong(name.to_string()))
}

fn type_tag(document: &Document, line: usize) -> Option<TagComment> {
    let reference = tag_argument(document.line(line), TYPE_MARKER)?;
    let target = tag_target(document.line(line + 1))?;
    Some(TagComment::Type {
        reference: reference.to_string(),
        target,
    })
}

fn unity_type_tag(document: &Document, line: usize) -> Option<TagComment> {
    let engine_type = tag_argument(document.line(line), UNITY_TYPE_MARKER)?;
    let target = tag_target(document.line(line + 1))?;
    Some(TagComment::UnityType {
        engine_type: engine_type.to_string(),
        target,
    })
}

fn alias_tag(document: &Document, line: usize) -> Option<TagComment> {
    tag_argument(document.line(line), ALIAS_MARKER).map(|name| TagComment::Alias(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str, line: usize) -> Classified {
        classify_line(&Document::new("scripts/player.lua", text), line)
    }

    fn declaration(classified: Classified) -> Declaration {
        match classified {
            Classified::Function(decl) | Classified::Variable(decl) => decl,
            other => panic!("expected a declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_member_function_declaration() {
        let decl = declaration(classify("function M:attack(target)", 0));
        assert_eq!(decl.form, DeclForm::Member);
        assert_eq!(&*decl.symbol.sign, "attack");
        assert_eq!(decl.symbol.base.as_deref(), Some("M"));
        assert_eq!(decl.symbol.indexer, Indexer::Colon);
        assert_eq!(decl.symbol.span, Some(Span::declaration(0, 11)));
        assert_eq!(decl.symbol.detail.as_deref(), Some("function M:attack(target)"));
    }

    #[test]
    fn test_function_forms() {
        assert_eq!(declaration(classify("function helper()", 0)).form, DeclForm::Global);
        assert_eq!(declaration(classify("local function helper()", 0)).form, DeclForm::Local);
        assert_eq!(declaration(classify("local helper = function()", 0)).form, DeclForm::Local);
        let assigned = declaration(classify("  M.onClick = function(btn)", 0));
        assert_eq!(assigned.form, DeclForm::Member);
        assert_eq!(&*assigned.symbol.sign, "onClick");
    }

    #[test]
    fn test_ctor_is_not_a_function_declaration() {
        assert!(!matches!(classify("function M:ctor()", 0), Classified::Function(_)));
    }

    #[test]
    fn test_documentation_and_private_scope() {
        let text = "local x = 1\n\n-- Deals damage.\n-- @private\nfunction M.hit()";
        let decl = declaration(classify(text, 4));
        assert_eq!(decl.symbol.scope, Some(Scope::Private));
        assert_eq!(decl.symbol.documentation.as_deref(), Some("-- Deals damage.\n-- @private"));
    }

    #[test]
    fn test_member_constant_table_expands_children() {
        let text = "M.Colors = {\n    -- warm\n    red = 1,\n    list = { 'a' },\n}";
        let decl = declaration(classify(text, 0));
        let symbol = decl.symbol;
        assert_eq!(symbol.kind, SymbolKind::Table);
        assert_eq!(symbol.sub_type, Some(SymbolType::Table));
        assert_eq!(symbol.children.len(), 2);

        let red = &symbol.children[0];
        assert_eq!(&*red.sign, "red");
        assert_eq!(red.documentation.as_deref(), Some("red: 1"));
        assert_eq!(red.detail.as_deref(), Some("    -- warm"));
        assert_eq!(red.span, Some(Span::declaration(2, 4)));

        let list = &symbol.children[1];
        assert_eq!(&*list.children[0].sign, "1");
        assert_eq!(list.documentation.as_deref(), Some("[\n\t\"a\"\n]"));
    }

    #[test]
    fn test_member_variable_requires_indent() {
        let decl = declaration(classify("    self.hp = 10", 0));
        assert_eq!(decl.symbol.ty, Some(SymbolType::MemberVariable));
        assert_eq!(decl.symbol.kind, SymbolKind::Field);

        let constant = declaration(classify("M.MAX = 10", 0));
        assert_eq!(constant.symbol.ty, Some(SymbolType::ConstantVariable));
    }

    #[test]
    fn test_args_table_fields() {
        let text = "M.args = {\n    ok = UI.Button,\n    icon = \"Image\",\n    root = GameObject,\n}";
        let Classified::Args(fields) = classify(text, 0) else {
            panic!("expected args");
        };
        let signs: Vec<_> = fields.iter().map(|f| f.symbol.sign.to_string()).collect();
        assert_eq!(signs, vec!["_ok", "_icon", "_root"]);
        assert_eq!(fields[0].native_type, "UnityEngine.UI.Button");
        assert_eq!(fields[1].native_type, "UnityEngine.UI.Image");
        assert_eq!(fields[2].native_type, "UnityEngine.GameObject");
        assert_eq!(fields[0].symbol.detail.as_deref(), Some("Args"));
    }

    #[test]
    fn test_unparseable_args_table_still_claims_line() {
        assert_eq!(classify("M.args = {", 0), Classified::Args(Vec::new()));
    }

    #[test]
    fn test_type_tag_reads_next_line() {
        let text = "-- @type Widget\nlocal w = Widget.new()";
        assert_eq!(
            classify(text, 0),
            Classified::Tag(TagComment::Type {
                reference: "Widget".to_string(),
                target: TagTarget {
                    base: None,
                    key: "w".to_string(),
                },
            })
        );
    }

    #[test]
    fn test_type_tag_without_target_is_not_claimed() {
        assert_eq!(classify("-- @type Widget\n", 0), Classified::NoMatch);
    }

    #[test]
    fn test_empty_belong_is_not_claimed() {
        assert_eq!(classify("-- @belong   ", 0), Classified::NoMatch);
        assert_eq!(
            classify("-- @belong Core", 0),
            Classified::Tag(TagComment::Belong("Core".to_string()))
        );
    }

    #[test]
    fn test_doc_block_stops_at_code() {
        let doc = Document::new("a.lua", "x = 1\n-- one\n-- two\nfunction f()");
        assert_eq!(doc_block(&doc, 3).as_deref(), Some("-- one\n-- two"));
        assert_eq!(doc_block(&doc, 0), None);
    }
}
