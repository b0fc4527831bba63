//! Lowering of parsed statements into plain values.
//!
//! The indexer never needs a full AST of a declaration; it needs the shape
//! of the right-hand side (a scalar, a nested table, a function literal or a
//! member access) and the assignment target. [`LuaValue`] is that shape.

use std::fmt;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use text_size::TextRange;

use super::ast::{AstNode, Expr, FieldKey, Stmt, compact_text};
use super::syntax_kind::SyntaxKind;

/// Nested table literals deeper than this are kept as raw expressions.
pub const MAX_TABLE_DEPTH: usize = 32;

/// A language-agnostic view of a Lua expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LuaValue {
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
    Identifier(String),
    Vararg,
    Table(Vec<TableEntry>),
    Function {
        name: Option<String>,
        parameters: Vec<String>,
        is_local: bool,
    },
    Member {
        base: String,
        key: String,
        indexer: char,
    },
    /// A call, rendered without whitespace: `Widget.new(1,2)`.
    Call(String),
    /// Anything else, rendered without whitespace.
    Expression(String),
}

/// One field of a table constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    pub key: TableKey,
    pub value: LuaValue,
    /// Range of the key (or of the whole field for positional entries).
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableKey {
    /// Positional entry, 1-based.
    Index(usize),
    Name(String),
    Computed(Box<LuaValue>),
}

impl TableKey {
    /// The key as it appears in a symbol name.
    pub fn sign(&self) -> String {
        match self {
            TableKey::Index(n) => n.to_string(),
            TableKey::Name(name) => name.clone(),
            TableKey::Computed(value) => value.to_string(),
        }
    }
}

/// The assignment target of a declaration statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTarget {
    pub base: Option<String>,
    pub key: String,
    pub indexer: char,
}

/// The first statement of a chunk, lowered.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkValue {
    pub target: Option<AssignTarget>,
    pub value: LuaValue,
}

impl LuaValue {
    pub fn as_table(&self) -> Option<&[TableEntry]> {
        match self {
            LuaValue::Table(entries) => Some(entries),
            _ => None,
        }
    }

    /// A JSON view of the value: positional tables become arrays, keyed
    /// tables objects, scalars their display form.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            LuaValue::Nil => Value::Null,
            LuaValue::Boolean(b) => Value::Bool(*b),
            LuaValue::Number(n) => number_json(*n),
            LuaValue::String(s) => Value::String(s.clone()),
            LuaValue::Table(entries) => {
                if entries.iter().all(|e| matches!(e.key, TableKey::Index(_))) {
                    Value::Array(entries.iter().map(|e| e.value.to_json()).collect())
                } else {
                    Value::Object(
                        entries
                            .iter()
                            .map(|e| (e.key.sign(), e.value.to_json()))
                            .collect(),
                    )
                }
            }
            other => Value::String(other.to_string()),
        }
    }

    /// Tab-indented JSON rendering used for table documentation.
    pub fn to_pretty_json(&self) -> String {
        let mut out = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
        if self.to_json().serialize(&mut serializer).is_err() {
            return self.to_string();
        }
        String::from_utf8(out).unwrap_or_default()
    }
}

fn number_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for LuaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LuaValue::Nil => write!(f, "nil"),
            LuaValue::Boolean(b) => write!(f, "{b}"),
            LuaValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            LuaValue::Number(n) => write!(f, "{n}"),
            LuaValue::String(s) => write!(f, "{s}"),
            LuaValue::Identifier(name) => write!(f, "{name}"),
            LuaValue::Vararg => write!(f, "..."),
            LuaValue::Table(_) => write!(f, "{{...}}"),
            LuaValue::Function { parameters, .. } => {
                write!(f, "function({})", parameters.join(", "))
            }
            LuaValue::Member { base, key, indexer } => write!(f, "{base}{indexer}{key}"),
            LuaValue::Call(text) | LuaValue::Expression(text) => write!(f, "{text}"),
        }
    }
}

// ============================================================================
// Lowering
// ============================================================================

/// Lower a statement into its target and value.
pub fn lower_statement(stmt: &Stmt) -> ChunkValue {
    match stmt {
        Stmt::Local(local) => ChunkValue {
            target: local.names().into_iter().next().map(|key| AssignTarget {
                base: None,
                key,
                indexer: '.',
            }),
            value: first_value(local.values()),
        },
        Stmt::Assign(assign) => ChunkValue {
            target: assign.targets().first().and_then(expr_target),
            value: first_value(assign.values()),
        },
        Stmt::Function(func) => {
            let name = func.name();
            ChunkValue {
                target: name.as_deref().map(split_function_name),
                value: LuaValue::Function {
                    name,
                    parameters: func.params(),
                    is_local: false,
                },
            }
        }
        Stmt::LocalFunction(func) => {
            let name = func.name();
            ChunkValue {
                target: name.clone().map(|key| AssignTarget {
                    base: None,
                    key,
                    indexer: '.',
                }),
                value: LuaValue::Function {
                    name,
                    parameters: func.params(),
                    is_local: true,
                },
            }
        }
        Stmt::Call(call) => ChunkValue {
            target: None,
            value: LuaValue::Call(compact_text(call.syntax())),
        },
        Stmt::Other(node) => ChunkValue {
            target: None,
            value: LuaValue::Expression(compact_text(node)),
        },
    }
}

fn first_value(values: Vec<Expr>) -> LuaValue {
    values
        .first()
        .map(|expr| lower_expr(expr, 0))
        .unwrap_or(LuaValue::Nil)
}

fn expr_target(expr: &Expr) -> Option<AssignTarget> {
    match expr {
        Expr::NameRef(name) => name.name().map(|key| AssignTarget {
            base: None,
            key,
            indexer: '.',
        }),
        Expr::Member(member) => Some(AssignTarget {
            base: member.base().map(|b| compact_text(b.syntax())),
            key: member.key()?,
            indexer: '.',
        }),
        _ => None,
    }
}

/// `a.b:c` → base `a.b`, key `c`, indexer `:`.
fn split_function_name(name: &str) -> AssignTarget {
    match name.rfind(['.', ':']) {
        Some(at) => AssignTarget {
            base: Some(name[..at].to_string()),
            key: name[at + 1..].to_string(),
            indexer: if name[at..].starts_with(':') { ':' } else { '.' },
        },
        None => AssignTarget {
            base: None,
            key: name.to_string(),
            indexer: '.',
        },
    }
}

/// Lower an expression; table nesting deeper than [`MAX_TABLE_DEPTH`] is
/// kept as a raw expression.
pub fn lower_expr(expr: &Expr, depth: usize) -> LuaValue {
    match expr {
        Expr::Literal(literal) => {
            let Some(token) = literal.token() else {
                return LuaValue::Nil;
            };
            match token.kind() {
                SyntaxKind::NUMBER => parse_number(token.text())
                    .map(LuaValue::Number)
                    .unwrap_or_else(|| LuaValue::Expression(token.text().to_string())),
                SyntaxKind::STRING => LuaValue::String(unquote(token.text())),
                SyntaxKind::LONG_STRING => LuaValue::String(long_string_body(token.text())),
                SyntaxKind::TRUE_KW => LuaValue::Boolean(true),
                SyntaxKind::FALSE_KW => LuaValue::Boolean(false),
                _ => LuaValue::Nil,
            }
        }
        Expr::Vararg(_) => LuaValue::Vararg,
        Expr::NameRef(name) => name
            .name()
            .map(LuaValue::Identifier)
            .unwrap_or(LuaValue::Nil),
        Expr::Paren(paren) => paren
            .inner()
            .map(|inner| lower_expr(&inner, depth))
            .unwrap_or(LuaValue::Nil),
        Expr::Table(table) => {
            if depth >= MAX_TABLE_DEPTH {
                return LuaValue::Expression(compact_text(table.syntax()));
            }
            let mut next_index = 0;
            let entries = table
                .fields()
                .map(|field| {
                    let value = field
                        .value()
                        .map(|v| lower_expr(&v, depth + 1))
                        .unwrap_or(LuaValue::Nil);
                    let (key, range) = match field.key() {
                        FieldKey::Positional => {
                            next_index += 1;
                            (TableKey::Index(next_index), field.syntax().text_range())
                        }
                        FieldKey::Named(token) => {
                            (TableKey::Name(token.text().to_string()), token.text_range())
                        }
                        FieldKey::Computed(key) => (
                            TableKey::Computed(Box::new(lower_expr(&key, depth + 1))),
                            key.syntax().text_range(),
                        ),
                    };
                    TableEntry { key, value, range }
                })
                .collect();
            LuaValue::Table(entries)
        }
        Expr::Function(func) => LuaValue::Function {
            name: None,
            parameters: func.params(),
            is_local: false,
        },
        Expr::Member(member) => match (member.base(), member.key()) {
            (Some(base), Some(key)) => LuaValue::Member {
                base: compact_text(base.syntax()),
                key,
                indexer: '.',
            },
            _ => LuaValue::Expression(compact_text(member.syntax())),
        },
        Expr::Call(_) | Expr::MethodCall(_) => LuaValue::Call(compact_text(expr.syntax())),
        Expr::Prefix(prefix) => {
            let operand = prefix.operand().map(|operand| lower_expr(&operand, depth));
            match (prefix.op(), operand) {
                (Some(SyntaxKind::MINUS), Some(LuaValue::Number(n))) => LuaValue::Number(-n),
                _ => LuaValue::Expression(compact_text(prefix.syntax())),
            }
        }
        Expr::Index(_) | Expr::Bin(_) => LuaValue::Expression(compact_text(expr.syntax())),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let lower = text.to_ascii_lowercase();
    match lower.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16).ok().map(|n| n as f64),
        None => lower.parse().ok(),
    }
}

/// Decode a quoted string literal.
fn unquote(text: &str) -> String {
    let inner = text
        .get(1..text.len().saturating_sub(1))
        .unwrap_or_default();
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{7}'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some(d) if d.is_ascii_digit() => {
                let mut code = d.to_digit(10).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(10)) {
                        Some(next) => {
                            code = code * 10 + next;
                            chars.next();
                        }
                        None => break,
                    }
                }
                if let Some(decoded) = char::from_u32(code) {
                    out.push(decoded);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Body of a `[==[ ... ]==]` string; a newline right after the opener is dropped.
fn long_string_body(text: &str) -> String {
    let level = text[1..].chars().take_while(|&c| c == '=').count();
    let open = level + 2;
    let body = text
        .get(open..text.len().saturating_sub(open))
        .unwrap_or_default();
    body.strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body)
        .to_string()
}
