//! Symbol records stored in the index.

use std::sync::Arc;

use crate::base::Span;

/// A declaration found by the line classifier, or a synthesized member
/// (args fields, native catalog entries).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HirSymbol {
    /// The symbol's own name. Unique together with `site` inside a bucket.
    pub sign: Arc<str>,
    /// The prefix the symbol hangs off (`M`, `self`, a table name).
    pub base: Option<Arc<str>>,
    /// Module that defines the symbol (file basename without extension).
    pub site: Arc<str>,
    /// Visibility. Table children carry no scope.
    pub scope: Option<Scope>,
    /// Operator used to reach the symbol from its base.
    pub indexer: Indexer,
    pub kind: SymbolKind,
    pub ty: Option<SymbolType>,
    pub sub_type: Option<SymbolType>,
    pub detail: Option<Arc<str>>,
    /// Comment block, literal source lines or a rendered value.
    pub documentation: Option<Arc<str>>,
    /// Defining span: name column through the start of the next line.
    pub span: Option<Span>,
    /// Document the symbol was found in.
    pub uri: Option<Arc<str>>,
    /// Nested records for table literal values, in field order.
    pub children: Vec<HirSymbol>,
}

impl HirSymbol {
    /// A bare record with `.` indexer and no scope.
    pub fn new(sign: impl Into<Arc<str>>, site: impl Into<Arc<str>>, kind: SymbolKind) -> Self {
        Self {
            sign: sign.into(),
            base: None,
            site: site.into(),
            scope: None,
            indexer: Indexer::Dot,
            kind,
            ty: None,
            sub_type: None,
            detail: None,
            documentation: None,
            span: None,
            uri: None,
            children: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_member(&self) -> bool {
        self.scope == Some(Scope::Member)
    }

    pub fn is_private(&self) -> bool {
        self.scope == Some(Scope::Private)
    }

    pub fn is_local(&self) -> bool {
        self.scope == Some(Scope::Local)
    }

    /// Whether member access through `raw_base` may see this record.
    ///
    /// Private records are only reachable from inside their module, which
    /// is spelled `self`, `M` or `_M`.
    pub fn is_visible_member(&self, raw_base: Option<&str>) -> bool {
        self.is_member() || (self.is_private() && raw_base.is_some_and(is_self_name))
    }

    /// Find a direct child by sign.
    pub fn child(&self, sign: &str) -> Option<&HirSymbol> {
        self.children.iter().find(|c| &*c.sign == sign)
    }
}

/// `self`, `M` and `_M` all name the enclosing module.
pub fn is_self_name(name: &str) -> bool {
    matches!(name, "self" | "M" | "_M")
}

/// Visibility of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Public,
    Private,
    Member,
    Local,
    Global,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Public => "public",
            Scope::Private => "private",
            Scope::Member => "member",
            Scope::Local => "local",
            Scope::Global => "global",
        }
    }
}

/// Access operator between a base and its member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Indexer {
    #[default]
    Dot,
    Colon,
}

impl Indexer {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Indexer::Dot),
            ':' => Some(Indexer::Colon),
            _ => None,
        }
    }

    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "." => Some(Indexer::Dot),
            ":" => Some(Indexer::Colon),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Indexer::Dot => '.',
            Indexer::Colon => ':',
        }
    }
}

/// Coarse category of a symbol, as shown by editors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Lua function declaration.
    Method,
    /// Native engine method.
    Function,
    Field,
    Variable,
    /// Table literal with children.
    Table,
    /// Global variable.
    Interface,
    Constant,
}

impl SymbolKind {
    /// The LSP `CompletionItemKind` number for this kind.
    pub fn to_lsp(&self) -> u32 {
        match self {
            SymbolKind::Method => 2,
            SymbolKind::Function => 3,
            SymbolKind::Field => 5,
            SymbolKind::Variable => 6,
            SymbolKind::Table => 7,
            SymbolKind::Interface => 8,
            SymbolKind::Constant => 21,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            SymbolKind::Method => "Method",
            SymbolKind::Function => "Function",
            SymbolKind::Field => "Field",
            SymbolKind::Variable => "Variable",
            SymbolKind::Table => "Table",
            SymbolKind::Interface => "Global",
            SymbolKind::Constant => "Constant",
        }
    }
}

/// Semantic hint attached to a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolType {
    Function,
    ConstantVariable,
    MemberVariable,
    LocalVariable,
    GlobalVariable,
    Table,
}

impl SymbolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolType::Function => "function",
            SymbolType::ConstantVariable => "constant_variable",
            SymbolType::MemberVariable => "member_variable",
            SymbolType::LocalVariable => "local_variable",
            SymbolType::GlobalVariable => "global_variable",
            SymbolType::Table => "table",
        }
    }
}
