//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Only the constructs the indexer lowers get dedicated wrappers; other
//! statements are reachable through [`Stmt::Other`].

use super::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// ============================================================================
// Token helpers
// ============================================================================

/// Direct IDENT tokens of a node, in source order.
fn ident_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::IDENT)
}

fn first_ident(node: &SyntaxNode) -> Option<String> {
    ident_tokens(node).next().map(|t| t.text().to_string())
}

/// Non-trivia text of a node with whitespace and comments removed.
pub fn compact_text(node: &SyntaxNode) -> String {
    let mut out = String::new();
    let mut prev_word = false;
    for token in node
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
    {
        let word = matches!(token.kind(), SyntaxKind::IDENT | SyntaxKind::NUMBER)
            || token.kind().is_keyword();
        // Two adjacent words need a separator to stay readable.
        if word && prev_word {
            out.push(' ');
        }
        out.push_str(token.text());
        prev_word = word;
    }
    out
}

/// Parameter names (including `...`) of a function body.
fn param_names(node: &SyntaxNode) -> Vec<String> {
    node.children()
        .find(|child| child.kind() == SyntaxKind::PARAM_LIST)
        .map(|list| {
            list.children_with_tokens()
                .filter_map(|element| element.into_token())
                .filter(|t| matches!(t.kind(), SyntaxKind::IDENT | SyntaxKind::DOT_DOT_DOT))
                .map(|t| t.text().to_string())
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0
            .children()
            .filter(|child| child.kind() == SyntaxKind::BLOCK)
            .flat_map(|block| block.children().filter_map(Stmt::cast))
    }
}

ast_node!(Block, BLOCK);

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

// ============================================================================
// Statements
// ============================================================================

/// Any statement inside a block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Local(LocalStmt),
    LocalFunction(LocalFunctionStmt),
    Function(FunctionStmt),
    Assign(AssignStmt),
    Call(CallStmt),
    Other(SyntaxNode),
}

impl AstNode for Stmt {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::LOCAL_STMT
                | SyntaxKind::LOCAL_FUNCTION_STMT
                | SyntaxKind::FUNCTION_STMT
                | SyntaxKind::ASSIGN_STMT
                | SyntaxKind::CALL_STMT
                | SyntaxKind::DO_STMT
                | SyntaxKind::WHILE_STMT
                | SyntaxKind::REPEAT_STMT
                | SyntaxKind::IF_STMT
                | SyntaxKind::NUMERIC_FOR_STMT
                | SyntaxKind::GENERIC_FOR_STMT
                | SyntaxKind::RETURN_STMT
                | SyntaxKind::BREAK_STMT
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::LOCAL_STMT => Some(Self::Local(LocalStmt(node))),
            SyntaxKind::LOCAL_FUNCTION_STMT => Some(Self::LocalFunction(LocalFunctionStmt(node))),
            SyntaxKind::FUNCTION_STMT => Some(Self::Function(FunctionStmt(node))),
            SyntaxKind::ASSIGN_STMT => Some(Self::Assign(AssignStmt(node))),
            SyntaxKind::CALL_STMT => Some(Self::Call(CallStmt(node))),
            kind if Self::can_cast(kind) => Some(Self::Other(node)),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Local(n) => n.syntax(),
            Self::LocalFunction(n) => n.syntax(),
            Self::Function(n) => n.syntax(),
            Self::Assign(n) => n.syntax(),
            Self::Call(n) => n.syntax(),
            Self::Other(n) => n,
        }
    }
}

ast_node!(LocalStmt, LOCAL_STMT);

impl LocalStmt {
    pub fn names(&self) -> Vec<String> {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::NAME_LIST)
            .map(|list| ident_tokens(&list).map(|t| t.text().to_string()).collect())
            .unwrap_or_default()
    }

    pub fn values(&self) -> Vec<Expr> {
        expr_list(&self.0)
    }
}

ast_node!(LocalFunctionStmt, LOCAL_FUNCTION_STMT);

impl LocalFunctionStmt {
    pub fn name(&self) -> Option<String> {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::NAME)
            .and_then(|name| first_ident(&name))
    }

    pub fn params(&self) -> Vec<String> {
        param_names(&self.0)
    }
}

ast_node!(FunctionStmt, FUNCTION_STMT);

impl FunctionStmt {
    /// Dotted name as written, e.g. `M.View:show`.
    pub fn name(&self) -> Option<String> {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::FUNCTION_NAME)
            .map(|name| compact_text(&name))
    }

    pub fn params(&self) -> Vec<String> {
        param_names(&self.0)
    }
}

ast_node!(AssignStmt, ASSIGN_STMT);

impl AssignStmt {
    pub fn targets(&self) -> Vec<Expr> {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::VAR_LIST)
            .map(|list| list.children().filter_map(Expr::cast).collect())
            .unwrap_or_default()
    }

    pub fn values(&self) -> Vec<Expr> {
        expr_list(&self.0)
    }
}

ast_node!(CallStmt, CALL_STMT);

impl CallStmt {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

fn expr_list(node: &SyntaxNode) -> Vec<Expr> {
    node.children()
        .find(|c| c.kind() == SyntaxKind::EXPR_LIST)
        .map(|list| list.children().filter_map(Expr::cast).collect())
        .unwrap_or_default()
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Literal(Literal),
    Vararg(VarargExpr),
    NameRef(NameRef),
    Paren(ParenExpr),
    Table(TableExpr),
    Function(FunctionExpr),
    Member(MemberExpr),
    Index(IndexExpr),
    Call(CallExpr),
    MethodCall(MethodCallExpr),
    Prefix(PrefixExpr),
    Bin(BinExpr),
}

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::LITERAL
                | SyntaxKind::VARARG_EXPR
                | SyntaxKind::NAME_REF
                | SyntaxKind::PAREN_EXPR
                | SyntaxKind::TABLE_EXPR
                | SyntaxKind::FUNCTION_EXPR
                | SyntaxKind::MEMBER_EXPR
                | SyntaxKind::INDEX_EXPR
                | SyntaxKind::CALL_EXPR
                | SyntaxKind::METHOD_CALL_EXPR
                | SyntaxKind::PREFIX_EXPR
                | SyntaxKind::BIN_EXPR
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::LITERAL => Some(Self::Literal(Literal(node))),
            SyntaxKind::VARARG_EXPR => Some(Self::Vararg(VarargExpr(node))),
            SyntaxKind::NAME_REF => Some(Self::NameRef(NameRef(node))),
            SyntaxKind::PAREN_EXPR => Some(Self::Paren(ParenExpr(node))),
            SyntaxKind::TABLE_EXPR => Some(Self::Table(TableExpr(node))),
            SyntaxKind::FUNCTION_EXPR => Some(Self::Function(FunctionExpr(node))),
            SyntaxKind::MEMBER_EXPR => Some(Self::Member(MemberExpr(node))),
            SyntaxKind::INDEX_EXPR => Some(Self::Index(IndexExpr(node))),
            SyntaxKind::CALL_EXPR => Some(Self::Call(CallExpr(node))),
            SyntaxKind::METHOD_CALL_EXPR => Some(Self::MethodCall(MethodCallExpr(node))),
            SyntaxKind::PREFIX_EXPR => Some(Self::Prefix(PrefixExpr(node))),
            SyntaxKind::BIN_EXPR => Some(Self::Bin(BinExpr(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Literal(n) => n.syntax(),
            Self::Vararg(n) => n.syntax(),
            Self::NameRef(n) => n.syntax(),
            Self::Paren(n) => n.syntax(),
            Self::Table(n) => n.syntax(),
            Self::Function(n) => n.syntax(),
            Self::Member(n) => n.syntax(),
            Self::Index(n) => n.syntax(),
            Self::Call(n) => n.syntax(),
            Self::MethodCall(n) => n.syntax(),
            Self::Prefix(n) => n.syntax(),
            Self::Bin(n) => n.syntax(),
        }
    }
}

ast_node!(Literal, LITERAL);

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|t| !t.kind().is_trivia())
    }
}

ast_node!(VarargExpr, VARARG_EXPR);

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn name(&self) -> Option<String> {
        first_ident(&self.0)
    }
}

ast_node!(ParenExpr, PAREN_EXPR);

impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(TableExpr, TABLE_EXPR);

impl TableExpr {
    pub fn fields(&self) -> impl Iterator<Item = TableField> + '_ {
        self.0.children().filter_map(TableField::cast)
    }
}

ast_node!(TableField, TABLE_FIELD);

/// How a table constructor field supplies its key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// `value`
    Positional,
    /// `name = value`
    Named(SyntaxToken),
    /// `[expr] = value`
    Computed(Expr),
}

impl TableField {
    pub fn key(&self) -> FieldKey {
        let first = self
            .0
            .children_with_tokens()
            .find(|element| !element.kind().is_trivia());
        match first.as_ref().map(|element| element.kind()) {
            Some(SyntaxKind::L_BRACKET) => self
                .0
                .children()
                .find_map(Expr::cast)
                .map(FieldKey::Computed)
                .unwrap_or(FieldKey::Positional),
            Some(SyntaxKind::IDENT) => first
                .and_then(|element| element.into_token())
                .map(FieldKey::Named)
                .unwrap_or(FieldKey::Positional),
            _ => FieldKey::Positional,
        }
    }

    /// The value expression, which is always the last expression child.
    pub fn value(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).last()
    }
}

ast_node!(FunctionExpr, FUNCTION_EXPR);

impl FunctionExpr {
    pub fn params(&self) -> Vec<String> {
        param_names(&self.0)
    }
}

ast_node!(MemberExpr, MEMBER_EXPR);

impl MemberExpr {
    pub fn base(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn key(&self) -> Option<String> {
        first_ident(&self.0)
    }
}

ast_node!(IndexExpr, INDEX_EXPR);

impl IndexExpr {
    pub fn base(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(CallExpr, CALL_EXPR);
ast_node!(MethodCallExpr, METHOD_CALL_EXPR);

ast_node!(PrefixExpr, PREFIX_EXPR);

impl PrefixExpr {
    pub fn op(&self) -> Option<SyntaxKind> {
        self.0
            .children_with_tokens()
            .find(|element| !element.kind().is_trivia())
            .map(|element| element.kind())
    }

    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(BinExpr, BIN_EXPR);
