//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the Lua syntax tree.

/// All syntax kinds (tokens and nodes) in Lua
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (statements, expressions, table fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,
    NUMBER,      // 42, 3.5e2, 0xFF
    STRING,      // "hello" or 'hello'
    LONG_STRING, // [[text]] or [==[text]==]

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /
    PERCENT,     // %
    CARET,       // ^
    HASH,        // #
    EQ_EQ,       // ==
    TILDE_EQ,    // ~=
    LT_EQ,       // <=
    GT_EQ,       // >=
    LT,          // <
    GT,          // >
    EQ,          // =
    L_PAREN,     // (
    R_PAREN,     // )
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    SEMICOLON,   // ;
    COLON,       // :
    COMMA,       // ,
    DOT,         // .
    DOT_DOT,     // ..
    DOT_DOT_DOT, // ...

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    AND_KW,
    BREAK_KW,
    DO_KW,
    ELSE_KW,
    ELSEIF_KW,
    END_KW,
    FALSE_KW,
    FOR_KW,
    FUNCTION_KW,
    IF_KW,
    IN_KW,
    LOCAL_KW,
    NIL_KW,
    NOT_KW,
    OR_KW,
    REPEAT_KW,
    RETURN_KW,
    THEN_KW,
    TRUE_KW,
    UNTIL_KW,
    WHILE_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,

    // =========================================================================
    // NODES - statements
    // =========================================================================
    SOURCE_FILE,
    BLOCK,
    LOCAL_STMT,
    LOCAL_FUNCTION_STMT,
    FUNCTION_STMT,
    ASSIGN_STMT,
    CALL_STMT,
    DO_STMT,
    WHILE_STMT,
    REPEAT_STMT,
    IF_STMT,
    ELSEIF_CLAUSE,
    ELSE_CLAUSE,
    NUMERIC_FOR_STMT,
    GENERIC_FOR_STMT,
    RETURN_STMT,
    BREAK_STMT,

    // =========================================================================
    // NODES - parts
    // =========================================================================
    NAME,
    NAME_LIST,
    FUNCTION_NAME,
    PARAM_LIST,
    VAR_LIST,
    EXPR_LIST,
    ARG_LIST,
    TABLE_FIELD,

    // =========================================================================
    // NODES - expressions
    // =========================================================================
    LITERAL,
    VARARG_EXPR,
    NAME_REF,
    PAREN_EXPR,
    TABLE_EXPR,
    FUNCTION_EXPR,
    MEMBER_EXPR,
    INDEX_EXPR,
    CALL_EXPR,
    METHOD_CALL_EXPR,
    PREFIX_EXPR,
    BIN_EXPR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::AND_KW as u16) && (self as u16) <= (Self::WHILE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::PLUS as u16) && (self as u16) <= (Self::DOT_DOT_DOT as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NUMBER
                | Self::STRING
                | Self::LONG_STRING
                | Self::NIL_KW
                | Self::TRUE_KW
                | Self::FALSE_KW
        )
    }

    /// Whether a token of this kind closes the enclosing block.
    pub fn is_block_end(self) -> bool {
        matches!(
            self,
            Self::END_KW | Self::ELSE_KW | Self::ELSEIF_KW | Self::UNTIL_KW
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LuaLanguage {}

impl rowan::Language for LuaLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<LuaLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<LuaLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<LuaLanguage>;
