//! Logos-based lexer for Lua
//!
//! Fast tokenization using the logos crate. Long brackets (`[[ ]]`,
//! `[==[ ]==]`) are matched by callbacks because their closing delimiter
//! depends on the opening one.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// Byte column of the token inside a single-line input.
    pub fn column(&self) -> usize {
        u32::from(self.offset) as usize
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Non-trivia tokens of `input`, stopping at the first lexical error.
///
/// This is the view the line classifier works on: comments and whitespace
/// disappear and anything after an unlexable character is ignored.
pub fn significant_tokens(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input)
        .take_while(|t| t.kind != SyntaxKind::ERROR)
        .filter(|t| !t.kind.is_trivia())
        .collect()
}

/// Length of the `[==[` style opener at the start of `text`, and its level.
fn long_bracket_open(text: &str) -> Option<(usize, usize)> {
    let rest = text.strip_prefix('[')?;
    let level = rest.bytes().take_while(|&b| b == b'=').count();
    rest[level..].starts_with('[').then_some((level + 2, level))
}

/// Consume up to and including the `]==]` closer for `level`.
fn bump_past_long_close(lex: &mut logos::Lexer<'_, LogosToken>, level: usize) -> bool {
    let close = format!("]{}]", "=".repeat(level));
    match lex.remainder().find(&close) {
        Some(at) => {
            lex.bump(at + close.len());
            true
        }
        None => false,
    }
}

fn lex_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    if let Some((open_len, level)) = long_bracket_open(lex.remainder()) {
        lex.bump(open_len);
        return bump_past_long_close(lex, level);
    }
    let line_len = lex.remainder().find('\n').unwrap_or(lex.remainder().len());
    lex.bump(line_len);
    true
}

fn lex_long_string(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    let level = lex.slice().len() - 2;
    bump_past_long_close(lex, level)
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\x0B\x0C]+")]
    Whitespace,

    #[token("--", lex_comment)]
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"0[xX][0-9a-fA-F]+|[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?|\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    #[regex(r#"'([^'\\\n]|\\(.|\n))*'"#)]
    String,

    #[regex(r"\[=*\[", lex_long_string)]
    LongString,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    DotDotDot,

    #[token("..")]
    DotDot,

    #[token("==")]
    EqEq,

    #[token("~=")]
    TildeEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("^")]
    Caret,

    #[token("#")]
    Hash,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("=")]
    Eq,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("and")]
    AndKw,

    #[token("break")]
    BreakKw,

    #[token("do")]
    DoKw,

    #[token("else")]
    ElseKw,

    #[token("elseif")]
    ElseifKw,

    #[token("end")]
    EndKw,

    #[token("false")]
    FalseKw,

    #[token("for")]
    ForKw,

    #[token("function")]
    FunctionKw,

    #[token("if")]
    IfKw,

    #[token("in")]
    InKw,

    #[token("local")]
    LocalKw,

    #[token("nil")]
    NilKw,

    #[token("not")]
    NotKw,

    #[token("or")]
    OrKw,

    #[token("repeat")]
    RepeatKw,

    #[token("return")]
    ReturnKw,

    #[token("then")]
    ThenKw,

    #[token("true")]
    TrueKw,

    #[token("until")]
    UntilKw,

    #[token("while")]
    WhileKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            Comment => SyntaxKind::COMMENT,
            Ident => SyntaxKind::IDENT,
            Number => SyntaxKind::NUMBER,
            String => SyntaxKind::STRING,
            LongString => SyntaxKind::LONG_STRING,
            DotDotDot => SyntaxKind::DOT_DOT_DOT,
            DotDot => SyntaxKind::DOT_DOT,
            EqEq => SyntaxKind::EQ_EQ,
            TildeEq => SyntaxKind::TILDE_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Caret => SyntaxKind::CARET,
            Hash => SyntaxKind::HASH,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Eq => SyntaxKind::EQ,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            AndKw => SyntaxKind::AND_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            DoKw => SyntaxKind::DO_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            ElseifKw => SyntaxKind::ELSEIF_KW,
            EndKw => SyntaxKind::END_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            ForKw => SyntaxKind::FOR_KW,
            FunctionKw => SyntaxKind::FUNCTION_KW,
            IfKw => SyntaxKind::IF_KW,
            InKw => SyntaxKind::IN_KW,
            LocalKw => SyntaxKind::LOCAL_KW,
            NilKw => SyntaxKind::NIL_KW,
            NotKw => SyntaxKind::NOT_KW,
            OrKw => SyntaxKind::OR_KW,
            RepeatKw => SyntaxKind::REPEAT_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            ThenKw => SyntaxKind::THEN_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            UntilKw => SyntaxKind::UNTIL_KW,
            WhileKw => SyntaxKind::WHILE_KW,
        }
    }
}
