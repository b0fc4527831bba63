//! Recursive descent parser for Lua 5.1
//!
//! Builds a rowan GreenNode tree from tokens. The tree is lossless: every
//! token, including whitespace and comments, ends up in it. Binary
//! expressions use checkpoints so operands are wrapped after the operator
//! has been seen.

use super::lexer::{Lexer, Token};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use rowan::{GreenNode, GreenNodeBuilder};
use text_size::{TextRange, TextSize};

/// Nesting limit for blocks and expressions.
const MAX_DEPTH: usize = 200;

/// Binding power of unary operators (`not`, `#`, `-`).
const UNARY_PRIORITY: u8 = 8;

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse Lua source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, TextSize::of(input));
    parser.parse_source_file();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    end: TextSize,
    depth: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], end: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// Index of the next significant token at or after `pos`.
    fn significant_index(&self, n: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.pos)
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(idx, _)| idx)
    }

    fn current(&self) -> Option<&Token<'a>> {
        self.significant_index(0).map(|idx| &self.tokens[idx])
    }

    fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.significant_index(0).is_none()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.significant_index(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}", describe(kind)));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(self.end));
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Wrap the next token in an ERROR node so the parser always progresses.
    fn error_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> rowan::Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            self.error("chunk has too many syntax levels");
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // =========================================================================
    // Blocks and statements
    // =========================================================================

    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());
        self.block();
        if !self.at_eof() {
            self.error(format!("'<eof>' expected near {}", self.near()));
            self.start_node(SyntaxKind::ERROR);
            while !self.at_eof() {
                self.bump();
            }
            self.finish_node();
        }
        self.skip_trivia();
        self.builder.finish_node();
    }

    fn block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        if self.enter() {
            while !self.at_eof() && !self.current_kind().is_block_end() {
                if self.at(SyntaxKind::RETURN_KW) {
                    self.return_stmt();
                    break;
                }
                let before = self.pos;
                self.statement();
                if self.pos == before {
                    let message = format!("unexpected symbol near {}", self.near());
                    self.error_bump(message);
                }
            }
            self.leave();
        }
        self.finish_node();
    }

    fn statement(&mut self) {
        match self.current_kind() {
            SyntaxKind::SEMICOLON => self.bump(),
            SyntaxKind::IF_KW => self.if_stmt(),
            SyntaxKind::WHILE_KW => self.while_stmt(),
            SyntaxKind::DO_KW => self.do_stmt(),
            SyntaxKind::FOR_KW => self.for_stmt(),
            SyntaxKind::REPEAT_KW => self.repeat_stmt(),
            SyntaxKind::FUNCTION_KW => self.function_stmt(),
            SyntaxKind::LOCAL_KW if self.nth(1) == SyntaxKind::FUNCTION_KW => {
                self.local_function_stmt()
            }
            SyntaxKind::LOCAL_KW => self.local_stmt(),
            SyntaxKind::BREAK_KW => {
                self.start_node(SyntaxKind::BREAK_STMT);
                self.bump();
                self.finish_node();
            }
            _ => self.expr_stmt(),
        }
    }

    fn if_stmt(&mut self) {
        self.start_node(SyntaxKind::IF_STMT);
        self.bump();
        self.expr();
        self.expect(SyntaxKind::THEN_KW);
        self.block();
        while self.at(SyntaxKind::ELSEIF_KW) {
            self.start_node(SyntaxKind::ELSEIF_CLAUSE);
            self.bump();
            self.expr();
            self.expect(SyntaxKind::THEN_KW);
            self.block();
            self.finish_node();
        }
        if self.at(SyntaxKind::ELSE_KW) {
            self.start_node(SyntaxKind::ELSE_CLAUSE);
            self.bump();
            self.block();
            self.finish_node();
        }
        self.expect(SyntaxKind::END_KW);
        self.finish_node();
    }

    fn while_stmt(&mut self) {
        self.start_node(SyntaxKind::WHILE_STMT);
        self.bump();
        self.expr();
        self.expect(SyntaxKind::DO_KW);
        self.block();
        self.expect(SyntaxKind::END_KW);
        self.finish_node();
    }

    fn do_stmt(&mut self) {
        self.start_node(SyntaxKind::DO_STMT);
        self.bump();
        self.block();
        self.expect(SyntaxKind::END_KW);
        self.finish_node();
    }

    fn repeat_stmt(&mut self) {
        self.start_node(SyntaxKind::REPEAT_STMT);
        self.bump();
        self.block();
        self.expect(SyntaxKind::UNTIL_KW);
        self.expr();
        self.finish_node();
    }

    fn for_stmt(&mut self) {
        let numeric = self.nth(2) == SyntaxKind::EQ;
        if numeric {
            self.start_node(SyntaxKind::NUMERIC_FOR_STMT);
            self.bump();
            self.name();
            self.expect(SyntaxKind::EQ);
            self.expr();
            self.expect(SyntaxKind::COMMA);
            self.expr();
            if self.eat(SyntaxKind::COMMA) {
                self.expr();
            }
        } else {
            self.start_node(SyntaxKind::GENERIC_FOR_STMT);
            self.bump();
            self.name_list();
            self.expect(SyntaxKind::IN_KW);
            self.expr_list();
        }
        self.expect(SyntaxKind::DO_KW);
        self.block();
        self.expect(SyntaxKind::END_KW);
        self.finish_node();
    }

    fn function_stmt(&mut self) {
        self.start_node(SyntaxKind::FUNCTION_STMT);
        self.bump();
        self.start_node(SyntaxKind::FUNCTION_NAME);
        self.expect(SyntaxKind::IDENT);
        while self.eat(SyntaxKind::DOT) {
            self.expect(SyntaxKind::IDENT);
        }
        if self.eat(SyntaxKind::COLON) {
            self.expect(SyntaxKind::IDENT);
        }
        self.finish_node();
        self.function_body();
        self.finish_node();
    }

    fn local_function_stmt(&mut self) {
        self.start_node(SyntaxKind::LOCAL_FUNCTION_STMT);
        self.bump();
        self.bump();
        self.name();
        self.function_body();
        self.finish_node();
    }

    fn local_stmt(&mut self) {
        self.start_node(SyntaxKind::LOCAL_STMT);
        self.bump();
        self.name_list();
        if self.eat(SyntaxKind::EQ) {
            self.expr_list();
        }
        self.finish_node();
    }

    fn return_stmt(&mut self) {
        self.start_node(SyntaxKind::RETURN_STMT);
        self.bump();
        let kind = self.current_kind();
        if !self.at_eof() && !kind.is_block_end() && kind != SyntaxKind::SEMICOLON {
            self.expr_list();
        }
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Assignment or function call statement.
    fn expr_stmt(&mut self) {
        let checkpoint = self.checkpoint();
        let Some(kind) = self.suffixed_expr() else {
            return;
        };

        if self.at(SyntaxKind::EQ) || self.at(SyntaxKind::COMMA) {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::ASSIGN_STMT.into());
            self.builder
                .start_node_at(checkpoint, SyntaxKind::VAR_LIST.into());
            self.check_assignable(kind);
            while self.eat(SyntaxKind::COMMA) {
                if let Some(kind) = self.suffixed_expr() {
                    self.check_assignable(kind);
                }
            }
            self.finish_node();
            self.expect(SyntaxKind::EQ);
            self.expr_list();
            self.finish_node();
        } else if matches!(kind, SyntaxKind::CALL_EXPR | SyntaxKind::METHOD_CALL_EXPR) {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::CALL_STMT.into());
            self.finish_node();
        } else {
            self.error(format!("syntax error near {}", self.near()));
        }
    }

    fn check_assignable(&mut self, kind: SyntaxKind) {
        if !matches!(
            kind,
            SyntaxKind::NAME_REF | SyntaxKind::MEMBER_EXPR | SyntaxKind::INDEX_EXPR
        ) {
            self.error("cannot assign to this expression");
        }
    }

    // =========================================================================
    // Names and lists
    // =========================================================================

    fn name(&mut self) {
        self.start_node(SyntaxKind::NAME);
        self.expect(SyntaxKind::IDENT);
        self.finish_node();
    }

    fn name_list(&mut self) {
        self.start_node(SyntaxKind::NAME_LIST);
        self.expect(SyntaxKind::IDENT);
        while self.eat(SyntaxKind::COMMA) {
            self.expect(SyntaxKind::IDENT);
        }
        self.finish_node();
    }

    fn expr_list(&mut self) {
        self.start_node(SyntaxKind::EXPR_LIST);
        self.expr();
        while self.eat(SyntaxKind::COMMA) {
            self.expr();
        }
        self.finish_node();
    }

    fn function_body(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        if self.expect(SyntaxKind::L_PAREN) {
            if !self.at(SyntaxKind::R_PAREN) {
                loop {
                    if self.eat(SyntaxKind::DOT_DOT_DOT) {
                        break;
                    }
                    if !self.expect(SyntaxKind::IDENT) || !self.eat(SyntaxKind::COMMA) {
                        break;
                    }
                }
            }
            self.expect(SyntaxKind::R_PAREN);
        }
        self.finish_node();
        self.block();
        self.expect(SyntaxKind::END_KW);
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn expr(&mut self) {
        self.subexpr(0);
    }

    /// Precedence climbing over Lua's binary operator table.
    fn subexpr(&mut self, limit: u8) {
        if !self.enter() {
            return;
        }
        let checkpoint = self.checkpoint();

        if matches!(
            self.current_kind(),
            SyntaxKind::NOT_KW | SyntaxKind::MINUS | SyntaxKind::HASH
        ) {
            self.start_node(SyntaxKind::PREFIX_EXPR);
            self.bump();
            self.subexpr(UNARY_PRIORITY);
            self.finish_node();
        } else {
            self.simple_expr();
        }

        while let Some((left, right)) = binary_priority(self.current_kind()) {
            if left <= limit {
                break;
            }
            self.builder
                .start_node_at(checkpoint, SyntaxKind::BIN_EXPR.into());
            self.bump();
            self.subexpr(right);
            self.finish_node();
        }
        self.leave();
    }

    fn simple_expr(&mut self) {
        match self.current_kind() {
            SyntaxKind::NUMBER
            | SyntaxKind::STRING
            | SyntaxKind::LONG_STRING
            | SyntaxKind::NIL_KW
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW => {
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::DOT_DOT_DOT => {
                self.start_node(SyntaxKind::VARARG_EXPR);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::L_BRACE => self.table_expr(),
            SyntaxKind::FUNCTION_KW => {
                self.start_node(SyntaxKind::FUNCTION_EXPR);
                self.bump();
                self.function_body();
                self.finish_node();
            }
            _ => {
                self.suffixed_expr();
            }
        }
    }

    fn primary_expr(&mut self) -> Option<SyntaxKind> {
        match self.current_kind() {
            SyntaxKind::IDENT => {
                self.start_node(SyntaxKind::NAME_REF);
                self.bump();
                self.finish_node();
                Some(SyntaxKind::NAME_REF)
            }
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_EXPR);
                self.bump();
                self.expr();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
                Some(SyntaxKind::PAREN_EXPR)
            }
            _ => {
                self.error(format!("unexpected symbol near {}", self.near()));
                None
            }
        }
    }

    /// Primary expression followed by member, index and call suffixes.
    ///
    /// Returns the kind of the outermost node built.
    fn suffixed_expr(&mut self) -> Option<SyntaxKind> {
        let checkpoint = self.checkpoint();
        let mut kind = self.primary_expr()?;

        loop {
            let next = match self.current_kind() {
                SyntaxKind::DOT => SyntaxKind::MEMBER_EXPR,
                SyntaxKind::L_BRACKET => SyntaxKind::INDEX_EXPR,
                SyntaxKind::COLON => SyntaxKind::METHOD_CALL_EXPR,
                SyntaxKind::L_PAREN
                | SyntaxKind::STRING
                | SyntaxKind::LONG_STRING
                | SyntaxKind::L_BRACE => SyntaxKind::CALL_EXPR,
                _ => return Some(kind),
            };

            self.builder.start_node_at(checkpoint, next.into());
            match next {
                SyntaxKind::MEMBER_EXPR => {
                    self.bump();
                    self.expect(SyntaxKind::IDENT);
                }
                SyntaxKind::INDEX_EXPR => {
                    self.bump();
                    self.expr();
                    self.expect(SyntaxKind::R_BRACKET);
                }
                SyntaxKind::METHOD_CALL_EXPR => {
                    self.bump();
                    self.expect(SyntaxKind::IDENT);
                    self.call_args();
                }
                _ => self.call_args(),
            }
            self.finish_node();
            kind = next;
        }
    }

    fn call_args(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        match self.current_kind() {
            SyntaxKind::STRING | SyntaxKind::LONG_STRING => {
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::L_BRACE => self.table_expr(),
            _ => {
                if self.expect(SyntaxKind::L_PAREN) {
                    if !self.at(SyntaxKind::R_PAREN) {
                        self.expr();
                        while self.eat(SyntaxKind::COMMA) {
                            self.expr();
                        }
                    }
                    self.expect(SyntaxKind::R_PAREN);
                }
            }
        }
        self.finish_node();
    }

    fn table_expr(&mut self) {
        self.start_node(SyntaxKind::TABLE_EXPR);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            self.table_field();
            if !self.eat(SyntaxKind::COMMA) && !self.eat(SyntaxKind::SEMICOLON) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn table_field(&mut self) {
        self.start_node(SyntaxKind::TABLE_FIELD);
        if self.at(SyntaxKind::L_BRACKET) {
            self.bump();
            self.expr();
            self.expect(SyntaxKind::R_BRACKET);
            self.expect(SyntaxKind::EQ);
            self.expr();
        } else if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::EQ {
            self.bump();
            self.bump();
            self.expr();
        } else {
            self.expr();
        }
        self.finish_node();
    }

    /// Text of the current token for error messages.
    fn near(&self) -> String {
        match self.current() {
            Some(token) => format!("'{}'", token.text),
            None => "<eof>".to_string(),
        }
    }
}

/// Left and right binding power of a binary operator.
fn binary_priority(kind: SyntaxKind) -> Option<(u8, u8)> {
    Some(match kind {
        SyntaxKind::OR_KW => (1, 1),
        SyntaxKind::AND_KW => (2, 2),
        SyntaxKind::LT
        | SyntaxKind::GT
        | SyntaxKind::LT_EQ
        | SyntaxKind::GT_EQ
        | SyntaxKind::TILDE_EQ
        | SyntaxKind::EQ_EQ => (3, 3),
        SyntaxKind::DOT_DOT => (5, 4),
        SyntaxKind::PLUS | SyntaxKind::MINUS => (6, 6),
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => (7, 7),
        SyntaxKind::CARET => (10, 9),
        _ => return None,
    })
}

fn describe(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::IDENT => "<name>",
        SyntaxKind::EQ => "'='",
        SyntaxKind::COMMA => "','",
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::R_BRACKET => "']'",
        SyntaxKind::THEN_KW => "'then'",
        SyntaxKind::DO_KW => "'do'",
        SyntaxKind::END_KW => "'end'",
        SyntaxKind::UNTIL_KW => "'until'",
        SyntaxKind::IN_KW => "'in'",
        _ => "token",
    }
}
