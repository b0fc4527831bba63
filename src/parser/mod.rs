//! Rowan-based parser for Lua 5.1
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! The indexer never parses whole files. It parses small windows of lines
//! around a declaration and lowers the first statement into a [`LuaValue`].
//!
//! ## Architecture
//!
//! ```text
//! Document lines
//!     ↓
//! parse_chunk_at → widening window of lines
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//!     ↓
//! value → LuaValue tree
//! ```

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod chunk;
mod lexer;
mod syntax_kind;
mod value;

pub use ast::*;
pub use chunk::{Chunk, parse_chunk_at};
pub use lexer::{Lexer, Token, significant_tokens, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{LuaLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use value::{
    AssignTarget, ChunkValue, LuaValue, MAX_TABLE_DEPTH, TableEntry, TableKey, lower_expr,
    lower_statement,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
