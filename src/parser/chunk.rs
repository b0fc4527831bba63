//! Line-window chunk parsing.
//!
//! Declarations may span several lines (a multi-line table literal, a
//! function literal with a body). Starting from one line, the window grows a
//! line at a time until the accumulated text parses cleanly as a chunk with
//! at least one statement.

use text_size::TextSize;
use tracing::trace;

use super::ast::{AstNode, SourceFile};
use super::parser::parse;
use super::value::{ChunkValue, lower_statement};
use crate::base::{Document, Position};

/// A successfully parsed window of lines.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// First document line of the window.
    pub start_line: usize,
    /// The window's lines as they appear in the document.
    pub lines: Vec<String>,
    /// The first statement, lowered.
    pub value: ChunkValue,
    line_starts: Vec<TextSize>,
}

impl Chunk {
    /// Map a byte offset inside the window to a document position.
    pub fn position(&self, offset: TextSize) -> Position {
        let index = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let line_offset = usize::from(offset - self.line_starts[index]);
        let line = &self.lines[index];
        let column = line
            .get(..line_offset.min(line.len()))
            .map(|prefix| prefix.chars().count())
            .unwrap_or(line_offset);
        Position::new(self.start_line + index, column)
    }
}

/// Parse the smallest window starting at `line` that forms a valid chunk.
///
/// Returns `None` when the document ends before any window parses.
pub fn parse_chunk_at(document: &Document, line: usize) -> Option<Chunk> {
    let mut text = String::new();
    let mut lines = Vec::new();
    let mut line_starts = Vec::new();

    for index in line..document.line_count() {
        if !lines.is_empty() {
            text.push('\n');
        }
        line_starts.push(TextSize::of(text.as_str()));
        let current = document.line(index);
        text.push_str(current);
        lines.push(current.to_string());

        let parse = parse(&text);
        if !parse.ok() {
            continue;
        }
        let Some(file) = SourceFile::cast(parse.syntax()) else {
            continue;
        };
        let Some(stmt) = file.statements().next() else {
            continue;
        };

        trace!(
            module = %document.module(),
            start = line,
            end = index,
            "parsed chunk window"
        );
        return Some(Chunk {
            start_line: line,
            lines,
            value: lower_statement(&stmt),
            line_starts,
        });
    }

    None
}
