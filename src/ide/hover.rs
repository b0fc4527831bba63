//! Hover information implementation.
//!
//! Hover only describes member function declarations: the declaration line
//! in a code fence, a rule, then the comment block above it.

use crate::base::{Document, Span};
use crate::hir::doc_block;
use crate::parser::{SyntaxKind, significant_tokens};

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// The hovered declaration line.
    pub span: Span,
}

/// Hover content for `line`, if it declares a member function of this
/// module (`function M.x(`, `function _M:x(` or `function <module>.x(`).
pub fn hover(document: &Document, line: usize) -> Option<HoverResult> {
    let text = document.line(line);
    if !is_member_function_start(text, document.module()) {
        return None;
    }

    let mut contents = format!("```\n{text}\n```\n---\n");
    if let Some(doc) = doc_block(document, line) {
        contents.push_str(&doc);
    }
    Some(HoverResult {
        contents,
        span: Span::declaration(line, 0),
    })
}

fn is_member_function_start(line: &str, module: &str) -> bool {
    let trimmed = line.trim_start();
    let owned = ["function M", "function _M"]
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
        || trimmed
            .strip_prefix("function ")
            .is_some_and(|rest| rest.starts_with(module));
    if !owned {
        return false;
    }

    let tokens = significant_tokens(trimmed);
    match tokens.as_slice() {
        [_, _, indexer, name, open, ..] => {
            matches!(indexer.kind, SyntaxKind::DOT | SyntaxKind::COLON)
                && name.text != "ctor"
                && open.kind == SyntaxKind::L_PAREN
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_shows_line_and_comment_block() {
        let doc = Document::new(
            "player.lua",
            "local x = 1\n-- Deal damage.\n-- @param target\nfunction M:attack(target)\nend",
        );
        let hover = hover(&doc, 3).expect("member function");
        assert_eq!(
            hover.contents,
            "```\nfunction M:attack(target)\n```\n---\n-- Deal damage.\n-- @param target"
        );
    }

    #[test]
    fn test_hover_skips_non_member_lines() {
        let doc = Document::new(
            "player.lua",
            "function helper()\nend\nfunction M.ctor()\nend\nfunction Other.x()\nend\nfunction player.run()\nend",
        );
        assert!(hover(&doc, 0).is_none());
        assert!(hover(&doc, 2).is_none());
        assert!(hover(&doc, 4).is_none());
        assert!(hover(&doc, 6).is_some());
    }
}
