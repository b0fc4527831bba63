//! Text manipulation utilities for working with source lines.

/// Check if a character is considered part of a word (identifier).
///
/// Lua identifiers are ASCII: letters, digits and underscore.
#[inline]
pub fn is_word_character(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Find the boundaries of a word at the given position.
///
/// Returns `Some((start, end))` where `start` is the character index of the word start
/// and `end` is the character index after the last word character.
/// Returns `None` if there is no word at the position.
pub fn find_word_boundaries(chars: &[char], position: usize) -> Option<(usize, usize)> {
    if position >= chars.len() {
        return None;
    }

    if !is_word_character(chars[position]) {
        return None;
    }

    let mut start = position;
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }

    let mut end = position;
    while end < chars.len() && is_word_character(chars[end]) {
        end += 1;
    }

    Some((start, end))
}

/// The word an editor cursor is touching.
///
/// The character under the cursor wins; a cursor placed right after the last
/// character of a word still selects that word. Returns the start column and
/// the word.
pub fn word_touching_cursor(line: &str, column: usize) -> Option<(usize, String)> {
    let chars: Vec<char> = line.chars().collect();
    let (start, end) = find_word_boundaries(&chars, column)
        .or_else(|| column.checked_sub(1).and_then(|c| find_word_boundaries(&chars, c)))?;
    Some((start, chars[start..end].iter().collect()))
}

/// The partial word that ends exactly at `column`.
///
/// Returns the column where it starts and the (possibly empty) word.
pub fn word_before_cursor(line: &str, column: usize) -> (usize, String) {
    let chars: Vec<char> = line.chars().collect();
    let end = column.min(chars.len());
    let mut start = end;
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }
    (start, chars[start..end].iter().collect())
}

/// The access chain written immediately before column `end`.
///
/// Scans right-to-left from `end - 1` over identifiers separated by `.`, `:`,
/// `[` or `]` and stops at any other character. Segments are returned
/// outermost first, so `self.view.btn.` (with `end` after the final dot)
/// yields `["self", "view", "btn"]`.
pub fn access_chain(line: &str, end: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut segments = Vec::new();
    let mut word: Vec<char> = Vec::new();

    let mut index = end.min(chars.len());
    loop {
        let current = index.checked_sub(1).map(|i| chars[i]);
        match current {
            Some(c) if is_word_character(c) => word.push(c),
            other => {
                if !word.is_empty() {
                    segments.push(word.iter().rev().collect::<String>());
                    word.clear();
                }
                if !matches!(other, Some('.' | ':' | '[' | ']')) {
                    break;
                }
            }
        }
        index -= 1;
    }

    segments.reverse();
    segments
}
