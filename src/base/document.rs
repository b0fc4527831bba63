//! In-memory source documents.
//!
//! A [`Document`] keeps the file's lines with trailing whitespace removed,
//! which is the form every line-oriented rule in the crate works on.

use std::sync::Arc;

/// A Lua source file as seen by the indexer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    uri: Arc<str>,
    module: Arc<str>,
    lines: Vec<String>,
}

impl Document {
    /// Create a document from its identity (path or URI) and full text.
    pub fn new(uri: impl Into<Arc<str>>, text: &str) -> Self {
        let uri = uri.into();
        let module = Arc::from(module_name(&uri));
        let lines = text
            .split('\n')
            .map(|line| line.trim_end().to_string())
            .collect();
        Self { uri, module, lines }
    }

    /// The document identity it was created with.
    pub fn uri(&self) -> &Arc<str> {
        &self.uri
    }

    /// Module name: the file's basename without extension.
    pub fn module(&self) -> &Arc<str> {
        &self.module
    }

    /// Number of lines, counting a trailing empty line.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of a line, or `""` past the end of the document.
    pub fn line(&self, index: usize) -> &str {
        self.lines.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Basename of a path or URI with its extension removed.
///
/// Both `/` and `\` are treated as separators so Windows paths coming from
/// the editor resolve to the same module names as POSIX ones.
pub fn module_name(path: &str) -> &str {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file.rfind('.') {
        Some(0) | None => file,
        Some(dot) => &file[..dot],
    }
}
