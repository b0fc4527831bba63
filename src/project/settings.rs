//! Editor-supplied configuration.
//!
//! Settings arrive as camelCase JSON. Every field is optional; missing ones
//! fall back to [`Settings::default`].

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::error::ProjectError;

/// Default exclude substring: generated protobuf bindings.
pub const DEFAULT_IGNORE: &str = "/pb/";

/// Default delay between the last edit of a file and its reparse.
pub const DEFAULT_REPARSE_DELAY_MS: u64 = 1000;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Directories to scan, relative to the workspace root.
    pub dirs: Vec<String>,
    /// Path substrings that force a file to be indexed.
    pub parse_files: Vec<String>,
    /// Path substrings that exclude a file.
    pub ignore_files: Vec<String>,
    /// Module → extra modules searched by go-to-definition.
    pub alias_modules: FxHashMap<String, Vec<String>>,
    pub reparse_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            parse_files: Vec::new(),
            ignore_files: vec![DEFAULT_IGNORE.to_string()],
            alias_modules: FxHashMap::default(),
            reparse_delay_ms: DEFAULT_REPARSE_DELAY_MS,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        serde_json::from_str(json).map_err(ProjectError::Settings)
    }

    pub fn reparse_delay(&self) -> Duration {
        Duration::from_millis(self.reparse_delay_ms)
    }

    /// Whether `path` stays out of the index.
    ///
    /// An include substring always wins. Otherwise a file is indexed only if
    /// it is a `.lua` file, not a `.meta` sidecar, not under a `config`
    /// directory and not matched by an exclude substring.
    pub fn is_ignored(&self, path: &str) -> bool {
        let path = path.replace('\\', "/");

        if self.parse_files.iter().any(|p| path.contains(p.as_str())) {
            return false;
        }
        if !path.contains(".lua") || path.ends_with(".meta") {
            return true;
        }
        if path.contains("/config/") {
            return true;
        }
        self.ignore_files.iter().any(|p| path.contains(p.as_str()))
    }
}
