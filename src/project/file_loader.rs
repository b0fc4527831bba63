//! Source file enumeration and reading.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use super::error::ProjectError;
use super::settings::Settings;

/// All indexable files under `dir`, sorted by path.
///
/// Unreadable entries are logged and skipped.
pub fn collect_lua_files(dir: &Path, settings: &Settings) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| !settings.is_ignored(&path.to_string_lossy()))
        .collect();
    files.sort();
    files
}

/// Read a source file. Invalid UTF-8 is replaced rather than rejected.
pub fn load_file(path: &Path) -> Result<String, ProjectError> {
    let bytes = std::fs::read(path).map_err(|err| ProjectError::io(path, err))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
