use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::ProjectError;
use super::file_loader;
use super::settings::Settings;
use crate::ide::AnalysisHost;

/// Progress of a workspace scan, reported once per file before it is parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanProgress {
    /// 1-based position of the file in the scan.
    pub current_index: usize,
    pub total: usize,
    pub file_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    File(ScanProgress),
    /// Emitted once after the last file.
    Done { total: usize },
}

/// Outcome of a workspace scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub indexed: usize,
    /// Files that could not be read. They are skipped, not fatal.
    pub failed: Vec<PathBuf>,
}

/// Loads every configured workspace directory into an [`AnalysisHost`].
pub struct WorkspaceLoader {
    root: PathBuf,
}

impl WorkspaceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files to index, in scan order.
    ///
    /// Each entry of `settings.dirs` is resolved against the root. With no
    /// directories configured the root itself is scanned.
    pub fn collect(&self, settings: &Settings) -> Result<Vec<PathBuf>, ProjectError> {
        if !self.root.is_dir() {
            return Err(ProjectError::workspace_root(&self.root));
        }

        let dirs: Vec<PathBuf> = if settings.dirs.is_empty() {
            vec![self.root.clone()]
        } else {
            settings
                .dirs
                .iter()
                .map(|dir| self.root.join(dir.trim_start_matches(['/', '\\'])))
                .collect()
        };

        let mut files = Vec::new();
        for dir in dirs {
            if !dir.is_dir() {
                warn!(dir = %dir.display(), "configured directory does not exist");
                continue;
            }
            for file in file_loader::collect_lua_files(&dir, settings) {
                if !files.contains(&file) {
                    files.push(file);
                }
            }
        }
        Ok(files)
    }

    /// Parse every workspace file into `host`, reporting progress.
    pub fn load_into_host(
        &self,
        host: &mut AnalysisHost,
        mut on_event: impl FnMut(ScanEvent),
    ) -> Result<ScanReport, ProjectError> {
        let files = self.collect(host.settings())?;
        let total = files.len();
        info!(root = %self.root.display(), total, "scanning workspace");

        let mut report = ScanReport::default();
        for (i, path) in files.into_iter().enumerate() {
            on_event(ScanEvent::File(ScanProgress {
                current_index: i + 1,
                total,
                file_path: path.clone(),
            }));

            match file_loader::load_file(&path) {
                Ok(text) => {
                    host.index_document(&path.to_string_lossy(), &text);
                    report.indexed += 1;
                }
                Err(err) => {
                    warn!(error = %err, "skipping file");
                    report.failed.push(path);
                }
            }
        }

        on_event(ScanEvent::Done { total });
        debug!(indexed = report.indexed, failed = report.failed.len(), "workspace scan finished");
        Ok(report)
    }
}
