//! AnalysisHost and Analysis: state ownership for IDE features.
//!
//! The `AnalysisHost` owns every document, the symbol index and the pending
//! reparses. Queries go through an `Analysis` snapshot borrowed from it.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//!
//! // Index files immediately, or let edits settle first
//! host.index_document("scripts/player.lua", text);
//! host.update_document("scripts/player.lua", edited);
//! host.reparse_due(Instant::now());
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let items = analysis.completions("scripts/player.lua", line, col, Some('.'));
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rustc_hash::FxHashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::base::{Document, module_name};
use crate::hir::{NativeCatalog, SymbolIndex, extract_document};
use crate::project::{ProjectError, ReparseQueue, ScanEvent, ScanReport, Settings, WorkspaceLoader};

use super::{CompletionItem, GotoTarget, HoverResult, SymbolInfo, WorkspaceSymbol};

/// Owns all mutable state for the IDE layer.
pub struct AnalysisHost {
    /// Latest text per module name.
    documents: FxHashMap<Arc<str>, Document>,
    index: SymbolIndex,
    settings: Settings,
    workspace_root: Option<PathBuf>,
    /// Module of the file the editor is focused on.
    active_file: Option<Arc<str>>,
    reparse: ReparseQueue,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create an empty host with default settings and the bundled catalog.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let mut host = Self {
            documents: FxHashMap::default(),
            index: SymbolIndex::new(),
            reparse: ReparseQueue::new(settings.reparse_delay()),
            settings: Settings::default(),
            workspace_root: None,
            active_file: None,
        };
        host.set_settings(settings);
        host
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.index.set_alias_modules(settings.alias_modules.clone());
        self.reparse.set_delay(settings.reparse_delay());
        self.settings = settings;
    }

    pub fn set_workspace_root(&mut self, root: impl Into<PathBuf>) {
        self.workspace_root = Some(root.into());
    }

    /// Replace the native catalog with one decoded from `json`.
    pub fn load_native_catalog(&mut self, json: &str) -> Result<(), ProjectError> {
        let catalog = NativeCatalog::from_json(json).map_err(ProjectError::Catalog)?;
        self.index.set_native_catalog(catalog);
        info!("loaded native catalog");
        Ok(())
    }

    // ==================== Documents ====================

    /// Parse `text` now and replace everything the file contributed.
    ///
    /// Returns the module name the file was indexed under.
    pub fn index_document(&mut self, path: &str, text: &str) -> Arc<str> {
        let document = Document::new(path, text);
        let module = document.module().clone();
        self.reparse.cancel(&module);
        self.index.add_extraction_result(extract_document(&document));
        self.documents.insert(module.clone(), document);
        module
    }

    /// Store an edit and schedule a debounced reparse.
    ///
    /// See [`AnalysisHost::update_document_at`].
    pub fn update_document(&mut self, path: &str, text: &str) -> Option<CancellationToken> {
        self.update_document_at(path, text, Instant::now())
    }

    /// Store an edit made at `now` and schedule its reparse.
    ///
    /// The new text is visible to line-based features immediately; the index
    /// catches up once the delay passes without further edits. Returns the
    /// token of the scheduled reparse, or `None` when the file name is
    /// excluded by the settings.
    pub fn update_document_at(
        &mut self,
        path: &str,
        text: &str,
        now: Instant,
    ) -> Option<CancellationToken> {
        let document = Document::new(path, text);
        let module = document.module().clone();
        self.documents.insert(module.clone(), document);

        let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        if self.settings.is_ignored(file_name) {
            debug!(path, "edit to ignored file, not scheduling reparse");
            return None;
        }
        Some(self.reparse.schedule(module, now))
    }

    /// Reparse every file whose delay has passed. Returns how many ran.
    pub fn reparse_due(&mut self, now: Instant) -> usize {
        let due = self.reparse.take_due(now);
        self.reindex_modules(due)
    }

    /// Reparse every pending file without waiting.
    pub fn flush_pending(&mut self) -> usize {
        let due = self.reparse.drain_all();
        self.reindex_modules(due)
    }

    fn reindex_modules(&mut self, modules: Vec<Arc<str>>) -> usize {
        let mut count = 0;
        for module in modules {
            if let Some(document) = self.documents.get(&module) {
                self.index.add_extraction_result(extract_document(document));
                count += 1;
            }
        }
        count
    }

    pub fn has_pending_reparse(&self, path: &str) -> bool {
        self.reparse.is_pending(module_name(path))
    }

    /// Forget a file and everything it contributed.
    pub fn remove_file(&mut self, path: &str) {
        let module = module_name(path);
        self.reparse.cancel(module);
        self.documents.remove(module);
        self.index.remove_file(module);
    }

    /// Drop every document and indexed record. Settings and the catalog stay.
    pub fn reset(&mut self) {
        self.documents.clear();
        self.index.reset();
        self.reparse.clear();
        self.active_file = None;
    }

    /// Record the file the editor is focused on.
    ///
    /// Leaving a file applies its pending edits right away: there are no
    /// more keystrokes to wait for.
    pub fn set_active_file(&mut self, path: &str) {
        let module: Arc<str> = Arc::from(module_name(path));
        if let Some(previous) = self.active_file.replace(module.clone()) {
            if previous != module && self.reparse.cancel(&previous) {
                self.reindex_modules(vec![previous]);
            }
        }
    }

    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    pub fn document(&self, path: &str) -> Option<&Document> {
        self.documents.get(module_name(path))
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn symbol_index(&self) -> &SymbolIndex {
        &self.index
    }

    // ==================== Workspace ====================

    /// Index every file of the configured workspace directories.
    pub fn search_workspace(
        &mut self,
        on_event: impl FnMut(ScanEvent),
    ) -> Result<ScanReport, ProjectError> {
        let root = self
            .workspace_root
            .clone()
            .ok_or_else(|| ProjectError::workspace_root(""))?;
        WorkspaceLoader::new(root).load_into_host(self, on_event)
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            index: &self.index,
            documents: &self.documents,
        }
    }
}

/// An immutable snapshot of the analysis state.
///
/// Every query takes the path of the document it is issued from; local
/// symbols and `self` are resolved relative to that file.
pub struct Analysis<'a> {
    index: &'a SymbolIndex,
    documents: &'a FxHashMap<Arc<str>, Document>,
}

impl<'a> Analysis<'a> {
    fn document(&self, path: &str) -> Option<&'a Document> {
        self.documents.get(module_name(path))
    }

    /// Get completions at a position.
    pub fn completions(
        &self,
        path: &str,
        line: usize,
        col: usize,
        trigger: Option<char>,
    ) -> Vec<CompletionItem> {
        match self.document(path) {
            Some(document) => super::completions(self.index, document, line, col, trigger),
            None => Vec::new(),
        }
    }

    /// Go to definition at a position.
    pub fn goto_definition(&self, path: &str, line: usize, col: usize) -> Option<GotoTarget> {
        let document = self.document(path)?;
        super::goto_definition(self.index, document, line, col, |module| {
            self.documents.get(module).map(|d| d.uri().clone())
        })
    }

    /// Get the function outline of a document.
    pub fn document_symbols(&self, path: &str) -> Vec<SymbolInfo> {
        self.document(path)
            .map(super::document_symbols)
            .unwrap_or_default()
    }

    /// Get hover content for a declaration line.
    pub fn hover(&self, path: &str, line: usize) -> Option<HoverResult> {
        super::hover(self.document(path)?, line)
    }

    /// Search for symbols across the workspace.
    pub fn workspace_symbols(&self, query: Option<&str>) -> Vec<WorkspaceSymbol> {
        super::workspace_symbols(self.index, query)
    }

    pub fn symbol_index(&self) -> &SymbolIndex {
        self.index
    }
}
