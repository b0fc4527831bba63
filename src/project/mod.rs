//! Workspace configuration, file discovery and reparse scheduling.

mod error;
pub mod file_loader;
mod reparse_queue;
mod settings;
pub mod workspace_loader;

pub use error::ProjectError;
pub use reparse_queue::ReparseQueue;
pub use settings::{DEFAULT_IGNORE, DEFAULT_REPARSE_DELAY_MS, Settings};
pub use workspace_loader::{ScanEvent, ScanProgress, ScanReport, WorkspaceLoader};
