//! Workspace scanning with temporary directory fixtures.

use std::fs;
use std::path::Path;

use luasense::ide::AnalysisHost;
use luasense::project::{ProjectError, ScanEvent, Settings, WorkspaceLoader};
use rstest::rstest;
use tempfile::TempDir;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::PLAYER;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, text).expect("write file");
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    write(root, "scripts/ui/player.lua", PLAYER);
    write(root, "scripts/ui/player.lua.meta", "guid: 1");
    write(root, "scripts/core/core_impl.lua", "-- @belong Core\nfunction M.init()\nend");
    write(root, "scripts/pb/login_pb.lua", "function M.decode()\nend");
    write(root, "scripts/config/items.lua", "ITEMS = {}");
    write(root, "tools/build.lua", "function build()\nend");
    dir
}

#[test]
fn test_scan_reports_progress_and_indexes() {
    let dir = workspace();
    let settings = Settings {
        dirs: vec!["/scripts".to_string()],
        ..Settings::default()
    };
    let mut host = AnalysisHost::with_settings(settings);
    host.set_workspace_root(dir.path());

    let mut events = Vec::new();
    let report = host.search_workspace(|event| events.push(event)).expect("scan succeeds");
    assert_eq!(report.indexed, 2);
    assert!(report.failed.is_empty());

    let progress: Vec<(usize, usize)> = events
        .iter()
        .filter_map(|e| match e {
            ScanEvent::File(p) => Some((p.current_index, p.total)),
            ScanEvent::Done { .. } => None,
        })
        .collect();
    assert_eq!(progress, vec![(1, 2), (2, 2)]);
    assert_eq!(events.last(), Some(&ScanEvent::Done { total: 2 }));

    assert_eq!(signs(&complete(host.symbol_index(), "hud", "Core", '.')), vec!["init"]);
    assert!(host.symbol_index().bucket("login_pb").is_empty());
}

#[rstest]
#[case::include_wins(&["login_pb"], &["/pb/"], 3)]
#[case::default_exclude(&[], &["/pb/"], 2)]
#[case::no_excludes(&[], &[], 3)]
#[case::extra_exclude(&[], &["/ui/", "/pb/"], 1)]
fn test_include_exclude_policy(
    #[case] parse_files: &[&str],
    #[case] ignore_files: &[&str],
    #[case] expected: usize,
) {
    let dir = workspace();
    let settings = Settings {
        dirs: vec!["scripts".to_string()],
        parse_files: parse_files.iter().map(|s| s.to_string()).collect(),
        ignore_files: ignore_files.iter().map(|s| s.to_string()).collect(),
        ..Settings::default()
    };
    let files = WorkspaceLoader::new(dir.path()).collect(&settings).expect("root exists");
    assert_eq!(files.len(), expected, "files: {files:?}");
}

#[test]
fn test_empty_dirs_scan_whole_root() {
    let dir = workspace();
    let files = WorkspaceLoader::new(dir.path())
        .collect(&Settings::default())
        .expect("root exists");
    assert_eq!(files.len(), 3);
}

#[test]
fn test_missing_root_is_an_error() {
    let mut host = AnalysisHost::new();
    assert!(matches!(
        host.search_workspace(|_| {}),
        Err(ProjectError::WorkspaceRoot(_))
    ));

    host.set_workspace_root("/definitely/not/a/workspace");
    assert!(matches!(
        host.search_workspace(|_| {}),
        Err(ProjectError::WorkspaceRoot(_))
    ));
}

#[test]
fn test_settings_from_editor_json() {
    let settings = Settings::from_json(
        r#"{ "dirs": ["/scripts"], "parseFiles": ["keep_me"], "aliasModules": { "a": ["b"] } }"#,
    )
    .expect("valid settings");
    assert_eq!(settings.ignore_files, vec!["/pb/".to_string()]);
    assert!(!settings.is_ignored("x/pb/keep_me.lua"));
}
