//! Debounced reparse through the host.

use std::time::{Duration, Instant};

use luasense::Settings;
use luasense::ide::AnalysisHost;

use crate::helpers::hir_helpers::*;

#[test]
fn test_last_edit_wins() {
    let mut host = AnalysisHost::new();
    let start = Instant::now();

    let first = host
        .update_document_at("player.lua", "function M.first()\nend", start)
        .expect("scheduled");
    let second = host
        .update_document_at(
            "player.lua",
            "function M.second()\nend",
            start + Duration::from_millis(400),
        )
        .expect("scheduled");
    assert!(first.is_cancelled());
    assert!(!second.is_cancelled());

    assert_eq!(host.reparse_due(start + Duration::from_millis(1000)), 0);
    assert_eq!(host.reparse_due(start + Duration::from_millis(1400)), 1);
    assert_eq!(signs(&complete(host.symbol_index(), "hud", "player", '.')), vec!["second"]);
}

#[test]
fn test_configured_delay() {
    let settings = Settings {
        reparse_delay_ms: 50,
        ..Settings::default()
    };
    let mut host = AnalysisHost::with_settings(settings);
    let start = Instant::now();
    host.update_document_at("a.lua", "function M.f()\nend", start);
    assert_eq!(host.reparse_due(start + Duration::from_millis(50)), 1);
}

#[test]
fn test_flush_and_immediate_index_cancel_pending() {
    let mut host = AnalysisHost::new();
    host.update_document("a.lua", "function M.f()\nend");
    host.update_document("b.lua", "function M.g()\nend");
    assert_eq!(host.flush_pending(), 2);
    assert!(!host.has_pending_reparse("a.lua"));

    let token = host.update_document("a.lua", "x = 1").expect("scheduled");
    host.index_document("a.lua", "function M.h()\nend");
    assert!(token.is_cancelled());
    assert_eq!(signs(host.symbol_index().bucket("a")), vec!["h"]);
}

#[test]
fn test_edits_to_excluded_names_are_not_indexed() {
    let mut host = AnalysisHost::new();
    assert!(host.update_document("player.lua.meta", "x = 1").is_none());
    assert_eq!(host.flush_pending(), 0);
}
