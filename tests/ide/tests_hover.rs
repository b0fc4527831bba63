//! Hover tests for the IDE layer.

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::PLAYER;

#[test]
fn test_hover_renders_declaration_and_comments() {
    let host = analysis_from_sources(&[("player.lua", PLAYER)]);
    let hover = host.analysis().hover("player.lua", 4).expect("hover on attack");
    assert_eq!(
        hover.contents,
        "```\nfunction M.attack(self, target)\n```\n---\n-- Deal damage to a target.\n-- @param target Enemy"
    );
}

#[test]
fn test_hover_without_comments() {
    let host = analysis_from_sources(&[("player.lua", PLAYER)]);
    let hover = host.analysis().hover("player.lua", 12).expect("hover on heal");
    assert_eq!(hover.contents, "```\nfunction M:heal(amount)\n```\n---\n");
}

#[test]
fn test_hover_only_on_member_functions() {
    let host = analysis_from_sources(&[("player.lua", PLAYER)]);
    let analysis = host.analysis();
    assert!(analysis.hover("player.lua", 0).is_none());
    assert!(analysis.hover("player.lua", 5).is_none());
    assert!(analysis.hover("missing.lua", 4).is_none());
}
