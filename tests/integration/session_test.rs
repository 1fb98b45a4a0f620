//! Integration tests for polling and reconciling the content table.

mod helpers;

use content_core::types::{Column, FilePriority, FileRecord, RowId, TriState};
use content_service::UpdateOutcome;

#[tokio::test]
async fn test_progress_ticks_patch_in_place() {
    let mut t = helpers::TestSession::new();
    t.source.push(helpers::scenario());
    let mut next = helpers::scenario();
    next[0] = next[0].clone().with_progress(0.25);
    t.source.push(next);

    assert_eq!(t.session.poll().await, UpdateOutcome::Replaced);
    assert_eq!(t.session.poll().await, UpdateOutcome::Patched(2));

    assert_eq!(t.surface.replace_count(), 1);
    let batches = t.surface.patch_batches();
    assert_eq!(batches.len(), 1);
    let leaf = batches[0]
        .iter()
        .find(|p| p.row.row_id == RowId(1))
        .unwrap();
    assert_eq!(leaf.columns, vec![Column::Progress, Column::Remaining]);
    assert_eq!(leaf.row.progress, 25.0);
    assert_eq!(leaf.row.remaining, 75);

    let folder = t.session.tree().unwrap().get(RowId(0)).unwrap();
    assert_eq!(folder.progress, 12.5);
}

#[tokio::test]
async fn test_new_file_repopulates_table() {
    let mut t = helpers::TestSession::new();
    t.source.push(helpers::scenario());
    let mut next = helpers::scenario();
    next.push(FileRecord::new("a/w", 5, FilePriority::High));
    t.source.push(next);

    t.session.poll().await;
    assert_eq!(t.session.poll().await, UpdateOutcome::Replaced);
    assert_eq!(t.surface.replace_count(), 2);
    assert_eq!(t.surface.last_rows().len(), 6);
}

#[tokio::test]
async fn test_fetch_failure_keeps_table() {
    let mut t = helpers::TestSession::new();
    t.source.push(helpers::scenario());
    t.source.fail("connection reset");
    t.source.push(helpers::scenario());

    assert_eq!(t.session.poll().await, UpdateOutcome::Replaced);
    assert_eq!(t.session.poll().await, UpdateOutcome::Skipped);
    assert_eq!(t.session.poll().await, UpdateOutcome::Unchanged);
    assert_eq!(t.surface.replace_count(), 1);
}

#[tokio::test]
async fn test_lenient_payload_builds_tree() {
    let mut t = helpers::TestSession::new();
    t.source.push_json(serde_json::json!([
        {"name": "show/.unwanted/sample.mkv", "size": "12", "priority": 0},
        {"name": "show/episode.mkv", "size": 1000, "priority": 99, "progress": 0.5},
    ]));

    assert_eq!(t.session.poll().await, UpdateOutcome::Replaced);
    let rows = t.surface.last_rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].name, "sample.mkv");
    assert_eq!(rows[1].size, 12);
    assert_eq!(rows[2].priority, FilePriority::Normal);
    assert_eq!(rows[0].checked, TriState::Partial);
}

#[tokio::test]
async fn test_collapse_state_survives_patches() {
    let mut t = helpers::TestSession::new();
    t.source.push(helpers::scenario());
    let mut next = helpers::scenario();
    next[2] = next[2].clone().with_availability(3.0);
    t.source.push(next);

    t.session.poll().await;
    t.session.view_mut().unwrap().collapse(RowId(3));
    t.session.poll().await;

    assert!(t.session.view().unwrap().is_collapsed(RowId(3)));
}
