//! Integration tests for priority edits through a session.

mod helpers;

use content_core::error::ErrorKind;
use content_core::types::{FileId, FilePriority, RowId, TriState};
use content_service::UpdateOutcome;

#[tokio::test]
async fn test_folder_edit_reaches_sink_once() {
    let mut t = helpers::TestSession::new();
    t.source.push(helpers::scenario());
    t.session.poll().await;

    let change = t
        .session
        .set_priority(&[RowId(0)], FilePriority::Ignored)
        .unwrap();

    assert_eq!(change.rows, vec![RowId(0), RowId(1), RowId(2)]);
    let calls = t.sink.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![(vec![FileId(0), FileId(1)], FilePriority::Ignored)]);
    assert_eq!(t.session.global_state(), TriState::Unchecked);
}

#[tokio::test]
async fn test_single_file_edit_marks_folder_partial() {
    let mut t = helpers::TestSession::new();
    t.source.push(helpers::scenario());
    t.session.poll().await;

    t.session
        .set_priority(&[RowId(1)], FilePriority::Ignored)
        .unwrap();

    let rows = t.surface.last_rows();
    assert_eq!(rows[0].checked, TriState::Partial);
    assert_eq!(rows[0].priority, FilePriority::Mixed);
    assert_eq!(rows[2].checked, TriState::Checked);
}

#[tokio::test]
async fn test_edit_then_poll_keeps_row_ids() {
    let mut t = helpers::TestSession::new();
    t.source.push(helpers::scenario());
    let mut polled = helpers::scenario();
    polled[1].priority = FilePriority::High;
    t.source.push(polled);
    t.session.poll().await;

    t.session.select(&[RowId(2)]).unwrap();
    t.session
        .set_selected_priority(FilePriority::High)
        .unwrap();

    // Backend now reports the new priority; nothing to repaint.
    assert_eq!(t.session.poll().await, UpdateOutcome::Unchanged);
    assert_eq!(t.session.selected_rows(), vec![RowId(2)]);
}

#[tokio::test]
async fn test_rejected_edits_leave_everything_untouched() {
    let mut t = helpers::TestSession::new();
    t.source.push(helpers::scenario());
    t.session.poll().await;
    let before = t.session.tree().unwrap().rows();

    let err = t
        .session
        .set_priority(&[RowId(9)], FilePriority::High)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    let err = t
        .session
        .set_priority(&[RowId(1)], FilePriority::Mixed)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    assert_eq!(t.session.tree().unwrap().rows(), before);
    assert!(t.sink.calls.lock().unwrap().is_empty());
    assert_eq!(t.surface.replace_count(), 1);
}

#[tokio::test]
async fn test_toggle_all_checks_then_clears() {
    let mut t = helpers::TestSession::new();
    t.source.push(helpers::scenario());
    t.session.poll().await;

    t.session.toggle_all().unwrap();
    assert_eq!(t.session.global_state(), TriState::Checked);
    t.session.toggle_all().unwrap();
    assert_eq!(t.session.global_state(), TriState::Unchecked);
    assert_eq!(t.sink.calls.lock().unwrap().len(), 2);
}
