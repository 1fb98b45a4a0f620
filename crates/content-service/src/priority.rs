//! Applies user priority edits and keeps ancestor folders consistent.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use content_core::error::AppError;
use content_core::result::AppResult;
use content_core::traits::ChangeSink;
use content_core::types::{FileId, FilePriority, RowId, TriState};
use content_entity::{FileTree, NodeIndex};

/// Coerce a loosely typed priority into a known one. Anything unknown is
/// `Normal`.
pub fn normalize_priority(value: &serde_json::Value) -> FilePriority {
    FilePriority::from_json(value)
}

/// Checkbox state of the whole table: `Checked` when no row is unchecked,
/// `Unchecked` when every row is (or there are no rows), otherwise `Partial`.
pub fn global_state(tree: &FileTree) -> TriState {
    let rows = tree.to_array();
    let unchecked = rows
        .iter()
        .filter(|idx| tree.node(**idx).checked == TriState::Unchecked)
        .count();

    if unchecked == rows.len() {
        TriState::Unchecked
    } else if unchecked == 0 {
        TriState::Checked
    } else {
        TriState::Partial
    }
}

/// Outcome of one [`PriorityController::set_priority`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityChange {
    /// The priority that was applied.
    pub priority: FilePriority,
    /// Selected rows and all their descendants, depth-first.
    pub rows: Vec<RowId>,
    /// Files handed to the change sink.
    pub file_ids: Vec<FileId>,
    /// Folders whose state the ancestor walk changed, in visit order.
    pub ancestors: Vec<RowId>,
}

/// Applies priority edits to a tree.
#[derive(Debug, Clone, Default)]
pub struct PriorityController {
    /// Optional persistence collaborator.
    sink: Option<Arc<dyn ChangeSink>>,
}

impl PriorityController {
    /// Creates a controller that notifies `sink` of every edit.
    pub fn new(sink: Option<Arc<dyn ChangeSink>>) -> Self {
        Self { sink }
    }

    /// Set `priority` on `row_ids` and everything below them.
    ///
    /// The sink, when present, is called once with every affected file.
    /// Every strict ancestor is then brought up to date and the whole tree's
    /// aggregates are recomputed before returning. Unknown rows and `Mixed`
    /// are rejected without touching the tree.
    pub fn set_priority(
        &self,
        tree: &mut FileTree,
        row_ids: &[RowId],
        priority: FilePriority,
    ) -> AppResult<PriorityChange> {
        if !priority.is_assignable() {
            return Err(AppError::validation("Mixed priority cannot be assigned"));
        }

        let selected = row_ids
            .iter()
            .map(|row| {
                tree.find(*row)
                    .ok_or_else(|| AppError::not_found(format!("Row {row} not found")))
            })
            .collect::<AppResult<Vec<NodeIndex>>>()?;

        let affected = Self::expand(tree, &selected);
        let checked = priority.tri_state();

        let file_ids: Vec<FileId> = affected
            .iter()
            .filter_map(|idx| tree.node(*idx).file_id())
            .collect();

        if let Some(sink) = &self.sink {
            if let Err(e) = sink.priority_changed(&file_ids, priority) {
                warn!(
                    files = file_ids.len(),
                    priority = %priority,
                    error = %e,
                    "Change sink rejected priority update"
                );
            }
        }

        for idx in &affected {
            tree.set_state(*idx, priority, checked)?;
        }

        let mut ancestors = Vec::new();
        for idx in &selected {
            Self::update_ancestors(tree, *idx, &mut ancestors)?;
        }

        tree.recalculate();

        let rows: Vec<RowId> = affected
            .iter()
            .filter_map(|idx| tree.node(*idx).row_id())
            .collect();

        debug!(
            selected = selected.len(),
            rows = rows.len(),
            files = file_ids.len(),
            ancestors = ancestors.len(),
            priority = %priority,
            "Applied priority"
        );

        Ok(PriorityChange {
            priority,
            rows,
            file_ids,
            ancestors,
        })
    }

    /// Flip the global checkbox: uncheck everything when it is fully
    /// checked, otherwise check everything. Returns `None` when no row needs
    /// to change.
    pub fn toggle_all(&self, tree: &mut FileTree) -> AppResult<Option<PriorityChange>> {
        let (target, priority) = if global_state(tree) == TriState::Checked {
            (TriState::Unchecked, FilePriority::Ignored)
        } else {
            (TriState::Checked, FilePriority::Normal)
        };

        let rows: Vec<RowId> = tree
            .to_array()
            .into_iter()
            .map(|idx| tree.node(idx))
            .filter(|node| node.checked != target)
            .filter_map(|node| node.row_id())
            .collect();

        if rows.is_empty() {
            return Ok(None);
        }

        self.set_priority(tree, &rows, priority).map(Some)
    }

    /// Selected nodes plus all descendants, de-duplicated, depth-first.
    fn expand(tree: &FileTree, selected: &[NodeIndex]) -> Vec<NodeIndex> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for idx in selected {
            for node in tree.descendants(*idx) {
                if seen.insert(node) {
                    out.push(node);
                }
            }
        }
        out
    }

    /// Walk from `idx` towards the root, recomputing each parent's checkbox
    /// and priority from its direct children. Stops at the root or at the
    /// first parent whose state is already correct.
    fn update_ancestors(
        tree: &mut FileTree,
        mut idx: NodeIndex,
        changed: &mut Vec<RowId>,
    ) -> AppResult<()> {
        while let Some(parent) = tree.node(idx).parent() {
            let parent_node = tree.node(parent);
            if parent_node.is_root() {
                break;
            }

            let (checked, priority) = Self::sibling_state(tree, parent);
            if parent_node.checked == checked && parent_node.priority == priority {
                break;
            }

            tree.set_state(parent, priority, checked)?;
            if let Some(row) = tree.node(parent).row_id() {
                changed.push(row);
            }
            idx = parent;
        }
        Ok(())
    }

    fn sibling_state(tree: &FileTree, folder: NodeIndex) -> (TriState, FilePriority) {
        let mut checked_count = 0usize;
        let mut unchecked_count = 0usize;
        let mut partial_count = 0usize;
        let mut priority: Option<FilePriority> = None;

        for child in tree.node(folder).children() {
            let node = tree.node(*child);
            match node.checked {
                TriState::Checked => checked_count += 1,
                TriState::Unchecked => unchecked_count += 1,
                TriState::Partial => partial_count += 1,
            }
            priority = match priority {
                None => Some(node.priority),
                Some(current) if current != node.priority => Some(FilePriority::Mixed),
                keep => keep,
            };
        }

        let checked = if partial_count > 0 || (checked_count > 0 && unchecked_count > 0) {
            TriState::Partial
        } else if checked_count > 0 {
            TriState::Checked
        } else {
            TriState::Unchecked
        };

        (checked, priority.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use content_core::types::FileRecord;

    use super::*;
    use crate::builder::TreeBuilder;

    #[derive(Debug, Default)]
    struct RecordingSink {
        calls: Mutex<Vec<(Vec<FileId>, FilePriority)>>,
        fail: bool,
    }

    impl ChangeSink for RecordingSink {
        fn priority_changed(&self, file_ids: &[FileId], priority: FilePriority) -> AppResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push((file_ids.to_vec(), priority));
            if self.fail {
                Err(AppError::external("backend unavailable"))
            } else {
                Ok(())
            }
        }
    }

    /// Rows: a(0) a/x(1) a/y(2) b(3) b/z(4)
    fn scenario() -> FileTree {
        TreeBuilder::default().build(&[
            FileRecord::new("a/x", 10, FilePriority::Normal),
            FileRecord::new("a/y", 10, FilePriority::Normal),
            FileRecord::new("b/z", 10, FilePriority::Ignored),
        ])
    }

    /// Rows: top(0) top/mid(1) top/mid/f(2) top/mid/g(3) top/h(4)
    fn nested() -> FileTree {
        TreeBuilder::default().build(&[
            FileRecord::new("top/mid/f", 10, FilePriority::Normal),
            FileRecord::new("top/mid/g", 10, FilePriority::Normal),
            FileRecord::new("top/h", 10, FilePriority::Normal),
        ])
    }

    fn state(tree: &FileTree, row: u32) -> (TriState, FilePriority) {
        let node = tree.get(RowId(row)).unwrap();
        (node.checked, node.priority)
    }

    #[test]
    fn test_ignoring_one_file_makes_folder_partial() {
        let mut tree = scenario();
        let change = PriorityController::default()
            .set_priority(&mut tree, &[RowId(1)], FilePriority::Ignored)
            .unwrap();

        assert_eq!(state(&tree, 1), (TriState::Unchecked, FilePriority::Ignored));
        assert_eq!(state(&tree, 0), (TriState::Partial, FilePriority::Mixed));
        assert_eq!(state(&tree, 3), (TriState::Unchecked, FilePriority::Ignored));
        assert_eq!(change.ancestors, vec![RowId(0)]);
        assert_eq!(tree.node(tree.root()).checked, TriState::Partial);
    }

    #[test]
    fn test_ignoring_folder_cascades_to_children() {
        let mut tree = scenario();
        let change = PriorityController::default()
            .set_priority(&mut tree, &[RowId(0)], FilePriority::Ignored)
            .unwrap();

        assert_eq!(change.rows, vec![RowId(0), RowId(1), RowId(2)]);
        assert_eq!(change.file_ids, vec![FileId(0), FileId(1)]);
        assert!(change.ancestors.is_empty());
        for row in [0, 1, 2] {
            assert_eq!(state(&tree, row), (TriState::Unchecked, FilePriority::Ignored));
        }
        assert_eq!(tree.node(tree.root()).checked, TriState::Unchecked);
        assert_eq!(tree.get(RowId(0)).unwrap().remaining, 0);
    }

    #[test]
    fn test_walk_updates_every_strict_ancestor() {
        let mut tree = nested();
        let change = PriorityController::default()
            .set_priority(&mut tree, &[RowId(2)], FilePriority::High)
            .unwrap();

        assert_eq!(change.ancestors, vec![RowId(1), RowId(0)]);
        assert_eq!(state(&tree, 1), (TriState::Checked, FilePriority::Mixed));
        assert_eq!(state(&tree, 0), (TriState::Checked, FilePriority::Mixed));
    }

    #[test]
    fn test_walk_stops_at_unchanged_folder() {
        let mut tree = nested();
        let controller = PriorityController::default();
        controller
            .set_priority(&mut tree, &[RowId(2)], FilePriority::High)
            .unwrap();

        // mid is already Mixed, so the walk stops there.
        let change = controller
            .set_priority(&mut tree, &[RowId(3)], FilePriority::Maximum)
            .unwrap();
        assert!(change.ancestors.is_empty());
        assert_eq!(state(&tree, 1), (TriState::Checked, FilePriority::Mixed));
    }

    #[test]
    fn test_nested_folder_edit_reaches_leaves_and_ancestors() {
        let mut tree = nested();
        let change = PriorityController::default()
            .set_priority(&mut tree, &[RowId(1)], FilePriority::Ignored)
            .unwrap();

        assert_eq!(change.rows, vec![RowId(1), RowId(2), RowId(3)]);
        assert_eq!(change.file_ids, vec![FileId(0), FileId(1)]);
        assert_eq!(change.ancestors, vec![RowId(0)]);
        assert_eq!(state(&tree, 1), (TriState::Unchecked, FilePriority::Ignored));
        assert_eq!(state(&tree, 2), (TriState::Unchecked, FilePriority::Ignored));
        assert_eq!(state(&tree, 3), (TriState::Unchecked, FilePriority::Ignored));
        assert_eq!(state(&tree, 0), (TriState::Partial, FilePriority::Mixed));
        assert_eq!(state(&tree, 4), (TriState::Checked, FilePriority::Normal));
        assert_eq!(tree.get(RowId(0)).unwrap().remaining, 10);
    }

    #[test]
    fn test_sink_called_once_with_files_only() {
        let sink = Arc::new(RecordingSink::default());
        let controller = PriorityController::new(Some(sink.clone()));
        let mut tree = nested();

        controller
            .set_priority(&mut tree, &[RowId(0), RowId(1)], FilePriority::High)
            .unwrap();

        let calls = sink.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, vec![FileId(0), FileId(1), FileId(2)]);
        assert_eq!(calls[0].1, FilePriority::High);
    }

    #[test]
    fn test_sink_failure_keeps_local_change() {
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..RecordingSink::default()
        });
        let controller = PriorityController::new(Some(sink));
        let mut tree = scenario();

        controller
            .set_priority(&mut tree, &[RowId(4)], FilePriority::Normal)
            .unwrap();
        assert_eq!(state(&tree, 4), (TriState::Checked, FilePriority::Normal));
        assert_eq!(state(&tree, 3), (TriState::Checked, FilePriority::Normal));
    }

    #[test]
    fn test_mixed_and_unknown_rows_rejected() {
        let sink = Arc::new(RecordingSink::default());
        let controller = PriorityController::new(Some(sink.clone()));
        let mut tree = scenario();
        let before = tree.rows();

        assert!(controller
            .set_priority(&mut tree, &[RowId(1)], FilePriority::Mixed)
            .is_err());
        let err = controller
            .set_priority(&mut tree, &[RowId(1), RowId(77)], FilePriority::High)
            .unwrap_err();
        assert_eq!(err.kind, content_core::error::ErrorKind::NotFound);

        assert_eq!(tree.rows(), before);
        assert!(sink.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_global_state_and_toggle() {
        let mut tree = scenario();
        let controller = PriorityController::default();
        assert_eq!(global_state(&tree), TriState::Partial);

        let change = controller.toggle_all(&mut tree).unwrap().unwrap();
        assert_eq!(change.priority, FilePriority::Normal);
        assert_eq!(global_state(&tree), TriState::Checked);

        controller.toggle_all(&mut tree).unwrap();
        assert_eq!(global_state(&tree), TriState::Unchecked);
        assert!(
            tree.rows()
                .iter()
                .all(|row| row.priority == FilePriority::Ignored)
        );
    }

    #[test]
    fn test_global_state_of_empty_tree() {
        let mut tree = FileTree::new();
        assert_eq!(global_state(&tree), TriState::Unchecked);
        assert!(PriorityController::default()
            .toggle_all(&mut tree)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_normalize_priority_is_permissive() {
        assert_eq!(normalize_priority(&serde_json::json!(6)), FilePriority::High);
        assert_eq!(normalize_priority(&serde_json::json!("x")), FilePriority::Normal);
        assert_eq!(normalize_priority(&serde_json::json!(2)), FilePriority::Normal);
    }
}
