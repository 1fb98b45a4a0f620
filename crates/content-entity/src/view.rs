//! Per-folder expand/collapse state for a displayed tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use content_core::types::RowId;

use crate::tree::FileTree;

/// Collapse state of one folder row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderState {
    /// Folder depth, used by [`FileTreeView::collapse_all`].
    pub depth: u32,
    /// Whether the folder's children are hidden.
    pub collapsed: bool,
}

/// Tracks which folders are collapsed and which changed since the last
/// render pass.
#[derive(Debug, Clone, Default)]
pub struct FileTreeView {
    state: BTreeMap<RowId, FolderState>,
    rendered: BTreeMap<RowId, FolderState>,
}

impl FileTreeView {
    /// State assumed for folders the view does not know about.
    pub const DEFAULT_COLLAPSED: bool = false;

    /// Seed the view with every folder of `tree`, all expanded.
    pub fn new(tree: &FileTree) -> Self {
        let state = tree
            .to_array()
            .into_iter()
            .map(|idx| tree.node(idx))
            .filter(|node| node.is_folder())
            .filter_map(|node| {
                node.row_id().map(|row| {
                    (
                        row,
                        FolderState {
                            depth: node.depth,
                            collapsed: Self::DEFAULT_COLLAPSED,
                        },
                    )
                })
            })
            .collect();
        Self {
            state,
            rendered: BTreeMap::new(),
        }
    }

    /// Number of tracked folders.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether no folders are tracked.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn is_collapsed(&self, row_id: RowId) -> bool {
        self.state
            .get(&row_id)
            .map(|s| s.collapsed)
            .unwrap_or(Self::DEFAULT_COLLAPSED)
    }

    /// Collapse a folder. Unknown rows are ignored.
    pub fn collapse(&mut self, row_id: RowId) {
        if let Some(state) = self.state.get_mut(&row_id) {
            state.collapsed = true;
        }
    }

    /// Expand a folder. Unknown rows are ignored.
    pub fn expand(&mut self, row_id: RowId) {
        if let Some(state) = self.state.get_mut(&row_id) {
            state.collapsed = false;
        }
    }

    /// Flip a folder's state and return the new value.
    pub fn toggle(&mut self, row_id: RowId) -> bool {
        if self.is_collapsed(row_id) {
            self.expand(row_id);
        } else {
            self.collapse(row_id);
        }
        self.is_collapsed(row_id)
    }

    /// Collapse every folder whose depth is at least `min_depth`.
    pub fn collapse_all(&mut self, min_depth: u32) {
        for state in self.state.values_mut() {
            if state.depth >= min_depth {
                state.collapsed = true;
            }
        }
    }

    pub fn expand_all(&mut self) {
        for state in self.state.values_mut() {
            state.collapsed = false;
        }
    }

    /// Rows whose state differs from the previous call, in row order.
    pub fn render(&mut self) -> Vec<RowId> {
        let changed = self
            .state
            .iter()
            .filter(|(row, state)| self.rendered.get(*row) != Some(*state))
            .map(|(row, _)| *row)
            .collect();
        self.rendered = self.state.clone();
        changed
    }
}

#[cfg(test)]
mod tests {
    use content_core::types::{FileId, FilePriority};

    use super::*;
    use crate::node::NewFile;

    fn tree() -> FileTree {
        let mut tree = FileTree::new();
        let root = tree.root();
        let a = tree.add_folder(root, RowId(0), "a", "a", 0).unwrap();
        let b = tree.add_folder(a, RowId(1), "b", "a/b", 1).unwrap();
        tree.add_file(
            b,
            NewFile {
                row_id: RowId(2),
                file_id: FileId(0),
                name: "c".to_string(),
                path: "a/b/c".to_string(),
                depth: 2,
                size: 1,
                priority: FilePriority::Normal,
                progress: 0.0,
                remaining: 1,
                availability: 0.0,
            },
        )
        .unwrap();
        tree.recalculate();
        tree
    }

    #[test]
    fn test_tracks_only_folders() {
        let view = FileTreeView::new(&tree());
        assert_eq!(view.len(), 2);
        assert!(!view.is_collapsed(RowId(0)));
        assert!(!view.is_collapsed(RowId(2)));
    }

    #[test]
    fn test_collapse_all_respects_depth() {
        let mut view = FileTreeView::new(&tree());
        view.collapse_all(1);
        assert!(!view.is_collapsed(RowId(0)));
        assert!(view.is_collapsed(RowId(1)));
        view.expand_all();
        assert!(!view.is_collapsed(RowId(1)));
    }

    #[test]
    fn test_unknown_rows_are_ignored() {
        let mut view = FileTreeView::new(&tree());
        view.collapse(RowId(2));
        assert!(!view.is_collapsed(RowId(2)));
        assert!(!view.toggle(RowId(42)));
    }

    #[test]
    fn test_render_reports_changes_once() {
        let mut view = FileTreeView::new(&tree());
        assert_eq!(view.render(), vec![RowId(0), RowId(1)]);
        assert!(view.render().is_empty());

        assert!(view.toggle(RowId(1)));
        assert_eq!(view.render(), vec![RowId(1)]);
        assert!(view.render().is_empty());
    }
}
