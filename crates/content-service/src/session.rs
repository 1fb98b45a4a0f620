//! A displayed content tree kept in sync with its snapshot source.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use content_core::config::content::ContentConfig;
use content_core::error::AppError;
use content_core::result::AppResult;
use content_core::traits::{ChangeSink, RenderSurface, SnapshotSource};
use content_core::types::{FilePriority, FileRecord, RowId, TriState};
use content_entity::{FileTree, FileTreeView};

use crate::builder::TreeBuilder;
use crate::priority::{PriorityChange, PriorityController, global_state};
use crate::reconcile::{Reconciliation, apply_diff, reconcile};

/// What a snapshot update did to the displayed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The table was repopulated from scratch.
    Replaced,
    /// This many rows were repainted in place.
    Patched(usize),
    /// The snapshot matched what is displayed.
    Unchanged,
    /// The snapshot could not be fetched; the last tree stays on screen.
    Skipped,
}

/// Owns the displayed tree, its collapse state and the row selection.
#[derive(Debug)]
pub struct ContentSession {
    builder: TreeBuilder,
    controller: PriorityController,
    source: Arc<dyn SnapshotSource>,
    surface: Arc<dyn RenderSurface>,
    tree: Option<FileTree>,
    view: Option<FileTreeView>,
    selection: BTreeSet<RowId>,
    collapse_depth: Option<u32>,
}

impl ContentSession {
    /// Creates a session with nothing displayed yet.
    pub fn new(
        config: &ContentConfig,
        source: Arc<dyn SnapshotSource>,
        surface: Arc<dyn RenderSurface>,
        sink: Option<Arc<dyn ChangeSink>>,
    ) -> Self {
        Self {
            builder: TreeBuilder::new(config),
            controller: PriorityController::new(sink),
            source,
            surface,
            tree: None,
            view: None,
            selection: BTreeSet::new(),
            collapse_depth: config.collapse_depth,
        }
    }

    /// The displayed tree, if any snapshot has been applied.
    pub fn tree(&self) -> Option<&FileTree> {
        self.tree.as_ref()
    }

    pub fn view(&self) -> Option<&FileTreeView> {
        self.view.as_ref()
    }

    /// Mutable collapse state, for expand/collapse clicks.
    pub fn view_mut(&mut self) -> Option<&mut FileTreeView> {
        self.view.as_mut()
    }

    /// State of the header checkbox.
    pub fn global_state(&self) -> TriState {
        self.tree.as_ref().map(global_state).unwrap_or_default()
    }

    /// Fetch a snapshot and apply it. Fetch failures are logged and leave
    /// the displayed tree untouched.
    pub async fn poll(&mut self) -> UpdateOutcome {
        match self.source.fetch().await {
            Ok(records) => self.update(&records),
            Err(e) => {
                warn!(error = %e, "Snapshot fetch failed, keeping last tree");
                UpdateOutcome::Skipped
            }
        }
    }

    /// Build a tree from `records` and bring the display in line with it,
    /// patching when the shape is unchanged and repopulating otherwise.
    pub fn update(&mut self, records: &[FileRecord]) -> UpdateOutcome {
        let candidate = self.builder.build(records);

        match reconcile(self.tree.as_ref(), &candidate) {
            Reconciliation::Replace { cause } => {
                if let Some(cause) = &cause {
                    info!(reason = %cause, rows = candidate.len(), "Repopulating content table");
                }
                self.replace(candidate);
                UpdateOutcome::Replaced
            }
            Reconciliation::Patch(changes) if changes.is_empty() => UpdateOutcome::Unchanged,
            Reconciliation::Patch(changes) => {
                let Some(displayed) = self.tree.as_mut() else {
                    return UpdateOutcome::Unchanged;
                };
                let patches = apply_diff(displayed, &candidate, &changes);
                debug!(rows = patches.len(), "Patching content table");
                self.surface.patch(&patches);
                UpdateOutcome::Patched(patches.len())
            }
        }
    }

    /// Select rows for a later [`set_selected_priority`](Self::set_selected_priority).
    /// Unknown rows are rejected and the previous selection is kept.
    pub fn select(&mut self, rows: &[RowId]) -> AppResult<()> {
        let tree = self.displayed()?;
        if let Some(missing) = rows.iter().find(|row| tree.find(**row).is_none()) {
            return Err(AppError::not_found(format!("Row {missing} not found")));
        }
        self.selection = rows.iter().copied().collect();
        Ok(())
    }

    /// Currently selected rows, ascending.
    pub fn selected_rows(&self) -> Vec<RowId> {
        self.selection.iter().copied().collect()
    }

    /// Apply `priority` to `rows` and repaint the whole table.
    pub fn set_priority(
        &mut self,
        rows: &[RowId],
        priority: FilePriority,
    ) -> AppResult<PriorityChange> {
        let tree = self
            .tree
            .as_mut()
            .ok_or_else(|| AppError::not_found("No content tree is displayed"))?;
        let change = self.controller.set_priority(tree, rows, priority)?;
        self.surface.replace(&tree.rows());
        Ok(change)
    }

    /// Apply `priority` to the current selection.
    pub fn set_selected_priority(&mut self, priority: FilePriority) -> AppResult<PriorityChange> {
        let rows = self.selected_rows();
        self.set_priority(&rows, priority)
    }

    /// Flip the header checkbox. Returns `None` when nothing changed.
    pub fn toggle_all(&mut self) -> AppResult<Option<PriorityChange>> {
        let tree = self
            .tree
            .as_mut()
            .ok_or_else(|| AppError::not_found("No content tree is displayed"))?;
        let change = self.controller.toggle_all(tree)?;
        if change.is_some() {
            self.surface.replace(&tree.rows());
        }
        Ok(change)
    }

    fn displayed(&self) -> AppResult<&FileTree> {
        self.tree
            .as_ref()
            .ok_or_else(|| AppError::not_found("No content tree is displayed"))
    }

    fn replace(&mut self, tree: FileTree) {
        let mut view = FileTreeView::new(&tree);
        if let Some(depth) = self.collapse_depth {
            view.collapse_all(depth);
        }
        self.selection.retain(|row| tree.find(*row).is_some());
        self.surface.replace(&tree.rows());
        self.view = Some(view);
        self.tree = Some(tree);
    }
}
