//! Structural diff between the displayed tree and a freshly built one.
//!
//! Two trees are comparable only when they have exactly the same shape:
//! every paired node agrees on row id, kind, file id, depth and child count.
//! Children are paired after sorting by path, so sibling order does not
//! matter. When the shapes differ the caller must replace the displayed tree
//! wholesale; a partial diff is never returned.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::debug;

use content_core::error::AppError;
use content_core::types::{Column, RowId, RowPatch};
use content_entity::{FileTree, NodeIndex};

/// Changed columns per row.
pub type DiffMap = BTreeMap<RowId, BTreeSet<Column>>;

/// Why two trees cannot be compared row for row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// The paired nodes disagree on a structural property.
    #[error("incompatible trees at {}: {reason}", row_label(.row))]
    Incompatible {
        /// Row of the displayed node, `None` for the root.
        row: Option<RowId>,
        /// The property that differed.
        reason: &'static str,
    },
}

fn row_label(row: &Option<RowId>) -> String {
    match row {
        Some(row) => format!("row {row}"),
        None => "root".to_string(),
    }
}

impl From<DiffError> for AppError {
    fn from(err: DiffError) -> Self {
        AppError::with_source(
            content_core::error::ErrorKind::Conflict,
            err.to_string(),
            err,
        )
    }
}

/// What the caller should do with a candidate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// Copy the listed columns into the displayed tree. May be empty.
    Patch(DiffMap),
    /// Discard the displayed tree and show the candidate instead.
    Replace {
        /// The shape mismatch, `None` when nothing was displayed yet.
        cause: Option<DiffError>,
    },
}

/// Compare `displayed` against `candidate`.
pub fn diff_trees(displayed: &FileTree, candidate: &FileTree) -> Result<DiffMap, DiffError> {
    let mut changes = DiffMap::new();
    diff_nodes(
        displayed,
        displayed.root(),
        candidate,
        candidate.root(),
        &mut changes,
    )?;
    Ok(changes)
}

fn diff_nodes(
    displayed: &FileTree,
    old_idx: NodeIndex,
    candidate: &FileTree,
    new_idx: NodeIndex,
    changes: &mut DiffMap,
) -> Result<(), DiffError> {
    let old = displayed.node(old_idx);
    let new = candidate.node(new_idx);
    let incompatible = |reason| DiffError::Incompatible {
        row: old.row_id(),
        reason,
    };

    if old.row_id() != new.row_id() {
        return Err(incompatible("row id differs"));
    }
    if old.is_root() != new.is_root() {
        return Err(incompatible("root-ness differs"));
    }
    if old.file_id() != new.file_id() {
        return Err(incompatible("file id differs"));
    }
    if old.is_folder() != new.is_folder() {
        return Err(incompatible("node kind differs"));
    }
    if old.depth != new.depth {
        return Err(incompatible("depth differs"));
    }
    if old.children().len() != new.children().len() {
        return Err(incompatible("child count differs"));
    }

    if let (Some(row_id), Some(old_view), Some(new_view)) = (old.row_id(), old.view(), new.view())
    {
        let columns = old_view.changed_columns(&new_view);
        if !columns.is_empty() {
            changes.entry(row_id).or_default().extend(columns);
        }
    }

    if old.is_folder() {
        let old_children = displayed.children_by_path(old_idx);
        let new_children = candidate.children_by_path(new_idx);
        for (old_child, new_child) in old_children.into_iter().zip(new_children) {
            diff_nodes(displayed, old_child, candidate, new_child, changes)?;
        }
    }

    Ok(())
}

/// Decide how `candidate` should reach the screen.
pub fn reconcile(displayed: Option<&FileTree>, candidate: &FileTree) -> Reconciliation {
    let Some(displayed) = displayed else {
        return Reconciliation::Replace { cause: None };
    };
    match diff_trees(displayed, candidate) {
        Ok(changes) => Reconciliation::Patch(changes),
        Err(cause) => {
            debug!(error = %cause, "Candidate tree does not match displayed tree");
            Reconciliation::Replace { cause: Some(cause) }
        }
    }
}

/// Copy every changed column from `candidate` into `displayed` and return
/// the rows to repaint. Aggregates are recomputed afterwards.
///
/// `changes` must come from `diff_trees(displayed, candidate)`.
pub fn apply_diff(
    displayed: &mut FileTree,
    candidate: &FileTree,
    changes: &DiffMap,
) -> Vec<RowPatch> {
    let mut patches = Vec::with_capacity(changes.len());

    for (row_id, columns) in changes {
        let (Some(idx), Some(source)) = (displayed.find(*row_id), candidate.serialize(*row_id))
        else {
            continue;
        };
        let columns: Vec<Column> = columns.iter().copied().collect();
        displayed.apply_columns(idx, &source, &columns);
        patches.push((idx, columns));
    }

    if !patches.is_empty() {
        displayed.recalculate();
    }

    patches
        .into_iter()
        .filter_map(|(idx, columns)| {
            displayed
                .node(idx)
                .view()
                .map(|row| RowPatch { row, columns })
        })
        .collect()
}
